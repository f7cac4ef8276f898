//! Fit-to-bounds geometry for placing a texture inside a region of a viewport.

use crate::foundation::core::{Point, Rect, Size, Vec2, pixel_extent};
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::render::cpu::CpuSurface;
use crate::render::surface::{BlendMode, Paint, RenderTarget};
use crate::render::texture::Texture;

/// How the source fills the destination box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fit {
    /// Fill the box, cropping the source to the box's aspect ratio.
    #[default]
    Crop,
    /// Fit the whole source inside the box, shrinking the box to the source's aspect ratio.
    Scale,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ResizeOptions {
    pub fit: Fit,
    /// Per-axis factor applied to the box about its center.
    pub bounds_scale: Vec2,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            fit: Fit::Crop,
            bounds_scale: Vec2::new(1.0, 1.0),
        }
    }
}

/// Pure geometry of a resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizePlan {
    /// Where the result goes, in viewport coordinates.
    pub dest: Rect,
    /// Region of the source that is sampled, in texels.
    pub crop: Rect,
}

#[derive(Clone, Debug)]
pub struct ResizeResult {
    pub texture: Texture,
    pub bounds: Rect,
}

/// Box described by viewport fractions.
///
/// `top_left` is measured from the viewport origin; `bottom_right` is an offset from the far
/// corner, so `(0, 0)` for both selects the whole viewport and `(-0.5, 0)` pulls the right edge
/// to the middle.
pub fn bounding_rect(top_left: Vec2, bottom_right: Vec2, viewport: Size) -> Rect {
    let (w, h) = (viewport.width, viewport.height);
    Rect::new(
        top_left.x * w,
        top_left.y * h,
        bottom_right.x * w + w,
        bottom_right.y * h + h,
    )
}

fn scale_centered(r: Rect, s: Vec2) -> Rect {
    Rect::from_center_size(r.center(), (r.width() * s.x, r.height() * s.y))
}

/// Compute destination box and source crop for `input` placed in the given viewport region.
pub fn compute(
    input: Size,
    viewport: Size,
    top_left: Vec2,
    bottom_right: Vec2,
    opts: ResizeOptions,
) -> ResizePlan {
    let bounds = scale_centered(
        bounding_rect(top_left, bottom_right, viewport),
        opts.bounds_scale,
    );
    let full_input = Rect::from_origin_size(Point::ORIGIN, input);
    if bounds.width() <= 0.0 || bounds.height() <= 0.0 || input.is_zero_area() {
        return ResizePlan {
            dest: bounds,
            crop: full_input,
        };
    }

    match opts.fit {
        Fit::Crop => {
            let mut crop = bounds.size();
            let fit_width = |c: Size| c * (input.width / c.width);
            let fit_height = |c: Size| c * (input.height / c.height);
            if crop.width / crop.height > 1.0 {
                crop = fit_width(crop);
                if input.height < crop.height {
                    crop = fit_height(crop);
                }
            } else {
                crop = fit_height(crop);
                if input.width < crop.width {
                    crop = fit_width(crop);
                }
            }
            ResizePlan {
                dest: bounds,
                crop: Rect::from_center_size(full_input.center(), crop),
            }
        }
        Fit::Scale => {
            let mut scale;
            if input.width / input.height > 1.0 {
                scale = bounds.width() / input.width;
                if input.height * scale > bounds.height() {
                    scale = bounds.height() / input.height;
                }
            } else {
                scale = bounds.height() / input.height;
                if input.width * scale > bounds.width() {
                    scale = bounds.width() / input.width;
                }
            }
            ResizePlan {
                dest: Rect::from_center_size(bounds.center(), input * scale),
                crop: full_input,
            }
        }
    }
}

/// Render `input` through [`compute`] into a new texture sized to the destination box.
#[tracing::instrument(level = "debug", skip(input), fields(input_w = input.width(), input_h = input.height()))]
pub fn process(
    input: &Texture,
    viewport: Size,
    top_left: Vec2,
    bottom_right: Vec2,
    opts: ResizeOptions,
) -> SpriteResult<ResizeResult> {
    if input.is_empty() {
        return Err(SpriteError::validation("cannot resize an empty texture"));
    }
    let plan = compute(input.size(), viewport, top_left, bottom_right, opts);
    let (w, h) = pixel_extent(plan.dest.size());
    let mut surface = CpuSurface::new(w, h)?;
    surface.draw_texture(
        input,
        plan.crop,
        Rect::new(0.0, 0.0, f64::from(w), f64::from(h)),
        Paint::default().with_blend(BlendMode::Copy),
    );
    tracing::debug!(?plan, width = w, height = h, "resized texture");
    Ok(ResizeResult {
        texture: surface.to_texture(),
        bounds: plan.dest,
    })
}

#[cfg(test)]
#[path = "../tests/unit/resize.rs"]
mod tests;
