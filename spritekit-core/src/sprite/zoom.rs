use crate::foundation::core::{Point, Rect, Size, pixel_extent};
use crate::render::cpu::CpuSurface;
use crate::render::surface::{BlendMode, Paint, RenderTarget};
use crate::render::texture::Texture;

/// Region of a `texture_size` texture sampled at `zoom`, centered on `center`.
///
/// `zoom = 0` samples the whole texture (when centered); `zoom = 1` collapses to the center.
pub fn sample_rect(texture_size: Size, center: Point, zoom: f64) -> Rect {
    let z = 1.0 - zoom.clamp(0.0, 1.0);
    let half = (texture_size.to_vec2() * 0.5) * z;
    Rect::from_points(center - half, center + half)
}

/// Offscreen re-render of the input texture through the sampling rect.
#[derive(Debug, Default)]
pub(crate) struct ZoomPass {
    input: Option<Texture>,
    output: Option<Texture>,
    surface: Option<CpuSurface>,
    texture_size: Size,
    zoom_center: Point,
    sample_rect: Rect,
    dirty: bool,
}

impl ZoomPass {
    pub(crate) fn texture_size(&self) -> Size {
        self.texture_size
    }

    pub(crate) fn zoom_center(&self) -> Point {
        self.zoom_center
    }

    pub(crate) fn sample_rect(&self) -> Rect {
        self.sample_rect
    }

    pub(crate) fn input(&self) -> Option<&Texture> {
        self.input.as_ref()
    }

    pub(crate) fn output(&self) -> Option<&Texture> {
        self.output.as_ref()
    }

    pub(crate) fn set_input(&mut self, texture: Texture) {
        self.input = Some(texture);
        self.dirty = true;
    }

    /// Forget the input and output; geometry is kept.
    pub(crate) fn clear_textures(&mut self) {
        self.input = None;
        self.output = None;
        self.dirty = false;
    }

    /// Adopt a new texture size and recenter.
    pub(crate) fn reset_geometry(&mut self, size: Size, zoom: f64) {
        self.texture_size = size;
        self.zoom_center = (size.to_vec2() * 0.5).to_point();
        self.recompute(zoom);
    }

    pub(crate) fn set_zoom_center(&mut self, center: Point, zoom: f64) {
        self.zoom_center = center;
        self.recompute(zoom);
    }

    pub(crate) fn recompute(&mut self, zoom: f64) {
        let rect = sample_rect(self.texture_size, self.zoom_center, zoom);
        if rect != self.sample_rect {
            self.sample_rect = rect;
            self.dirty = true;
        }
    }

    /// Re-render the output if the input or sampling changed since the last run.
    pub(crate) fn compose(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        let Some(input) = self.input.as_ref() else {
            return;
        };

        let full = Rect::from_origin_size(Point::ORIGIN, input.size());
        if self.sample_rect == full {
            self.output = Some(input.clone());
            return;
        }

        let (w, h) = pixel_extent(self.texture_size);
        let reuse = self
            .surface
            .as_ref()
            .is_some_and(|s| s.width() == w && s.height() == h);
        if !reuse {
            match CpuSurface::new(w, h) {
                Ok(surface) => self.surface = Some(surface),
                Err(err) => {
                    tracing::warn!(error = %err, "zoom pass cannot allocate its surface; showing input");
                    self.surface = None;
                    self.output = Some(input.clone());
                    return;
                }
            }
        }
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        let dst = Rect::new(0.0, 0.0, f64::from(w), f64::from(h));
        surface.draw_texture(
            input,
            self.sample_rect,
            dst,
            Paint::default().with_blend(BlendMode::Copy),
        );
        self.output = Some(surface.to_texture());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sprite/zoom.rs"]
mod tests;
