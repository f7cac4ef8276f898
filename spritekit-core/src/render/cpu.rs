use crate::foundation::core::{Affine, Color, Point, Rect, Rgba8Premul};
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::foundation::math::unit_to_u8;
use crate::render::composite::{blend, over_in_place, tint};
use crate::render::surface::{BlendMode, Paint, RenderTarget};
use crate::render::texture::Texture;

const MIN_DET: f64 = 1e-12;

#[derive(Clone, Copy, Debug)]
struct State {
    transform: Affine,
    viewport: Rect,
}

/// Software render target backed by a premultiplied RGBA8 buffer.
///
/// Textured quads are sampled nearest-neighbour by inverse-mapping pixel centers. Vector
/// content goes through `vello_cpu` via [`CpuSurface::paint_vector`].
pub struct CpuSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    state: State,
    stack: Vec<State>,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("transform", &self.state.transform)
            .field("viewport", &self.state.viewport)
            .field("depth", &self.stack.len())
            .finish()
    }
}

impl CpuSurface {
    /// Transparent surface. Both sides must be in `1..=65535`.
    pub fn new(width: u32, height: u32) -> SpriteResult<Self> {
        if width == 0 || height == 0 {
            return Err(SpriteError::validation(format!(
                "surface size must be non-zero, got {width}x{height}"
            )));
        }
        if u16::try_from(width).is_err() || u16::try_from(height).is_err() {
            return Err(SpriteError::validation(format!(
                "surface size {width}x{height} exceeds 65535"
            )));
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize) * 4],
            state: State {
                transform: Affine::IDENTITY,
                viewport: full_rect(width, height),
            },
            stack: Vec::new(),
        })
    }

    /// 1x1 transparent surface.
    pub(crate) fn unit() -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![0; 4],
            state: State {
                transform: Affine::IDENTITY,
                viewport: full_rect(1, 1),
            },
            stack: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Snapshot the pixels as a texture.
    pub fn to_texture(&self) -> Texture {
        Texture::from_premul_rgba8(self.width, self.height, self.pixels.clone())
            .unwrap_or_else(|_| Texture::solid(self.width, self.height, Rgba8Premul::transparent()))
    }

    /// Straight-alpha image for encoding.
    pub fn to_rgba_image(&self) -> SpriteResult<image::RgbaImage> {
        let tex = self.to_texture();
        image::RgbaImage::from_raw(self.width, self.height, tex.to_straight_rgba8())
            .ok_or_else(|| SpriteError::render("surface buffer does not match its size"))
    }

    /// Rasterize vector content with `vello_cpu` and composite it over the surface.
    ///
    /// The context starts with the surface's device transform (viewport offset times model
    /// transform); the result is clipped to the viewport.
    pub fn paint_vector(
        &mut self,
        f: impl FnOnce(&mut vello_cpu::RenderContext),
    ) -> SpriteResult<()> {
        let w = u16::try_from(self.width)
            .map_err(|_| SpriteError::render("surface width exceeds u16"))?;
        let h = u16::try_from(self.height)
            .map_err(|_| SpriteError::render("surface height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(affine_to_cpu(self.device_transform()));
        f(&mut ctx);
        ctx.flush();

        let mut tmp = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut tmp);

        let Some((x0, y0, x1, y1)) = self.clip_bounds() else {
            return Ok(());
        };
        let src = tmp.data_as_u8_slice();
        let row_bytes = (self.width as usize) * 4;
        for y in y0..y1 {
            let start = (y as usize) * row_bytes + (x0 as usize) * 4;
            let end = (y as usize) * row_bytes + (x1 as usize) * 4;
            over_in_place(&mut self.pixels[start..end], &src[start..end])?;
        }
        Ok(())
    }

    /// Fill `rect` (model coordinates) with a straight color at `alpha`.
    pub fn fill_rect(&mut self, rect: Rect, color: Color, alpha: f32) -> SpriteResult<()> {
        let px = color.to_premul_rgba8(1.0);
        let a = unit_to_u8(alpha) as u8;
        self.paint_vector(|ctx| {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(px.r, px.g, px.b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1));
        })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    fn device_transform(&self) -> Affine {
        Affine::translate(self.state.viewport.origin().to_vec2()) * self.state.transform
    }

    fn clip_rect(&self) -> Rect {
        self.state
            .viewport
            .abs()
            .intersect(full_rect(self.width, self.height))
    }

    /// Pixel range `[x0, x1) x [y0, y1)` covered by the clip rect.
    fn clip_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        pixel_span(self.clip_rect(), self.width, self.height)
    }
}

impl RenderTarget for CpuSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgba8Premul) {
        let px = color.to_array();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    fn transform(&self) -> Affine {
        self.state.transform
    }

    fn set_transform(&mut self, transform: Affine) {
        self.state.transform = transform;
    }

    fn viewport(&self) -> Rect {
        self.state.viewport
    }

    fn set_viewport(&mut self, viewport: Rect) {
        self.state.viewport = viewport;
    }

    fn push_state(&mut self) {
        self.stack.push(self.state);
    }

    fn pop_state(&mut self) {
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => tracing::warn!("CpuSurface::pop_state without matching push_state"),
        }
    }

    fn draw_texture(&mut self, texture: &Texture, src: Rect, dst: Rect, paint: Paint) {
        let alpha = paint.alpha.clamp(0.0, 1.0);
        if texture.is_empty() || (alpha <= 0.0 && paint.blend != BlendMode::Copy) {
            return;
        }
        let dst = dst.abs();
        if dst.width() <= 0.0 || dst.height() <= 0.0 {
            return;
        }

        let device = self.device_transform();
        if device.determinant().abs() < MIN_DET {
            tracing::trace!("draw_texture skipped: degenerate transform");
            return;
        }
        let inv = device.inverse();

        let clip = self.clip_rect();
        let covered = device.transform_rect_bbox(dst).intersect(clip);
        let Some((x0, y0, x1, y1)) = pixel_span(covered, self.width, self.height) else {
            return;
        };

        let src = src.abs();
        let (tw, th) = (i64::from(texture.width()), i64::from(texture.height()));
        let (sx_lo, sx_hi) = texel_range(src.x0, src.x1, tw);
        let (sy_lo, sy_hi) = texel_range(src.y0, src.y1, th);

        let tint_u8 = [
            unit_to_u8(paint.tint.r),
            unit_to_u8(paint.tint.g),
            unit_to_u8(paint.tint.b),
        ];
        let tinted = tint_u8 != [255, 255, 255];

        for y in y0..y1 {
            for x in x0..x1 {
                let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                if !clip.contains(center) {
                    continue;
                }
                let p = inv * center;
                if p.x < dst.x0 || p.x >= dst.x1 || p.y < dst.y0 || p.y >= dst.y1 {
                    continue;
                }
                let u = (p.x - dst.x0) / dst.width();
                let v = (p.y - dst.y0) / dst.height();
                let tx = ((src.x0 + u * src.width()).floor() as i64).clamp(sx_lo, sx_hi);
                let ty = ((src.y0 + v * src.height()).floor() as i64).clamp(sy_lo, sy_hi);

                let Some(mut texel) = texture.pixel(tx as u32, ty as u32) else {
                    continue;
                };
                if tinted {
                    texel = tint(texel, tint_u8);
                }

                let i = self.index(x, y);
                let d = [
                    self.pixels[i],
                    self.pixels[i + 1],
                    self.pixels[i + 2],
                    self.pixels[i + 3],
                ];
                let out = blend(paint.blend, d, texel, alpha);
                self.pixels[i..i + 4].copy_from_slice(&out);
            }
        }
    }
}

fn full_rect(width: u32, height: u32) -> Rect {
    Rect::new(0.0, 0.0, f64::from(width), f64::from(height))
}

fn pixel_span(r: Rect, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    if !(r.width() > 0.0 && r.height() > 0.0) {
        return None;
    }
    let x0 = r.x0.floor().clamp(0.0, f64::from(width)) as u32;
    let y0 = r.y0.floor().clamp(0.0, f64::from(height)) as u32;
    let x1 = r.x1.ceil().clamp(0.0, f64::from(width)) as u32;
    let y1 = r.y1.ceil().clamp(0.0, f64::from(height)) as u32;
    (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
}

/// Inclusive texel index range for a source span; zero-width spans collapse to one texel.
fn texel_range(lo: f64, hi: f64, extent: i64) -> (i64, i64) {
    let max = (extent - 1).max(0);
    let first = (lo.floor() as i64).clamp(0, max);
    let last = (hi.ceil() as i64 - 1).clamp(first, max);
    (first, last)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
