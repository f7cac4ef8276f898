pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Straight (non-premultiplied) RGB color with `f32` channels in `[0, 1]`.
///
/// Used for sprite tints; alpha is carried separately so fades and tints animate independently.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Color {
    /// Opaque white, the identity tint.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Build a color from `f32` channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Clamp every channel into `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self::rgb(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    /// Premultiplied RGBA8 for this color at opacity `alpha`.
    pub fn to_premul_rgba8(self, alpha: f32) -> Rgba8Premul {
        let c = self.clamped();
        let to_u8 = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgba8Premul::from_straight_rgba(
            to_u8(c.r),
            to_u8(c.g),
            to_u8(c.b),
            to_u8(alpha.clamp(0.0, 1.0)),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Premultiply straight RGBA8 channels.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channels as a `[r, g, b, a]` array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Pixel size of a rect-like extent, rounded and clamped so it can back a surface.
pub(crate) fn pixel_extent(size: Size) -> (u32, u32) {
    let w = size.width.round().max(0.0) as u32;
    let h = size.height.round().max(0.0) as u32;
    (w, h)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
