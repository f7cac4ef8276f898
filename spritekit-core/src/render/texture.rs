use std::{fmt, sync::Arc};

use crate::foundation::{
    core::{Rgba8Premul, Size},
    error::{SpriteError, SpriteResult},
    math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place},
};

/// An immutable GPU-style image: premultiplied RGBA8, row-major, tightly packed.
///
/// Cloning is cheap; pixel storage is shared.
#[derive(Clone)]
pub struct Texture {
    width: u32,
    height: u32,
    data: Arc<Vec<u8>>,
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

fn expected_len(width: u32, height: u32) -> SpriteResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(4))
        .ok_or_else(|| SpriteError::validation("texture size overflow"))
}

impl Texture {
    /// Same as [`Texture::from_premul_rgba8`].
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> SpriteResult<Self> {
        Self::from_premul_rgba8(width, height, data)
    }

    /// Wrap premultiplied RGBA8 pixels.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> SpriteResult<Self> {
        let expected = expected_len(width, height)?;
        if data.len() != expected {
            return Err(SpriteError::validation(format!(
                "texture {width}x{height} expects {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data: Arc::new(data),
        })
    }

    /// Wrap straight-alpha RGBA8 pixels, premultiplying them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> SpriteResult<Self> {
        premultiply_rgba8_in_place(&mut data);
        Self::from_premul_rgba8(width, height, data)
    }

    /// A texture filled with one color.
    pub fn solid(width: u32, height: u32, px: Rgba8Premul) -> Self {
        let n = (width as usize).saturating_mul(height as usize);
        let data = px.to_array().repeat(n);
        Self {
            width,
            height,
            data: Arc::new(data),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as a float size.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Whether both handles share the same pixel storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Straight-alpha copy of the pixels, suitable for encoders.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.as_ref().clone();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/texture.rs"]
mod tests;
