use std::ops::{Deref, DerefMut};

use crate::foundation::core::{Affine, Color, Rect, Rgba8Premul};
use crate::render::texture::Texture;

/// How a textured quad combines with what is already on the target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Premultiplied source-over.
    #[default]
    Over,
    /// Saturating add; good for glows.
    Additive,
    /// Replace the destination.
    Copy,
}

/// Per-draw modulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    /// Multiplies color channels.
    pub tint: Color,
    /// Multiplies every channel, clamped to `[0, 1]`.
    pub alpha: f32,
    pub blend: BlendMode,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            tint: Color::WHITE,
            alpha: 1.0,
            blend: BlendMode::Over,
        }
    }
}

impl Paint {
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }
}

/// A drawable surface with a model transform, a viewport and a state stack.
///
/// The viewport is in device pixels: drawing is offset by its origin and clipped to it.
pub trait RenderTarget {
    /// Pixel dimensions.
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface, ignoring transform and viewport.
    fn clear(&mut self, color: Rgba8Premul);

    fn transform(&self) -> Affine;

    fn set_transform(&mut self, transform: Affine);

    fn viewport(&self) -> Rect;

    fn set_viewport(&mut self, viewport: Rect);

    /// Save transform and viewport.
    fn push_state(&mut self);

    /// Restore the last saved transform and viewport. Unbalanced pops are ignored.
    fn pop_state(&mut self);

    /// Draw the `src` region of `texture` (texel coordinates) into `dst` (model coordinates).
    fn draw_texture(&mut self, texture: &Texture, src: Rect, dst: Rect, paint: Paint);

    /// Post-multiply the current transform.
    fn concat_transform(&mut self, transform: Affine) {
        let current = self.transform();
        self.set_transform(current * transform);
    }
}

/// Saves render state on creation and restores it on drop.
pub struct ScopedState<'a, T: RenderTarget + ?Sized> {
    target: &'a mut T,
}

impl<'a, T: RenderTarget + ?Sized> ScopedState<'a, T> {
    pub fn new(target: &'a mut T) -> Self {
        target.push_state();
        Self { target }
    }
}

impl<T: RenderTarget + ?Sized> Deref for ScopedState<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.target
    }
}

impl<T: RenderTarget + ?Sized> DerefMut for ScopedState<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.target
    }
}

impl<T: RenderTarget + ?Sized> Drop for ScopedState<'_, T> {
    fn drop(&mut self) {
        self.target.pop_state();
    }
}
