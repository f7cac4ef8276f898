//! Texture providers: the sources a sprite pulls pixels from.

pub(crate) mod graphics;
pub(crate) mod image;
pub(crate) mod video;

use std::fmt;

use crate::foundation::core::Size;
use crate::foundation::signal::Signal;
use crate::render::texture::Texture;

/// Size reported by a provider with nothing loaded.
pub const FALLBACK_SIZE: Size = Size::new(1.0, 1.0);

/// Provider variant selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Image,
    Graphics,
    Video,
    /// No provider at all.
    #[default]
    None,
}

/// State every provider variant shares.
#[derive(Debug, Default)]
pub struct ProviderCore {
    source: Option<String>,
    texture: Option<Texture>,
    is_new: bool,
    texture_changed: Signal,
    media_complete: Signal,
}

impl ProviderCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn set_source(&mut self, source: Option<String>) {
        self.source = source;
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    /// Replace the current texture, raise the new-texture flag and notify subscribers.
    pub fn publish(&mut self, texture: Texture) {
        self.texture = Some(texture);
        self.is_new = true;
        self.texture_changed.emit();
    }

    /// Drop the current texture without notifying.
    pub fn reset(&mut self) {
        self.texture = None;
        self.is_new = false;
    }

    pub fn emit_media_complete(&mut self) {
        self.media_complete.emit();
    }
}

/// A source of textures for a sprite.
///
/// Implementors own a [`ProviderCore`]; everything but loading and per-frame work has a
/// provided implementation on top of it.
pub trait TextureProvider {
    fn kind(&self) -> ProviderKind;

    fn core(&self) -> &ProviderCore;

    fn core_mut(&mut self) -> &mut ProviderCore;

    /// Point the provider at new media. Failures are logged and leave it not ready.
    fn set_source(&mut self, source: &str);

    /// Per-frame work. A no-op when no source is set.
    fn update(&mut self);

    /// Whether a texture can be pulled.
    fn is_ready(&self) -> bool {
        self.core().texture.is_some()
    }

    /// Pixel size of the media, or [`FALLBACK_SIZE`] when nothing is loaded.
    fn size(&self) -> Size {
        self.core()
            .texture
            .as_ref()
            .filter(|t| !t.is_empty())
            .map_or(FALLBACK_SIZE, Texture::size)
    }

    fn source(&self) -> Option<&str> {
        self.core().source()
    }

    /// Whether the texture changed since the last [`TextureProvider::take_texture`].
    fn has_new_texture(&self) -> bool {
        self.core().is_new
    }

    /// Current texture; clears the new-texture flag.
    fn take_texture(&mut self) -> Option<Texture> {
        let core = self.core_mut();
        core.is_new = false;
        core.texture.clone()
    }

    /// Emitted after every texture replacement.
    fn texture_changed(&mut self) -> &mut Signal {
        &mut self.core_mut().texture_changed
    }

    /// Emitted once when time-based media reaches its natural end.
    fn media_complete(&mut self) -> &mut Signal {
        &mut self.core_mut().media_complete
    }

    fn start_media(&mut self, _looping: bool) {}

    fn stop_media(&mut self) {}
}

impl fmt::Debug for dyn TextureProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureProvider")
            .field("kind", &self.kind())
            .field("source", &self.source())
            .field("ready", &self.is_ready())
            .finish()
    }
}

/// Default provider for `kind`: an empty image provider, a 1x1 graphics canvas, or a video
/// provider with no decoder backend. `None` yields no provider.
pub fn create_provider(kind: ProviderKind) -> Option<Box<dyn TextureProvider>> {
    match kind {
        ProviderKind::Image => Some(Box::new(image::ImageProvider::new())),
        ProviderKind::Graphics => {
            Some(Box::new(graphics::GraphicsProvider::with_fallback_size()))
        }
        ProviderKind::Video => Some(Box::new(video::VideoProvider::new())),
        ProviderKind::None => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/provider/core.rs"]
mod tests;
