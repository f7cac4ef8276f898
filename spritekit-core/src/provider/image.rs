use std::path::{Path, PathBuf};

use crate::assets::decode::{load_image, resolve_source};
use crate::provider::{ProviderCore, ProviderKind, TextureProvider};
use crate::render::texture::Texture;

/// Still image provider. Decoding happens synchronously in [`TextureProvider::set_source`].
#[derive(Debug, Default)]
pub struct ImageProvider {
    core: ProviderCore,
    assets_root: Option<PathBuf>,
}

impl ImageProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that resolves sources as relative paths under `root`.
    pub fn with_assets_root(root: impl Into<PathBuf>) -> Self {
        Self {
            core: ProviderCore::new(),
            assets_root: Some(root.into()),
        }
    }

    /// Load `path` right away.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let mut provider = Self::new();
        provider.set_source(&path.as_ref().to_string_lossy());
        provider
    }

    /// Publish an already decoded texture.
    pub fn from_texture(texture: Texture) -> Self {
        let mut provider = Self::new();
        provider.core.publish(texture);
        provider
    }

    pub fn assets_root(&self) -> Option<&Path> {
        self.assets_root.as_deref()
    }
}

impl TextureProvider for ImageProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Image
    }

    fn core(&self) -> &ProviderCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ProviderCore {
        &mut self.core
    }

    /// Load `source`. On failure the previous texture and source stay in place.
    fn set_source(&mut self, source: &str) {
        let loaded = resolve_source(self.assets_root.as_deref(), source)
            .and_then(|path| load_image(&path));
        match loaded {
            Ok(texture) => {
                tracing::debug!(
                    source,
                    width = texture.width(),
                    height = texture.height(),
                    "image loaded"
                );
                self.core.set_source(Some(source.to_owned()));
                self.core.publish(texture);
            }
            Err(err) => {
                tracing::warn!(source, error = %err, "image provider failed to load source");
            }
        }
    }

    fn update(&mut self) {}
}

#[cfg(test)]
#[path = "../../tests/unit/provider/image.rs"]
mod tests;
