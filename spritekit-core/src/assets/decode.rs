use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{SpriteError, SpriteResult};
use crate::render::texture::Texture;

/// Decode encoded image bytes into a premultiplied texture.
pub fn decode_image(bytes: &[u8]) -> SpriteResult<Texture> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    texture_from_image(dyn_img)
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> SpriteResult<Texture> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let dyn_img = image::load_from_memory(&bytes)
        .with_context(|| format!("decode image '{}'", path.display()))?;
    texture_from_image(dyn_img)
}

pub(crate) fn texture_from_image(img: image::DynamicImage) -> SpriteResult<Texture> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(SpriteError::decode("image has no pixels"));
    }
    Texture::from_straight_rgba8(width, height, rgba.into_raw())
}

/// Resolve a provider source string to a file path.
///
/// Without a root the source is used as given. With a root it must be a clean relative path
/// (no `..`, not absolute), joined onto the root.
pub(crate) fn resolve_source(root: Option<&Path>, source: &str) -> SpriteResult<PathBuf> {
    match root {
        None => {
            if source.trim().is_empty() {
                return Err(SpriteError::validation("image source must be non-empty"));
            }
            Ok(PathBuf::from(source))
        }
        Some(root) => Ok(root.join(normalize_rel_path(source)?)),
    }
}

pub(crate) fn normalize_rel_path(source: &str) -> SpriteResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(SpriteError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(SpriteError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(SpriteError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(SpriteError::validation("asset path must contain a file name"));
    }
    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
