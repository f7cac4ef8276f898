use crate::animation::ease::Ease;
use crate::foundation::core::Color;
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::render::surface::BlendMode;
use crate::sprite::Origin;

/// Initial state and defaults for a sprite.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpriteOpts {
    pub origin: Origin,
    pub blend: BlendMode,
    pub tint: Color,
    /// Clamped to `[0, 1]`.
    pub alpha: f64,
    /// Curve used by [`crate::Sprite::tween_opts`].
    pub default_ease: Ease,
}

impl Default for SpriteOpts {
    fn default() -> Self {
        Self {
            origin: Origin::Center,
            blend: BlendMode::Over,
            tint: Color::WHITE,
            alpha: 1.0,
            default_ease: Ease::FALLBACK,
        }
    }
}

impl SpriteOpts {
    /// Parse options from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> SpriteResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SpriteError::validation(format!("invalid sprite options: {e}")))
    }
}
