//! spritekit is a frame-driven sprite compositing library.
//!
//! A [`Sprite`] wraps a [`TextureProvider`] (a still image, procedurally drawn graphics, or
//! decoded video), owns a set of animatable properties, and composites its output onto any
//! [`RenderTarget`]. Transitions are tweens scheduled on a shared [`Timeline`].
//!
//! # Frame loop
//!
//! 1. **Step**: `timeline.step(dt)` advances every tween and runs completion callbacks
//! 2. **Update**: `sprite.update()` polls the provider and refreshes the zoom/crop pass
//! 3. **Draw**: `sprite.draw(&mut target)` composites with transform, mask, tint and alpha
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded core**: sprites, providers and timelines are `Rc`-based and never block.
//!   Decoding on other threads feeds in through [`ChannelDecoder`].
//! - **Premultiplied RGBA8** end-to-end.
//! - **Frame-loop operations never fail**: problems are logged with `tracing` and absorbed.
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod foundation;
mod provider;
mod render;
mod sprite;

/// Fit-to-bounds crop/scale geometry.
pub mod resize;

pub use animation::anim::Anim;
pub use animation::ease::{Curve, Ease};
pub use animation::timeline::{Timeline, TweenHandle, TweenId, TweenOpts};
pub use animation::tween::Tweenable;
pub use assets::decode::{decode_image, load_image};
pub use foundation::core::{Affine, Color, Point, Rect, Rgba8Premul, Size, Vec2};
pub use foundation::error::{SpriteError, SpriteResult};
pub use foundation::signal::{Signal, SubscriptionId};
pub use provider::graphics::{GraphicsPainter, GraphicsProvider};
pub use provider::image::ImageProvider;
pub use provider::video::{
    ChannelDecoder, DecoderFeed, DecoderOpener, MediaDecoder, MediaEvent, VideoProvider,
};
pub use provider::{FALLBACK_SIZE, ProviderCore, ProviderKind, TextureProvider, create_provider};
pub use render::cpu::CpuSurface;
pub use render::surface::{BlendMode, Paint, RenderTarget, ScopedState};
pub use render::texture::Texture;
pub use resize::{Fit, ResizeOptions, ResizePlan, ResizeResult};
pub use sprite::mask::MaskTransition;
pub use sprite::opts::SpriteOpts;
pub use sprite::zoom::sample_rect;
pub use sprite::{Origin, Sprite};
