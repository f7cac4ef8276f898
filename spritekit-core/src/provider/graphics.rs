use crate::foundation::core::{Color, Rgba8Premul, Size};
use crate::foundation::error::SpriteResult;
use crate::provider::{ProviderCore, ProviderKind, TextureProvider};
use crate::render::cpu::CpuSurface;
use crate::render::surface::{RenderTarget, ScopedState};

/// Draws a graphics provider's content each frame.
pub trait GraphicsPainter {
    fn paint(&mut self, surface: &mut CpuSurface);
}

impl<F: FnMut(&mut CpuSurface)> GraphicsPainter for F {
    fn paint(&mut self, surface: &mut CpuSurface) {
        self(surface)
    }
}

/// Procedurally drawn texture: an offscreen surface repainted and republished every update.
pub struct GraphicsProvider {
    core: ProviderCore,
    surface: CpuSurface,
    background: Rgba8Premul,
    painter: Option<Box<dyn GraphicsPainter>>,
}

impl std::fmt::Debug for GraphicsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphicsProvider")
            .field("surface", &self.surface)
            .field("background", &self.background)
            .field("has_painter", &self.painter.is_some())
            .finish()
    }
}

impl GraphicsProvider {
    /// Canvas of `width` x `height` pixels with a transparent background and no painter.
    pub fn new(width: u32, height: u32) -> SpriteResult<Self> {
        let surface = CpuSurface::new(width, height)?;
        let mut provider = Self {
            core: ProviderCore::new(),
            surface,
            background: Rgba8Premul::transparent(),
            painter: None,
        };
        provider.render();
        Ok(provider)
    }

    /// Canvas with a painter installed.
    pub fn with_painter(
        width: u32,
        height: u32,
        painter: impl GraphicsPainter + 'static,
    ) -> SpriteResult<Self> {
        let mut provider = Self::new(width, height)?;
        provider.set_painter(painter);
        Ok(provider)
    }

    pub(crate) fn with_fallback_size() -> Self {
        let mut provider = Self {
            core: ProviderCore::new(),
            surface: CpuSurface::unit(),
            background: Rgba8Premul::transparent(),
            painter: None,
        };
        provider.render();
        provider
    }

    pub fn set_painter(&mut self, painter: impl GraphicsPainter + 'static) {
        self.painter = Some(Box::new(painter));
        self.render();
    }

    /// Color the surface is cleared to before every paint.
    pub fn set_background(&mut self, color: Color, alpha: f32) {
        self.background = color.to_premul_rgba8(alpha);
        self.render();
    }

    pub fn surface(&self) -> &CpuSurface {
        &self.surface
    }

    fn render(&mut self) {
        self.surface.clear(self.background);
        if let Some(painter) = self.painter.as_mut() {
            let mut scoped = ScopedState::new(&mut self.surface);
            painter.paint(&mut scoped);
        }
        self.core.publish(self.surface.to_texture());
    }
}

impl TextureProvider for GraphicsProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Graphics
    }

    fn core(&self) -> &ProviderCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ProviderCore {
        &mut self.core
    }

    fn set_source(&mut self, source: &str) {
        tracing::debug!(source, "graphics provider ignores sources");
    }

    fn update(&mut self) {
        self.render();
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn size(&self) -> Size {
        Size::new(f64::from(self.surface.width()), f64::from(self.surface.height()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/provider/graphics.rs"]
mod tests;
