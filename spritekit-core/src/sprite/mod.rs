pub(crate) mod mask;
pub(crate) mod opts;
pub(crate) mod zoom;

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::animation::{
    anim::Anim,
    ease::Ease,
    timeline::{Timeline, TweenHandle, TweenOpts},
};
use crate::foundation::core::{Affine, Color, Point, Rect, Size, Vec2};
use crate::foundation::signal::SubscriptionId;
use crate::provider::{ProviderKind, TextureProvider, create_provider};
use crate::render::surface::{BlendMode, Paint, RenderTarget, ScopedState};
use crate::render::texture::Texture;
use crate::sprite::mask::{MaskTransition, hide_rects, reveal_rects};
use crate::sprite::opts::SpriteOpts;
use crate::sprite::zoom::ZoomPass;

/// Point of the sprite that sits at its coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    TopLeft,
    #[default]
    Center,
}

/// A positioned, transformable, maskable view of a texture provider.
///
/// Call [`Sprite::update`] once per frame before [`Sprite::draw`]. Transitions take `&self` so
/// completion callbacks holding an `Rc<Sprite>` can chain further transitions.
pub struct Sprite {
    provider: Option<Box<dyn TextureProvider>>,
    subscription: Option<SubscriptionId>,
    texture_changed: Rc<Cell<bool>>,

    origin: Origin,
    blend: BlendMode,
    default_ease: Ease,
    bounds: Rect,

    coordinates: Anim<Point>,
    scale: Anim<Vec2>,
    tint: Anim<Color>,
    alpha: Anim<f64>,
    mask: Anim<Rect>,
    zoom: Anim<f64>,
    pass: Rc<RefCell<ZoomPass>>,
}

impl std::fmt::Debug for Sprite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sprite")
            .field("provider", &self.provider.as_ref().map(|p| p.kind()))
            .field("origin", &self.origin)
            .field("bounds", &self.bounds)
            .field("coordinates", &self.coordinates)
            .field("scale", &self.scale)
            .field("alpha", &self.alpha)
            .field("mask", &self.mask)
            .field("zoom", &self.zoom)
            .finish()
    }
}

impl Sprite {
    /// Sprite showing `provider`.
    pub fn new(provider: Box<dyn TextureProvider>) -> Self {
        Self::with_opts(Some(provider), SpriteOpts::default())
    }

    /// Sprite with a default provider of `kind`.
    pub fn with_kind(kind: ProviderKind) -> Self {
        Self::with_opts(create_provider(kind), SpriteOpts::default())
    }

    /// Sprite with no provider; it draws nothing until one is set.
    pub fn empty() -> Self {
        Self::with_opts(None, SpriteOpts::default())
    }

    pub fn with_opts(provider: Option<Box<dyn TextureProvider>>, opts: SpriteOpts) -> Self {
        let mut sprite = Self {
            provider: None,
            subscription: None,
            texture_changed: Rc::new(Cell::new(false)),
            origin: opts.origin,
            blend: opts.blend,
            default_ease: opts.default_ease,
            bounds: Rect::ZERO,
            coordinates: Anim::new(Point::ORIGIN),
            scale: Anim::new(Vec2::new(1.0, 1.0)),
            tint: Anim::new(opts.tint),
            alpha: Anim::new(opts.alpha.clamp(0.0, 1.0)),
            mask: Anim::new(Rect::ZERO),
            zoom: Anim::new(0.0),
            pass: Rc::new(RefCell::new(ZoomPass::default())),
        };
        sprite.set_provider(provider);
        sprite
    }

    // ---- provider ----

    /// Swap the provider, returning the previous one.
    ///
    /// A ready replacement is pulled right away so the next draw is not blank. Setting `None`
    /// drops the current output, so the sprite draws nothing until a provider is set again.
    pub fn set_provider(
        &mut self,
        provider: Option<Box<dyn TextureProvider>>,
    ) -> Option<Box<dyn TextureProvider>> {
        let mut previous = std::mem::replace(&mut self.provider, provider);
        if let (Some(old), Some(id)) = (previous.as_mut(), self.subscription.take()) {
            old.texture_changed().unsubscribe(id);
        }
        self.texture_changed.set(false);

        if self.provider.is_none() {
            self.pass.borrow_mut().clear_textures();
        }
        if let Some(p) = self.provider.as_mut() {
            let flag = self.texture_changed.clone();
            self.subscription = Some(p.texture_changed().subscribe(move || flag.set(true)));
            tracing::debug!(kind = ?p.kind(), source = ?p.source(), "sprite provider set");
            if p.is_ready() {
                self.pull_texture();
                self.pass.borrow_mut().compose();
            }
        }
        previous
    }

    /// Detach and return the provider. The sprite stops drawing its pixels.
    pub fn take_provider(&mut self) -> Option<Box<dyn TextureProvider>> {
        self.set_provider(None)
    }

    pub fn provider(&self) -> Option<&dyn TextureProvider> {
        self.provider.as_deref()
    }

    pub fn provider_mut(&mut self) -> Option<&mut (dyn TextureProvider + 'static)> {
        self.provider.as_deref_mut()
    }

    /// Forward a source to the provider.
    pub fn set_source(&mut self, source: &str) {
        match self.provider.as_mut() {
            Some(p) => p.set_source(source),
            None => tracing::warn!(source, "Sprite::set_source without a provider"),
        }
    }

    pub fn start_media(&mut self, looping: bool) {
        match self.provider.as_mut() {
            Some(p) => p.start_media(looping),
            None => tracing::warn!("Sprite::start_media without a provider"),
        }
    }

    pub fn stop_media(&mut self) {
        match self.provider.as_mut() {
            Some(p) => p.stop_media(),
            None => tracing::warn!("Sprite::stop_media without a provider"),
        }
    }

    /// Run `f` whenever the provider's media ends naturally.
    ///
    /// `f` runs from inside [`Sprite::update`], so it must not borrow the sprite itself. Use
    /// [`Sprite::on_media_complete_transition`] to react with a fade.
    pub fn on_media_complete(&mut self, f: impl FnMut() + 'static) -> Option<SubscriptionId> {
        match self.provider.as_mut() {
            Some(p) => Some(p.media_complete().subscribe(f)),
            None => {
                tracing::warn!("Sprite::on_media_complete without a provider");
                None
            }
        }
    }

    /// Fade alpha to `target_alpha` on `timeline` whenever the provider's media ends naturally.
    pub fn on_media_complete_transition(
        &mut self,
        timeline: &Timeline,
        target_alpha: f64,
        opts: TweenOpts,
    ) -> Option<SubscriptionId> {
        let alpha = self.alpha.downgrade();
        let timeline = timeline.clone();
        let target = target_alpha.clamp(0.0, 1.0);
        self.on_media_complete(move || {
            if let Some(alpha) = Anim::upgrade(&alpha) {
                timeline.schedule(&alpha, None, target, opts);
            }
        })
    }

    // ---- frame ----

    /// Per-frame update: advance the provider, adopt a new texture and refresh the zoom pass.
    pub fn update(&mut self) {
        let Some(provider) = self.provider.as_mut() else {
            return;
        };
        provider.update();
        if self.texture_changed.replace(false) || provider.has_new_texture() {
            self.pull_texture();
        }
        self.pass.borrow_mut().compose();
    }

    fn pull_texture(&mut self) {
        let Some(texture) = self.provider.as_mut().and_then(|p| p.take_texture()) else {
            return;
        };
        if texture.is_empty() {
            tracing::warn!("provider published an empty texture; ignoring");
            return;
        }

        let size = texture.size();
        let mut pass = self.pass.borrow_mut();
        if pass.texture_size() != size {
            self.bounds = Rect::from_origin_size(Point::ORIGIN, size);
            self.mask.set(self.bounds);
            pass.reset_geometry(size, self.zoom());
            tracing::debug!(
                width = size.width,
                height = size.height,
                "sprite geometry re-derived"
            );
        }
        pass.set_input(texture);
    }

    /// Composite the current output onto `target`. A no-op when invisible or before the first
    /// texture arrives.
    pub fn draw<T: RenderTarget + ?Sized>(&self, target: &mut T) {
        let alpha = self.alpha();
        if alpha <= 0.0 {
            return;
        }
        let pass = self.pass.borrow();
        let Some(output) = pass.output() else {
            return;
        };

        let mut scoped = ScopedState::new(target);
        scoped.concat_transform(self.local_transform());
        let mask = self.mask.get();
        let paint = Paint {
            tint: self.tint.get(),
            alpha: alpha as f32,
            blend: self.blend,
        };
        scoped.draw_texture(output, mask, mask, paint);
    }

    /// Sprite-local to parent transform.
    pub fn local_transform(&self) -> Affine {
        let s = self.scale.get();
        let mut t = Affine::translate(self.coordinates.get().to_vec2())
            * Affine::scale_non_uniform(s.x, s.y);
        if self.origin == Origin::Center {
            t *= Affine::translate(-(self.bounds.size().to_vec2() * 0.5));
        }
        t
    }

    /// Whether `point` (parent coordinates) falls inside the sprite's bounds.
    pub fn contains_point(&self, point: Point) -> bool {
        let t = self.local_transform();
        if t.determinant().abs() < 1e-12 {
            return false;
        }
        let local = t.inverse() * point;
        local.x >= self.bounds.x0
            && local.x <= self.bounds.x1
            && local.y >= self.bounds.y0
            && local.y <= self.bounds.y1
    }

    // ---- transitions ----

    /// Options for a `duration`-second transition using this sprite's default curve.
    pub fn tween_opts(&self, duration: f64) -> TweenOpts {
        TweenOpts::new(duration).ease(self.default_ease)
    }

    pub fn alpha_to(&self, timeline: &Timeline, target: f64, opts: TweenOpts) -> TweenHandle {
        timeline.schedule(&self.alpha, None, target.clamp(0.0, 1.0), opts)
    }

    pub fn move_to(&self, timeline: &Timeline, target: Point, opts: TweenOpts) -> TweenHandle {
        timeline.schedule(&self.coordinates, None, target, opts)
    }

    pub fn scale_to(&self, timeline: &Timeline, target: Vec2, opts: TweenOpts) -> TweenHandle {
        timeline.schedule(&self.scale, None, target, opts)
    }

    pub fn tint_to(&self, timeline: &Timeline, target: Color, opts: TweenOpts) -> TweenHandle {
        timeline.schedule(&self.tint, None, target, opts)
    }

    /// Animate the zoom; the zoom pass is recomposed on every step.
    pub fn zoom_to(&self, timeline: &Timeline, target: f64, opts: TweenOpts) -> TweenHandle {
        let target = target.clamp(0.0, 1.0);
        if opts.is_instant() {
            self.zoom.set(target);
            self.refresh_zoom();
            return TweenHandle::inert();
        }

        let pass = Rc::downgrade(&self.pass);
        let zoom = self.zoom.downgrade();
        timeline
            .schedule(&self.zoom, None, target, opts)
            .on_update(move || {
                let (Some(pass), Some(zoom)) = (pass.upgrade(), zoom.upgrade()) else {
                    return;
                };
                let Ok(mut pass) = pass.try_borrow_mut() else {
                    return;
                };
                pass.recompute(zoom.value.get().clamp(0.0, 1.0));
                pass.compose();
            })
    }

    pub fn mask_hide(
        &self,
        timeline: &Timeline,
        transition: MaskTransition,
        opts: TweenOpts,
    ) -> TweenHandle {
        let (from, to) = hide_rects(transition, self.bounds);
        self.animate_mask(timeline, transition, from, to, opts)
    }

    pub fn mask_reveal(
        &self,
        timeline: &Timeline,
        transition: MaskTransition,
        opts: TweenOpts,
    ) -> TweenHandle {
        let (from, to) = reveal_rects(transition, self.bounds);
        self.animate_mask(timeline, transition, from, to, opts)
    }

    fn animate_mask(
        &self,
        timeline: &Timeline,
        transition: MaskTransition,
        from: Rect,
        to: Rect,
        opts: TweenOpts,
    ) -> TweenHandle {
        let opts = match transition {
            MaskTransition::None => TweenOpts { duration: 0.0, ..opts },
            _ => opts,
        };
        timeline.schedule(&self.mask, Some(from), to, opts)
    }

    fn refresh_zoom(&self) {
        let mut pass = self.pass.borrow_mut();
        pass.recompute(self.zoom());
        pass.compose();
    }

    // ---- instant setters ----

    pub fn set_alpha(&self, alpha: f64) {
        self.alpha.set(alpha.clamp(0.0, 1.0));
    }

    pub fn set_coordinates(&self, coordinates: Point) {
        self.coordinates.set(coordinates);
    }

    /// Per-axis scale; negative factors clamp to zero.
    pub fn set_scale(&self, scale: Vec2) {
        self.scale.set(Vec2::new(scale.x.max(0.0), scale.y.max(0.0)));
    }

    pub fn set_uniform_scale(&self, scale: f64) {
        self.set_scale(Vec2::new(scale, scale));
    }

    pub fn set_tint(&self, tint: Color) {
        self.tint.set(tint);
    }

    pub fn set_zoom(&self, zoom: f64) {
        self.zoom.set(zoom.clamp(0.0, 1.0));
        self.refresh_zoom();
    }

    /// Point of the texture the zoom closes in on, in texels.
    pub fn set_zoom_center(&self, center: Point) {
        let mut pass = self.pass.borrow_mut();
        pass.set_zoom_center(center, self.zoom());
        pass.compose();
    }

    pub fn set_origin(&mut self, origin: Origin) {
        self.origin = origin;
    }

    pub fn set_blend_mode(&mut self, blend: BlendMode) {
        self.blend = blend;
    }

    // ---- getters ----

    pub fn alpha(&self) -> f64 {
        self.alpha.get().clamp(0.0, 1.0)
    }

    pub fn coordinates(&self) -> Point {
        self.coordinates.get()
    }

    pub fn scale(&self) -> Vec2 {
        self.scale.get()
    }

    pub fn tint(&self) -> Color {
        self.tint.get()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom.get().clamp(0.0, 1.0)
    }

    pub fn zoom_center(&self) -> Point {
        self.pass.borrow().zoom_center()
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    /// `(0, 0)` to the texture size.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn mask(&self) -> Rect {
        self.mask.get()
    }

    pub fn texture_size(&self) -> Size {
        self.pass.borrow().texture_size()
    }

    /// Region of the input texture the zoom pass samples.
    pub fn sample_rect(&self) -> Rect {
        self.pass.borrow().sample_rect()
    }

    pub fn input_texture(&self) -> Option<Texture> {
        self.pass.borrow().input().cloned()
    }

    /// What [`Sprite::draw`] composites; `None` until the first texture arrives.
    pub fn output_texture(&self) -> Option<Texture> {
        self.pass.borrow().output().cloned()
    }

    /// Whether any property is being tweened.
    pub fn is_animating(&self) -> bool {
        self.alpha.is_animating()
            || self.coordinates.is_animating()
            || self.scale.is_animating()
            || self.tint.is_animating()
            || self.mask.is_animating()
            || self.zoom.is_animating()
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sprite/sprite.rs"]
mod tests;
