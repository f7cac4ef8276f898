use crate::foundation::{
    core::{Color, Point, Rect, Vec2},
    math::lerp_f64,
};

/// Values the timeline can interpolate.
///
/// `lerp(a, b, 0) == a` and `lerp(a, b, 1) == b`; `t` may leave `[0, 1]` for overshooting
/// curves.
pub trait Tweenable: Copy + 'static {
    /// Linear interpolation between `a` and `b`.
    fn lerp(a: Self, b: Self, t: f64) -> Self;
}

impl Tweenable for f64 {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        lerp_f64(a, b, t)
    }
}

impl Tweenable for Vec2 {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        a.lerp(b, t)
    }
}

impl Tweenable for Point {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        a.lerp(b, t)
    }
}

impl Tweenable for Color {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        let mix = |x: f32, y: f32| lerp_f64(f64::from(x), f64::from(y), t) as f32;
        Color::rgb(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
    }
}

/// Corner-wise interpolation, so degenerate rects sweep into full ones.
impl Tweenable for Rect {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        Rect::new(
            lerp_f64(a.x0, b.x0, t),
            lerp_f64(a.y0, b.y0, t),
            lerp_f64(a.x1, b.x1, t),
            lerp_f64(a.y1, b.y1, t),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
