use std::{collections::HashMap, fmt, sync::OnceLock};

/// Base curve shapes. Each is defined by its "in" form; the other directions are derived.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Curve {
    Quad,
    Cubic,
    Quart,
    Quint,
    Sine,
    Expo,
    Circ,
    Atan,
    Back,
    Bounce,
}

impl Curve {
    /// Every curve, in registry order.
    pub const ALL: [Curve; 10] = [
        Curve::Quad,
        Curve::Cubic,
        Curve::Quart,
        Curve::Quint,
        Curve::Sine,
        Curve::Expo,
        Curve::Circ,
        Curve::Atan,
        Curve::Back,
        Curve::Bounce,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Quad => "quad",
            Self::Cubic => "cubic",
            Self::Quart => "quart",
            Self::Quint => "quint",
            Self::Sine => "sine",
            Self::Expo => "expo",
            Self::Circ => "circ",
            Self::Atan => "atan",
            Self::Back => "back",
            Self::Bounce => "bounce",
        }
    }

    fn ease_in(self, t: f64) -> f64 {
        match self {
            Self::Quad => t * t,
            Self::Cubic => t * t * t,
            Self::Quart => t.powi(4),
            Self::Quint => t.powi(5),
            Self::Sine => 1.0 - (t * std::f64::consts::FRAC_PI_2).cos(),
            Self::Expo => {
                if t <= 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * (t - 1.0))
                }
            }
            Self::Circ => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            Self::Atan => {
                const A: f64 = 15.0;
                ((t - 1.0) * A).atan() / A.atan() + 1.0
            }
            Self::Back => {
                const S: f64 = 1.701_58;
                t * t * ((S + 1.0) * t - S)
            }
            Self::Bounce => 1.0 - bounce_out(1.0 - t),
        }
    }
}

fn bounce_out(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984_375
    }
}

/// Easing curve applied to normalized tween progress.
///
/// Names follow the `ease-<dir>-<curve>` convention (`ease-in-out-quad`, `ease-out-in-bounce`,
/// `ease-none`); see [`Ease::from_name`]. Unknown names resolve to [`Ease::FALLBACK`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Ease {
    /// Identity curve (`ease-none`).
    Linear,
    /// Slow start.
    In(Curve),
    /// Slow end.
    Out(Curve),
    /// Slow start and end.
    InOut(Curve),
    /// Fast start and end, slow middle.
    OutIn(Curve),
}

impl Default for Ease {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl Ease {
    /// Curve used for unknown names and as the default transition ease.
    pub const FALLBACK: Ease = Ease::InOut(Curve::Quad);

    /// Map normalized time `t` (clamped to `[0, 1]`) to eased progress.
    ///
    /// Endpoints are exact: `apply(0) == 0` and `apply(1) == 1`. `Back` curves overshoot in
    /// between.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self {
            Self::Linear => t,
            Self::In(c) => c.ease_in(t),
            Self::Out(c) => 1.0 - c.ease_in(1.0 - t),
            Self::InOut(c) => in_out(c, t),
            Self::OutIn(c) => {
                if t < 0.5 {
                    0.5 * (1.0 - c.ease_in(1.0 - 2.0 * t))
                } else {
                    0.5 + 0.5 * c.ease_in(2.0 * t - 1.0)
                }
            }
        }
    }

    /// Look up a curve by name in the process-wide registry.
    ///
    /// Never panics: unknown names log at debug level and return [`Ease::FALLBACK`].
    pub fn from_name(name: &str) -> Ease {
        match registry().get(name.trim()) {
            Some(&ease) => ease,
            None => {
                tracing::debug!(name, "unknown easing name, using fallback");
                Self::FALLBACK
            }
        }
    }

    /// Strict lookup; `None` for unknown names.
    pub fn lookup(name: &str) -> Option<Ease> {
        registry().get(name.trim()).copied()
    }

    /// Canonical registry name.
    pub fn name(self) -> String {
        match self {
            Self::Linear => "ease-none".to_owned(),
            Self::In(c) => format!("ease-in-{}", c.name()),
            Self::Out(c) => format!("ease-out-{}", c.name()),
            Self::InOut(c) => format!("ease-in-out-{}", c.name()),
            Self::OutIn(c) => format!("ease-out-in-{}", c.name()),
        }
    }
}

fn in_out(c: Curve, t: f64) -> f64 {
    if t < 0.5 {
        0.5 * c.ease_in(2.0 * t)
    } else {
        1.0 - 0.5 * c.ease_in(2.0 - 2.0 * t)
    }
}

fn registry() -> &'static HashMap<String, Ease> {
    static REGISTRY: OnceLock<HashMap<String, Ease>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map = HashMap::new();
        map.insert("ease-none".to_owned(), Ease::Linear);
        map.insert("linear".to_owned(), Ease::Linear);
        for c in Curve::ALL {
            for ease in [Ease::In(c), Ease::Out(c), Ease::InOut(c), Ease::OutIn(c)] {
                map.insert(ease.name(), ease);
            }
        }
        map
    })
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<String> for Ease {
    fn from(name: String) -> Self {
        Ease::from_name(&name)
    }
}

impl From<Ease> for String {
    fn from(ease: Ease) -> Self {
        ease.name()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
