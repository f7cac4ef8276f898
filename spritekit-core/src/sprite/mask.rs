use crate::foundation::core::{Point, Rect};

/// Sweep used by mask hide/reveal transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaskTransition {
    LeftToRight,
    RightToLeft,
    /// Collapse onto (or, when revealing, shrink back from) the center.
    ToCenter,
    /// Grow out of (or, when hiding, back into) the center.
    FromCenter,
    /// Snap without animating.
    None,
}

impl MaskTransition {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left-to-right" => Some(Self::LeftToRight),
            "right-to-left" => Some(Self::RightToLeft),
            "to-center" => Some(Self::ToCenter),
            "from-center" => Some(Self::FromCenter),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::LeftToRight => "left-to-right",
            Self::RightToLeft => "right-to-left",
            Self::ToCenter => "to-center",
            Self::FromCenter => "from-center",
            Self::None => "none",
        }
    }
}

impl std::str::FromStr for MaskTransition {
    type Err = crate::foundation::error::SpriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            crate::foundation::error::SpriteError::validation(format!(
                "unknown mask transition '{s}'"
            ))
        })
    }
}

fn left_edge(bounds: Rect) -> Rect {
    Rect::new(bounds.x0, bounds.y0, bounds.x0, bounds.y1)
}

fn right_edge(bounds: Rect) -> Rect {
    Rect::new(bounds.x1, bounds.y0, bounds.x1, bounds.y1)
}

fn center_point(bounds: Rect) -> Rect {
    Rect::from_center_size(bounds.center(), (0.0, 0.0))
}

/// `(from, to)` mask rects hiding a sprite with the given bounds.
pub(crate) fn hide_rects(transition: MaskTransition, bounds: Rect) -> (Rect, Rect) {
    match transition {
        MaskTransition::LeftToRight => (bounds, right_edge(bounds)),
        MaskTransition::RightToLeft => (bounds, left_edge(bounds)),
        MaskTransition::ToCenter | MaskTransition::FromCenter => (bounds, center_point(bounds)),
        MaskTransition::None => (bounds, Rect::from_origin_size(Point::ORIGIN, (0.0, 0.0))),
    }
}

/// `(from, to)` mask rects revealing a sprite with the given bounds.
pub(crate) fn reveal_rects(transition: MaskTransition, bounds: Rect) -> (Rect, Rect) {
    match transition {
        MaskTransition::LeftToRight => (left_edge(bounds), bounds),
        MaskTransition::RightToLeft => (right_edge(bounds), bounds),
        MaskTransition::FromCenter | MaskTransition::ToCenter => (center_point(bounds), bounds),
        MaskTransition::None => (bounds, bounds),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sprite/mask.rs"]
mod tests;
