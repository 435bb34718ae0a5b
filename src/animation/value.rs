use crate::foundation::core::{Point, Rgba, Size, Vec2};
use crate::foundation::math::Transform3D;

/// Animatable property of a render proxy.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum PropertyKey {
    /// Center of the proxy in container coordinates.
    Position,
    /// Bounds size.
    Size,
    /// 3D transform.
    Transform,
    /// Layer opacity.
    Opacity,
    /// Corner radius.
    CornerRadius,
    /// Background color.
    BackgroundColor,
    /// Border color.
    BorderColor,
    /// Border width.
    BorderWidth,
    /// Shadow color.
    ShadowColor,
    /// Shadow opacity.
    ShadowOpacity,
    /// Shadow blur radius.
    ShadowRadius,
    /// Shadow offset.
    ShadowOffset,
    /// Depth ordering hint.
    ZPosition,
    /// Tint overlay color.
    OverlayColor,
    /// Tint overlay opacity.
    OverlayOpacity,
}

impl PropertyKey {
    /// Keys that only exist while a shadow is displayed.
    pub fn is_shadow(self) -> bool {
        matches!(
            self,
            Self::ShadowColor | Self::ShadowOpacity | Self::ShadowRadius | Self::ShadowOffset
        )
    }

    /// Keys that live on the proxy's overlay layer rather than the proxy itself.
    pub fn is_overlay(self) -> bool {
        matches!(self, Self::OverlayColor | Self::OverlayOpacity)
    }

    /// Return `true` when spring physics may drive this key.
    pub fn allows_spring(self) -> bool {
        self != Self::CornerRadius
    }
}

/// A concrete value of one animatable property.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum AnimValue {
    /// Plain number.
    Scalar(f64),
    /// Point (positions).
    Point(Point),
    /// Size.
    Size(Size),
    /// Offset (shadow offsets).
    Offset(Vec2),
    /// Color.
    Color(Rgba),
    /// Transform.
    Transform(Transform3D),
}

impl AnimValue {
    /// Scalar payload, if any.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// Point payload, if any.
    pub fn as_point(&self) -> Option<Point> {
        match self {
            Self::Point(p) => Some(*p),
            _ => None,
        }
    }

    /// Size payload, if any.
    pub fn as_size(&self) -> Option<Size> {
        match self {
            Self::Size(s) => Some(*s),
            _ => None,
        }
    }

    /// Transform payload, if any.
    pub fn as_transform(&self) -> Option<Transform3D> {
        match self {
            Self::Transform(t) => Some(*t),
            _ => None,
        }
    }

    /// Color payload, if any.
    pub fn as_color(&self) -> Option<Rgba> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }
}

/// Linear interpolation between two values of the same type.
pub(crate) trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

pub(crate) fn mix<T: Lerp>(a: &T, b: &T, t: f64) -> T {
    T::lerp(a, b, t)
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(mix(&a.x, &b.x, t), mix(&a.y, &b.y, t))
    }
}

impl Lerp for Size {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Size::new(mix(&a.width, &b.width, t), mix(&a.height, &b.height, t))
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(mix(&a.x, &b.x, t), mix(&a.y, &b.y, t))
    }
}

impl Lerp for Rgba {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Rgba::new(
            mix(&a.r, &b.r, t),
            mix(&a.g, &b.g, t),
            mix(&a.b, &b.b, t),
            mix(&a.a, &b.a, t),
        )
    }
}

impl Lerp for Transform3D {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Transform3D::lerp(a, b, t)
    }
}

impl Lerp for AnimValue {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(mix(a, b, t)),
            (Self::Point(a), Self::Point(b)) => Self::Point(mix(a, b, t)),
            (Self::Size(a), Self::Size(b)) => Self::Size(mix(a, b, t)),
            (Self::Offset(a), Self::Offset(b)) => Self::Offset(mix(a, b, t)),
            (Self::Color(a), Self::Color(b)) => Self::Color(mix(a, b, t)),
            (Self::Transform(a), Self::Transform(b)) => Self::Transform(mix(a, b, t)),
            // Mismatched kinds cannot blend; switch over at the end.
            _ => {
                if t >= 1.0 {
                    *b
                } else {
                    *a
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
