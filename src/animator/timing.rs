use crate::animation::ease::TimingFunction;
use crate::foundation::core::{Point, Rect, Size, size_as_point};
use crate::foundation::math::Transform3D;

/// Shortest automatic duration, in seconds.
pub const MIN_AUTO_DURATION: f64 = 0.208;
/// Travel distance beyond which the automatic duration stops growing.
pub const MAX_AUTO_DISTANCE: f64 = 500.0;
/// Points of travel per second added on top of the minimum.
pub const AUTO_DISTANCE_DIVISOR: f64 = 3000.0;

/// Position, size and transform of a node at one end of its animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Center.
    pub position: Point,
    /// Bounds size.
    pub size: Size,
    /// Layer transform.
    pub transform: Transform3D,
}

impl Geometry {
    /// Center after the transform's translation.
    pub fn real_position(&self) -> Point {
        self.transform.apply_point(Point::ZERO) + self.position.to_vec2()
    }

    /// Size after the transform's linear part.
    pub fn real_size(&self) -> Size {
        self.transform.apply_size(self.size)
    }
}

/// Automatic duration for moving and resizing between two geometries.
///
/// Grows linearly with the distance travelled by the center plus the change in size, from
/// 0.208s at rest to 0.375s at 500 points and beyond.
pub fn optimized_duration(from: &Geometry, to: &Geometry) -> f64 {
    let travel = from.real_position().distance(to.real_position())
        + size_as_point(from.real_size()).distance(size_as_point(to.real_size()));
    MIN_AUTO_DURATION + travel.clamp(0.0, MAX_AUTO_DISTANCE) / AUTO_DISTANCE_DIVISOR
}

/// Timing curve for a node moving between two real positions inside `bounds`.
///
/// Leaving the bounds accelerates, entering decelerates, anything else uses the standard curve.
pub fn default_timing(from: Point, to: Point, bounds: Rect) -> TimingFunction {
    if !bounds.contains(to) {
        TimingFunction::Acceleration
    } else if !bounds.contains(from) {
        TimingFunction::Deceleration
    } else {
        TimingFunction::Standard
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animator/timing.rs"]
mod tests;
