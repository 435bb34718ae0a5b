use kurbo::{ParamCurve, QuadBez};

use crate::animation::ease::TimingFunction;
use crate::animation::spring::Spring;
use crate::animation::value::{AnimValue, PropertyKey, mix};
use crate::foundation::core::Point;

/// Progress curve of one interpolation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Curve {
    /// Cubic-bezier timing over an explicit duration.
    Timing(TimingFunction),
    /// Spring physics; the duration is the spring's settling time.
    Spring(Spring),
}

impl Curve {
    /// Map normalized time to progress.
    pub fn apply(&self, u: f64) -> f64 {
        match self {
            Self::Timing(tf) => tf.apply(u),
            Self::Spring(s) => s.apply(u),
        }
    }
}

/// One scheduled property interpolation on a render proxy.
///
/// Times are absolute on the session clock. A paused interpolation ignores the clock and holds
/// at `paused_at` seconds of local time. A reversed one walks its local time back toward zero, so
/// it retraces the same curve from `to` to `from`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Interpolation {
    /// Animated property.
    pub key: PropertyKey,
    /// Start value.
    pub from: AnimValue,
    /// End value.
    pub to: AnimValue,
    /// Progress curve.
    pub curve: Curve,
    /// Quadratic control point for arced position paths.
    pub arc_control: Option<Point>,
    /// Clock time at which local time is zero.
    pub begin_time: f64,
    /// Active duration in seconds.
    pub duration: f64,
    /// Local time when paused.
    pub paused_at: Option<f64>,
    /// Local time runs backward from `begin_time`.
    #[serde(default)]
    pub reversed: bool,
}

impl Interpolation {
    /// Local time at `now`: the paused offset, else the distance from `begin_time`.
    pub fn local_time(&self, now: f64) -> f64 {
        match self.paused_at {
            Some(offset) => offset,
            None if self.reversed => self.begin_time - now,
            None => now - self.begin_time,
        }
    }

    /// Normalized time in `[0, 1]`.
    pub fn progress(&self, now: f64) -> f64 {
        let local = self.local_time(now);
        if self.duration <= 0.0 {
            return if local >= 0.0 { 1.0 } else { 0.0 };
        }
        (local / self.duration).clamp(0.0, 1.0)
    }

    /// Value of the property at clock time `now`.
    ///
    /// Before the interpolation begins it reports `from`; after it ends it holds `to`.
    pub fn value_at(&self, now: f64) -> AnimValue {
        let t = self.curve.apply(self.progress(now));
        if let (Some(ctrl), AnimValue::Point(a), AnimValue::Point(b)) =
            (self.arc_control, self.from, self.to)
        {
            return AnimValue::Point(QuadBez::new(a, ctrl, b).eval(t));
        }
        mix(&self.from, &self.to, t)
    }

    /// Clock time at which the interpolation settles: on `to`, or on `from` when reversed.
    pub fn end_time(&self) -> f64 {
        if self.reversed {
            self.begin_time
        } else {
            self.begin_time + self.duration
        }
    }

    /// Return `true` when the interpolation has reached its end value.
    pub fn is_finished(&self, now: f64) -> bool {
        self.paused_at.is_none() && now >= self.end_time()
    }

    /// Freeze at `offset` seconds of local time.
    pub fn pause_at(&mut self, offset: f64) {
        self.paused_at = Some(offset);
    }

    /// Play again from `offset` seconds of local time at clock time `now`.
    pub fn resume_at(&mut self, now: f64, offset: f64, reverse: bool) {
        self.paused_at = None;
        self.reversed = reverse;
        self.begin_time = if reverse { now + offset } else { now - offset };
    }
}

/// Control point for an arced path from `from` to `to`.
///
/// Returns `None` when the motion is too close to axis-aligned to arc (either axis moves less
/// than one unit). Intensity `1` bends fully toward the elbow corner, `-1` away from it and `0`
/// yields the straight midpoint.
pub fn arc_control_point(from: Point, to: Point, intensity: f64) -> Option<Point> {
    if (from.x - to.x).abs() < 1.0 || (from.y - to.y).abs() < 1.0 {
        return None;
    }
    let max_control = if from.y > to.y {
        Point::new(to.x, from.y)
    } else {
        Point::new(from.x, to.y)
    };
    let min_control = from + (to - from) / 2.0;
    Some(min_control + (max_control - min_control) * intensity)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/track.rs"]
mod tests;
