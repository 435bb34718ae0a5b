/// Timing curve that maps normalized animation time to normalized progress.
///
/// Named curves are shorthands for cubic-bezier control points.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TimingFunction {
    /// Linear interpolation.
    Linear,
    /// Ease-in (0.42, 0, 1, 1).
    EaseIn,
    /// Ease-out (0, 0, 0.58, 1).
    EaseOut,
    /// Ease-in/out (0.42, 0, 0.58, 1).
    EaseInOut,
    /// Standard curve (0.4, 0, 0.2, 1).
    #[default]
    Standard,
    /// Decelerating curve for content entering the container (0, 0, 0.2, 1).
    Deceleration,
    /// Accelerating curve for content leaving the container (0.4, 0, 1, 1).
    Acceleration,
    /// Sharp curve (0.4, 0, 0.6, 1).
    Sharp,
    /// Overshooting ease-out (0.175, 0.885, 0.32, 1.275).
    EaseOutBack,
    /// Arbitrary cubic bezier with `P0 = (0,0)` and `P3 = (1,1)`.
    CubicBezier {
        /// First control point X.
        x1: f64,
        /// First control point Y.
        y1: f64,
        /// Second control point X.
        x2: f64,
        /// Second control point Y.
        y2: f64,
    },
}

impl TimingFunction {
    /// Look up a named curve.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "linear" => Self::Linear,
            "easeIn" => Self::EaseIn,
            "easeOut" => Self::EaseOut,
            "easeInOut" => Self::EaseInOut,
            "standard" => Self::Standard,
            "deceleration" => Self::Deceleration,
            "acceleration" => Self::Acceleration,
            "sharp" => Self::Sharp,
            "easeOutBack" => Self::EaseOutBack,
            _ => return None,
        })
    }

    /// Control points `(x1, y1, x2, y2)`.
    pub fn control_points(self) -> (f64, f64, f64, f64) {
        match self {
            Self::Linear => (0.0, 0.0, 1.0, 1.0),
            Self::EaseIn => (0.42, 0.0, 1.0, 1.0),
            Self::EaseOut => (0.0, 0.0, 0.58, 1.0),
            Self::EaseInOut => (0.42, 0.0, 0.58, 1.0),
            Self::Standard => (0.4, 0.0, 0.2, 1.0),
            Self::Deceleration => (0.0, 0.0, 0.2, 1.0),
            Self::Acceleration => (0.4, 0.0, 1.0, 1.0),
            Self::Sharp => (0.4, 0.0, 0.6, 1.0),
            Self::EaseOutBack => (0.175, 0.885, 0.32, 1.275),
            Self::CubicBezier { x1, y1, x2, y2 } => (x1, y1, x2, y2),
        }
    }

    /// Apply this curve to normalized time `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        if let Self::Linear = self {
            return t.clamp(0.0, 1.0);
        }
        let (x1, y1, x2, y2) = self.control_points();
        cubic_bezier_ease(t, x1, y1, x2, y2)
    }
}

fn cubic_bezier_ease(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    fn sample_curve(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * t * a1 + 3.0 * omt * t * t * a2 + t * t * t
    }
    fn sample_curve_derivative(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * a1 + 6.0 * omt * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    // Newton-Raphson first, then a bounded bisection on whatever is left.
    let mut t = x;
    for _ in 0..8 {
        let err = sample_curve(x1, x2, t) - x;
        if err.abs() < 1e-9 {
            return sample_curve(y1, y2, t);
        }
        let d = sample_curve_derivative(x1, x2, t);
        if d.abs() < 1e-7 {
            break;
        }
        t = (t - err / d).clamp(0.0, 1.0);
    }

    let mut lo = 0.0;
    let mut hi = 1.0;
    t = x;
    for _ in 0..32 {
        let x_t = sample_curve(x1, x2, t);
        if (x_t - x).abs() < 1e-9 {
            break;
        }
        if x_t < x {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }

    sample_curve(y1, y2, t)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
