/// Residual displacement (as a fraction of travel) below which a spring counts as settled.
const SETTLE_THRESHOLD: f64 = 1e-3;

/// Scan resolution for the settling search, in seconds.
const SETTLE_SCAN_STEP: f64 = 1.0 / 240.0;

/// Upper bound for the settling search, in seconds.
const SETTLE_SCAN_LIMIT: f64 = 30.0;

/// Damped harmonic oscillator driving a property from 0 to 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Spring {
    /// Spring constant `k`.
    pub stiffness: f64,
    /// Damping coefficient `c`.
    pub damping: f64,
    /// Mass `m`.
    #[serde(default = "default_mass")]
    pub mass: f64,
}

fn default_mass() -> f64 {
    1.0
}

impl Spring {
    /// Spring with unit mass.
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
        }
    }

    fn omega0(&self) -> f64 {
        (self.stiffness.max(0.0) / self.mass.max(1e-9)).sqrt()
    }

    fn zeta(&self) -> f64 {
        let k = self.stiffness.max(0.0);
        let m = self.mass.max(1e-9);
        self.damping.max(0.0) / (2.0 * (k * m).sqrt()).max(1e-9)
    }

    /// Step response at time `t` seconds, starting at rest at 0 and heading to 1.
    pub fn step(&self, t: f64) -> f64 {
        let w0 = self.omega0();
        if w0 == 0.0 {
            return t.clamp(0.0, 1.0);
        }
        let zeta = self.zeta();

        if (zeta - 1.0).abs() < 1e-6 {
            let e = (-w0 * t).exp();
            1.0 - e * (1.0 + w0 * t)
        } else if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let e = (-zeta * w0 * t).exp();
            let k = zeta / (1.0 - zeta * zeta).sqrt();
            1.0 - e * ((wd * t).cos() + k * (wd * t).sin())
        } else {
            let z2 = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - z2);
            let r2 = -w0 * (zeta + z2);
            let c2 = (zeta + z2) / (2.0 * z2);
            let c1 = (zeta - z2) / (2.0 * z2);
            1.0 - (c2 * (r1 * t).exp() - c1 * (r2 * t).exp())
        }
    }

    /// Upper bound on `|1 - step(t)|`, monotonically decreasing in `t`.
    fn envelope(&self, t: f64) -> f64 {
        let w0 = self.omega0();
        let zeta = self.zeta();
        if (zeta - 1.0).abs() < 1e-6 {
            (-w0 * t).exp() * (1.0 + w0 * t)
        } else if zeta < 1.0 {
            let k = zeta / (1.0 - zeta * zeta).sqrt();
            (-zeta * w0 * t).exp() * (1.0 + k * k).sqrt()
        } else {
            let z2 = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - z2);
            let r2 = -w0 * (zeta + z2);
            let c2 = (zeta + z2) / (2.0 * z2);
            let c1 = (zeta - z2) / (2.0 * z2);
            c2.abs() * (r1 * t).exp() + c1.abs() * (r2 * t).exp()
        }
    }

    /// Time in seconds after which the spring stays within the settle threshold of its target.
    ///
    /// This becomes the effective duration of any property animated with this spring.
    pub fn settling_duration(&self) -> f64 {
        if self.omega0() == 0.0 {
            return 1.0;
        }
        let mut t = 0.0;
        while t < SETTLE_SCAN_LIMIT {
            if self.envelope(t) < SETTLE_THRESHOLD {
                return t;
            }
            t += SETTLE_SCAN_STEP;
        }
        SETTLE_SCAN_LIMIT
    }

    /// Progress at normalized time `u` in `[0, 1]` of the settling duration.
    pub fn apply(&self, u: f64) -> f64 {
        if u >= 1.0 {
            return 1.0;
        }
        self.step(u.max(0.0) * self.settling_duration())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
