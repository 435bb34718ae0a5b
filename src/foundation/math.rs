use std::ops::Mul;

use crate::foundation::core::{Point, Size};

/// Column-major 4×4 transform, laid out like a layer transform.
///
/// Each inner array is one column `[x, y, z, w]`. `a * b` applies `b` first, then `a`, so the
/// builder helpers (`scaled`, `translated`, `rotated_*`) prepend the new operation in local
/// space the way layer transforms accumulate.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform3D {
    /// Four columns.
    pub cols: [[f64; 4]; 4],
}

impl Transform3D {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Pure translation.
    pub const fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    /// Non-uniform scale.
    pub const fn from_scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            cols: [
                [sx, 0.0, 0.0, 0.0],
                [0.0, sy, 0.0, 0.0],
                [0.0, 0.0, sz, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation about the X axis (radians).
    pub fn from_rotation_x(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, c, s, 0.0],
                [0.0, -s, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation about the Y axis (radians).
    pub fn from_rotation_y(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self {
            cols: [
                [c, 0.0, -s, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [s, 0.0, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation about the Z axis (radians).
    pub fn from_rotation_z(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self {
            cols: [
                [c, s, 0.0, 0.0],
                [-s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Prepend a scale in local space.
    pub fn scaled(self, sx: f64, sy: f64, sz: f64) -> Self {
        self * Self::from_scale(sx, sy, sz)
    }

    /// Prepend a translation in local space.
    pub fn translated(self, x: f64, y: f64, z: f64) -> Self {
        self * Self::from_translation(x, y, z)
    }

    /// Prepend rotations about X, then Y, then Z.
    pub fn rotated(self, x: f64, y: f64, z: f64) -> Self {
        self * Self::from_rotation_x(x) * Self::from_rotation_y(y) * Self::from_rotation_z(z)
    }

    /// Set the perspective term so that depth `distance` maps to a vanishing point.
    pub fn with_perspective(mut self, distance: f64) -> Self {
        self.cols[2][3] = -1.0 / distance;
        self
    }

    /// The `m34` perspective term.
    pub fn m34(&self) -> f64 {
        self.cols[2][3]
    }

    /// Return `true` when this is exactly the identity.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Map a point through the 2D affine part of this transform.
    pub fn apply_point(&self, p: Point) -> Point {
        let c = &self.cols;
        Point::new(
            c[0][0] * p.x + c[1][0] * p.y + c[3][0],
            c[0][1] * p.x + c[1][1] * p.y + c[3][1],
        )
    }

    /// Map a size through the 2D linear part of this transform.
    pub fn apply_size(&self, s: Size) -> Size {
        let c = &self.cols;
        Size::new(
            c[0][0] * s.width + c[1][0] * s.height,
            c[0][1] * s.width + c[1][1] * s.height,
        )
    }

    /// Component-wise interpolation.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let mut cols = [[0.0; 4]; 4];
        for (j, col) in cols.iter_mut().enumerate() {
            for (i, v) in col.iter_mut().enumerate() {
                let a = self.cols[j][i];
                *v = a + (other.cols[j][i] - a) * t;
            }
        }
        Self { cols }
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let a = &self.cols;
        let b = &rhs.cols;
        let mut out = [[0.0_f64; 4]; 4];
        for (j, col) in out.iter_mut().enumerate() {
            for (i, v) in col.iter_mut().enumerate() {
                *v = a[0][i] * b[j][0] + a[1][i] * b[j][1] + a[2][i] * b[j][2] + a[3][i] * b[j][3];
            }
        }
        Self { cols: out }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
