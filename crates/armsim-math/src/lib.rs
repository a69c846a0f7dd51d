#![warn(missing_docs)]

//! Math types for the armsim crates.
//!
//! Thin wrappers around nalgebra providing the small value types the
//! kinematics and physics layers pass around: points, vectors,
//! homogeneous transforms, and a few numeric helpers (angle wrapping,
//! Moore-Penrose pseudo-inverse).

use std::f64::consts::PI;

use nalgebra::{DMatrix, Matrix3, Matrix4, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// Singular values below this are treated as zero by [`pseudo_inverse`].
pub const PINV_EPSILON: f64 = 1e-12;

/// A 4x4 homogeneous transformation matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Pure translation that moves the origin to `p`.
    pub fn from_point(p: &Point3) -> Self {
        Self::translation(p.x, p.y, p.z)
    }

    /// Standard Denavit-Hartenberg link transform.
    ///
    /// * `theta` - joint angle (rotation about the previous z axis)
    /// * `offset` - `d`, translation along the previous z axis
    /// * `length` - `a`, translation along the new x axis
    /// * `twist` - `alpha`, rotation about the new x axis
    pub fn denavit_hartenberg(theta: f64, offset: f64, length: f64, twist: f64) -> Self {
        let (st, ct) = theta.sin_cos();
        let (sa, ca) = twist.sin_cos();
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            ct, -st * ca,  st * sa, length * ct,
            st,  ct * ca, -ct * sa, length * st,
            0.0,      sa,       ca, offset,
            0.0,     0.0,      0.0, 1.0,
        );
        Self { matrix }
    }

    /// Compose: `self` then `other` (self * other).
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Translation part of the transform, as a point.
    pub fn position(&self) -> Point3 {
        Point3::new(
            self.matrix[(0, 3)],
            self.matrix[(1, 3)],
            self.matrix[(2, 3)],
        )
    }

    /// Upper-left 3x3 rotation block.
    pub fn rotation(&self) -> Matrix3<f64> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }
}

/// Wrap an angle into `(-pi, pi]`.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(2.0 * PI);
    if wrapped > PI {
        wrapped - 2.0 * PI
    } else {
        wrapped
    }
}

/// Moore-Penrose pseudo-inverse computed through the SVD.
///
/// Returns `None` if the decomposition fails (e.g. non-finite input).
pub fn pseudo_inverse(m: &DMatrix<f64>) -> Option<DMatrix<f64>> {
    if m.iter().any(|v| !v.is_finite()) {
        return None;
    }
    m.clone().pseudo_inverse(PINV_EPSILON).ok()
}
