//! Three-component vector used for points, directions and colors.
//!
//! Backed by [`glam::DVec3`], so the arithmetic operators (component-wise
//! add/sub/neg, scalar mul/div, element-wise mul and the compound-assignment
//! forms) come straight from glam. The free functions here give the renderer
//! a small, explicit vocabulary and pin down the zero-length policy of
//! [`unit_vector`].

use glam::DVec3;

/// Geometric vector in world space.
pub type Vec3 = DVec3;

/// Position in world space.
pub type Point3 = DVec3;

/// Linear RGB color, channels nominally in [0, 1].
pub type Color = DVec3;

/// Dot product of two vectors.
#[inline]
pub fn dot(u: Vec3, v: Vec3) -> f64 {
    u.dot(v)
}

/// Cross product `u × v`.
#[inline]
pub fn cross(u: Vec3, v: Vec3) -> Vec3 {
    u.cross(v)
}

/// Normalize `v` to unit length.
///
/// A zero-length vector (or one whose length is not finite) has no direction,
/// so the zero vector is returned instead of propagating NaN.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    try_unit_vector(v).unwrap_or(Vec3::ZERO)
}

/// Normalize `v`, or `None` when it has no well-defined direction.
#[inline]
pub fn try_unit_vector(v: Vec3) -> Option<Vec3> {
    let length = v.length();
    if length > 0.0 && length.is_finite() {
        Some(v / length)
    } else {
        None
    }
}
