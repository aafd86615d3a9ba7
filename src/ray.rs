//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction, representing a semi-infinite
//! line in 3D space used for intersection testing.

use crate::vec3::{Point3, Vec3};

/// Ray in 3D space defined by origin and direction.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    pub origin: Point3,

    /// Direction vector of the ray.
    ///
    /// Not required to be normalized and not checked for zero length; camera
    /// rays point at the viewport, so their length varies across the image.
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Compute a point at parameter t along the ray.
    ///
    /// Any real `t` is accepted; negative values give points behind the origin,
    /// so callers restrict `t` to the range they care about.
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_walks_along_direction() {
        let r = Ray::new(Point3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(r.at(0.0), r.origin);
        assert_eq!(r.at(1.5), Point3::new(1.0, 2.0, 0.0));
        assert_eq!(r.at(-1.0), Point3::new(1.0, 2.0, 5.0));
    }
}
