//! Sphere primitive for ray tracing.
//!
//! Implements ray-sphere intersection using the reduced ("half b") quadratic formula.

use crate::error::{Error, Result};
use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::ray::Ray;
use crate::vec3::{dot, Point3};

/// Sphere primitive defined by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// The center must be finite and the radius finite and strictly positive;
    /// anything else would make the outward normal `(p - center) / radius`
    /// meaningless, so it is rejected here rather than at render time.
    pub fn new(center: Point3, radius: f64) -> Result<Self> {
        if !center.is_finite() {
            return Err(Error::InvalidSphere {
                reason: format!("center {center} is not finite"),
            });
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(Error::InvalidSphere {
                reason: format!("radius must be a positive finite number, got {radius}"),
            });
        }
        Ok(Self { center, radius })
    }

    /// Center point of the sphere in world coordinates.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Radius of the sphere (always positive).
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        // Vector from sphere center to ray origin
        let oc = r.origin - self.center;

        let a = r.direction.length_squared();
        // A zero-length direction never reaches the surface
        if a == 0.0 {
            return None;
        }
        let half_b = dot(oc, r.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root that lies in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.contains(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.contains(root) {
                return None;
            }
        }

        let point = r.at(root);
        let outward_normal = (point - self.center) / self.radius;
        Some(HitRecord::with_face_normal(r, root, point, outward_normal))
    }
}
