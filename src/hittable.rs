//! Ray-object intersection system.
//!
//! Defines the Hittable trait for geometric primitives, the HitRecord it
//! produces, and HittableList, the scene container that reports the closest
//! hit among its members.

use crate::interval::Interval;
use crate::ray::Ray;
use crate::vec3::{dot, Point3, Vec3};

/// Ray-object intersection information.
///
/// Contains intersection point, surface normal and ray parameter needed for
/// shading calculations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point where the ray intersects the object
    pub point: Point3,
    /// Surface normal at the intersection point (unit vector, opposing the ray)
    pub normal: Vec3,
    /// Ray parameter of the intersection point
    pub t: f64,
    /// True if ray hits the front face, false if hits the back face
    pub front_face: bool,
}

impl HitRecord {
    /// Build a record, orienting `outward_normal` against the incident ray.
    ///
    /// `outward_normal` must have unit length.
    pub fn with_face_normal(r: &Ray, t: f64, point: Point3, outward_normal: Vec3) -> Self {
        let front_face = dot(r.direction, outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };
        Self {
            point,
            normal,
            t,
            front_face,
        }
    }
}

/// Trait for objects that can be intersected by rays.
///
/// Implementations are read-only during rendering, so the bound matches what a
/// shared scene needs.
pub trait Hittable: Sync + Send {
    /// Closest intersection with `t` inside `ray_t` (inclusive bounds), if any.
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord>;
}

/// Collection of objects forming a scene.
///
/// Uses linear search for intersection testing. Supports polymorphic
/// objects through `Box<dyn Hittable>`.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Create a new list with a single hittable object
    pub fn with_object(object: Box<dyn Hittable>) -> Self {
        let mut list = Self::new();
        list.add(object);
        list
    }

    /// Clear all objects from the list
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Number of objects in the scene
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when the scene has no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(r, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}
