//! Pinhole camera mapping normalized viewport coordinates to world-space rays.

use crate::error::{Error, Result};
use crate::ray::Ray;
use crate::vec3::{Point3, Vec3};

/// Parameters a [`Camera`] is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Viewport width divided by viewport height
    pub aspect_ratio: f64,
    /// Height of the viewport in world units
    pub viewport_height: f64,
    /// Distance from the eye to the viewport plane
    pub focal_length: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            viewport_height: 2.0,
            focal_length: 1.0,
        }
    }
}

/// Camera for ray generation.
///
/// The eye sits at the world origin looking down -z. Everything needed to
/// generate rays is derived once in [`Camera::new`]; afterwards the camera is
/// immutable and ray generation is stateless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye position in world space
    origin: Point3,
    /// Vector spanning the viewport from left to right edge
    horizontal: Vec3,
    /// Vector spanning the viewport from bottom to top edge
    vertical: Vec3,
    /// World position of the viewport's lower-left corner
    lower_left_corner: Point3,
}

impl Camera {
    /// Derive the viewport from `settings`.
    ///
    /// All three parameters must be finite and strictly positive.
    pub fn new(settings: CameraSettings) -> Result<Self> {
        let CameraSettings {
            aspect_ratio,
            viewport_height,
            focal_length,
        } = settings;

        for (name, value) in [
            ("aspect_ratio", aspect_ratio),
            ("viewport_height", viewport_height),
            ("focal_length", focal_length),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidCamera {
                    reason: format!("{name} must be a positive finite number, got {value}"),
                });
            }
        }

        let viewport_width = aspect_ratio * viewport_height;

        let origin = Point3::ZERO;
        let horizontal = Vec3::new(viewport_width, 0.0, 0.0);
        let vertical = Vec3::new(0.0, viewport_height, 0.0);
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - Vec3::new(0.0, 0.0, focal_length);

        Ok(Self {
            origin,
            horizontal,
            vertical,
            lower_left_corner,
        })
    }

    /// Ray from the eye through viewport coordinate `(u, v)`.
    ///
    /// `(0, 0)` is the lower-left corner and `(1, 1)` the upper-right. Values
    /// outside [0, 1] extrapolate past the viewport edge.
    pub fn get_ray(&self, u: f64, v: f64) -> Ray {
        Ray::new(
            self.origin,
            self.lower_left_corner + u * self.horizontal + v * self.vertical - self.origin,
        )
    }

    /// Eye position
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Lower-left corner of the viewport
    pub fn lower_left_corner(&self) -> Point3 {
        self.lower_left_corner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_camera() -> Camera {
        Camera::new(CameraSettings {
            aspect_ratio: 1.0,
            viewport_height: 2.0,
            focal_length: 1.0,
        })
        .unwrap()
    }

    #[test]
    fn derived_viewport() {
        let cam = Camera::new(CameraSettings::default()).unwrap();
        let width = 16.0 / 9.0 * 2.0;
        assert_eq!(cam.origin(), Point3::ZERO);
        assert_eq!(
            cam.lower_left_corner(),
            Point3::new(-width / 2.0, -1.0, -1.0)
        );
    }

    #[test]
    fn center_and_corners() {
        let cam = square_camera();
        assert_eq!(cam.get_ray(0.5, 0.5).direction, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(cam.get_ray(0.0, 0.0).direction, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(cam.get_ray(1.0, 1.0).direction, Vec3::new(1.0, 1.0, -1.0));
        assert_eq!(cam.get_ray(0.3, 0.7).origin, Point3::ZERO);
    }

    #[test]
    fn out_of_range_coordinates_extrapolate() {
        let cam = square_camera();
        assert_eq!(cam.get_ray(1.5, -0.5).direction, Vec3::new(2.0, -2.0, -1.0));
    }

    #[test]
    fn rejects_non_positive_parameters() {
        let bad = [
            CameraSettings { aspect_ratio: 0.0, ..CameraSettings::default() },
            CameraSettings { viewport_height: -2.0, ..CameraSettings::default() },
            CameraSettings { focal_length: f64::NAN, ..CameraSettings::default() },
        ];
        for settings in bad {
            assert!(matches!(Camera::new(settings), Err(Error::InvalidCamera { .. })));
        }
    }
}
