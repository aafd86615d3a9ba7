//! Scene file parsing.
//!
//! A scene file is TOML:
//!
//! ```toml
//! [image]
//! width = 400
//! aspect_ratio = 1.7777777777777777
//! samples_per_pixel = 100
//! seed = 42
//! jitter = true
//!
//! [camera]
//! viewport_height = 2.0
//! focal_length = 1.0
//!
//! [[spheres]]
//! center = [0.0, 0.0, -1.0]
//! radius = 0.5
//! ```
//!
//! Every table is optional; missing values fall back to the defaults below,
//! and a file without `[[spheres]]` renders the default two-sphere scene.
//! The camera's aspect ratio always follows `image.aspect_ratio`.

use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::camera::{Camera, CameraSettings};
use crate::error::{Error, Result};
use crate::hittable::HittableList;
use crate::sphere::Sphere;
use crate::vec3::Point3;

/// `[image]` table: resolution and sampling.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
    /// Image width in pixels
    pub width: u32,
    /// Width over height; also the camera's aspect ratio
    pub aspect_ratio: f64,
    /// Number of samples per pixel
    pub samples_per_pixel: u32,
    /// Jitter seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
    /// Randomize sample positions within each pixel
    pub jitter: bool,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: 400,
            aspect_ratio: 16.0 / 9.0,
            samples_per_pixel: 100,
            seed: None,
            jitter: true,
        }
    }
}

impl ImageConfig {
    /// Image height derived from width and aspect ratio, at least 1.
    pub fn height(&self) -> Result<u32> {
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(Error::InvalidSettings {
                reason: format!("aspect_ratio must be a positive finite number, got {}", self.aspect_ratio),
            });
        }
        Ok(((self.width as f64 / self.aspect_ratio) as u32).max(1))
    }
}

/// `[camera]` table.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    /// Viewport height in world units
    pub viewport_height: f64,
    /// Eye to viewport distance
    pub focal_length: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let defaults = CameraSettings::default();
        Self {
            viewport_height: defaults.viewport_height,
            focal_length: defaults.focal_length,
        }
    }
}

/// One `[[spheres]]` entry.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SphereConfig {
    /// Center as `[x, y, z]`
    pub center: [f64; 3],
    /// Radius, must be positive
    pub radius: f64,
}

/// Parsed scene file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// `[image]` table
    pub image: ImageConfig,
    /// `[camera]` table
    pub camera: CameraConfig,
    /// `[[spheres]]` array; omitted means the default scene
    pub spheres: Vec<SphereConfig>,
}

impl Default for SceneConfig {
    /// A small sphere resting on a very large "ground" sphere.
    fn default() -> Self {
        Self {
            image: ImageConfig::default(),
            camera: CameraConfig::default(),
            spheres: vec![
                SphereConfig {
                    center: [0.0, 0.0, -1.0],
                    radius: 0.5,
                },
                SphereConfig {
                    center: [0.0, -100.5, -1.0],
                    radius: 100.0,
                },
            ],
        }
    }
}

impl SceneConfig {
    /// Parse scene TOML.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a scene file.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading scene from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!("Scene has {} spheres", config.spheres.len());
        Ok(config)
    }

    /// Build the scene, rejecting any degenerate sphere.
    pub fn build_world(&self) -> Result<HittableList> {
        let mut world = HittableList::new();
        for (index, sphere) in self.spheres.iter().enumerate() {
            let center = Point3::from_array(sphere.center);
            let sphere = Sphere::new(center, sphere.radius).map_err(|e| match e {
                Error::InvalidSphere { reason } => Error::InvalidSphere {
                    reason: format!("sphere #{index}: {reason}"),
                },
                other => other,
            })?;
            world.add(Box::new(sphere));
        }
        Ok(world)
    }

    /// Camera parameters, with the aspect ratio taken from `[image]`.
    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            aspect_ratio: self.image.aspect_ratio,
            viewport_height: self.camera.viewport_height,
            focal_length: self.camera.focal_length,
        }
    }

    /// Build the camera described by the file.
    pub fn build_camera(&self) -> Result<Camera> {
        Camera::new(self.camera_settings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SCENE: &str = r#"
[image]
width = 200
aspect_ratio = 2.0
samples_per_pixel = 8
seed = 42

[camera]
focal_length = 1.5

[[spheres]]
center = [0.0, 0.0, -1.0]
radius = 0.5

[[spheres]]
center = [1.0, 0.0, -2.0]
radius = 0.25

[[spheres]]
center = [0.0, -100.5, -1.0]
radius = 100.0
"#;

    #[test]
    fn parses_full_scene() {
        let config = SceneConfig::from_toml_str(SCENE).unwrap();
        assert_eq!(config.image.width, 200);
        assert_eq!(config.image.height().unwrap(), 100);
        assert_eq!(config.image.seed, Some(42));
        assert!(config.image.jitter);
        assert_eq!(config.camera.viewport_height, 2.0);
        assert_eq!(config.camera.focal_length, 1.5);
        assert_eq!(config.build_world().unwrap().len(), 3);
        assert_eq!(config.camera_settings().aspect_ratio, 2.0);
        assert!(config.build_camera().is_ok());
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = SceneConfig::from_toml_str("").unwrap();
        assert_eq!(config, SceneConfig::default());
        assert_eq!(config.build_world().unwrap().len(), 2);
        assert_eq!(config.image.height().unwrap(), 225);

        let no_spheres = SceneConfig::from_toml_str("spheres = []").unwrap();
        assert!(no_spheres.build_world().unwrap().is_empty());
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        assert!(matches!(SceneConfig::from_toml_str("[[spheres]]\nradius = \"big\""), Err(Error::Config(_))));
        assert!(matches!(SceneConfig::from_toml_str("[image]\ncolour = 3"), Err(Error::Config(_))));
    }

    #[test]
    fn degenerate_sphere_is_reported_with_its_index() {
        let config = SceneConfig::from_toml_str(
            "[[spheres]]\ncenter = [0.0, 0.0, -1.0]\nradius = 1.0\n[[spheres]]\ncenter = [0.0, 0.0, 0.0]\nradius = 0.0\n",
        )
        .unwrap();
        match config.build_world() {
            Err(Error::InvalidSphere { reason }) => assert!(reason.starts_with("sphere #1")),
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("zero radius accepted"),
        }
    }

    #[test]
    fn bad_aspect_ratio_is_rejected() {
        let config = SceneConfig::from_toml_str("[image]\naspect_ratio = 0.0").unwrap();
        assert!(matches!(config.image.height(), Err(Error::InvalidSettings { .. })));
        assert!(matches!(config.build_camera(), Err(Error::InvalidCamera { .. })));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCENE.as_bytes()).unwrap();
        let config = SceneConfig::load(file.path()).unwrap();
        assert_eq!(config.spheres.len(), 3);

        let missing = SceneConfig::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(missing, Err(Error::Io(_))));
    }
}
