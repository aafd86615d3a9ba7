//! Per-pixel sampling loop and the shading function it drives.

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};

use crate::camera::Camera;
use crate::error::{Error, Result};
use crate::hittable::Hittable;
use crate::interval::Interval;
use crate::output::PixelSink;
use crate::random::Sampler;
use crate::ray::Ray;
use crate::vec3::{unit_vector, Color};

/// Smallest accepted hit parameter; keeps rays from hitting their own origin.
pub const T_MIN: f64 = 0.001;

/// Background at the bottom of the gradient (ray pointing straight down).
pub const BACKGROUND_BOTTOM: Color = Color::new(1.0, 1.0, 1.0);

/// Background at the top of the gradient (ray pointing straight up).
pub const BACKGROUND_TOP: Color = Color::new(0.5, 0.7, 1.0);

/// Color seen along `r`.
///
/// Hits are shaded by mapping the surface normal from [-1, 1] to [0, 1] per
/// channel. Misses get a vertical gradient from [`BACKGROUND_BOTTOM`] to
/// [`BACKGROUND_TOP`].
pub fn ray_color(r: &Ray, world: &dyn Hittable) -> Color {
    if let Some(rec) = world.hit(r, Interval::new(T_MIN, f64::INFINITY)) {
        return 0.5 * (rec.normal + Color::ONE);
    }

    background(unit_vector(r.direction).y)
}

/// Gradient color for a unit direction with vertical component `unit_y`.
///
/// `unit_y = -1` gives exactly [`BACKGROUND_BOTTOM`], `unit_y = 1` exactly
/// [`BACKGROUND_TOP`].
pub fn background(unit_y: f64) -> Color {
    let a = 0.5 * (unit_y + 1.0);
    (1.0 - a) * BACKGROUND_BOTTOM + a * BACKGROUND_TOP
}

/// Running mean of the samples taken for one pixel.
///
/// Adding the same color any number of times leaves the mean bit-identical
/// to that color.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PixelAccumulator {
    mean: Color,
    count: u32,
}

impl PixelAccumulator {
    /// Empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one more sample into the mean.
    pub fn add(&mut self, sample: Color) {
        self.count += 1;
        self.mean += (sample - self.mean) / self.count as f64;
    }

    /// Number of samples added so far
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Average of all samples (black when none were added)
    pub fn average(&self) -> Color {
        self.mean
    }
}

/// Image size and sampling parameters for a render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    /// Image width in pixels
    pub image_width: u32,
    /// Image height in pixels
    pub image_height: u32,
    /// Number of camera rays averaged per pixel
    pub samples_per_pixel: u32,
    /// Randomize sample positions inside each pixel; otherwise sample the center
    pub jitter: bool,
    /// Seed for the jitter sequence
    pub seed: u64,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            image_width: 400,
            image_height: 225,
            samples_per_pixel: 100,
            jitter: true,
            seed: 0,
            show_progress: false,
        }
    }
}

/// Drives the scan-order sampling loop.
#[derive(Debug, Clone)]
pub struct Renderer {
    settings: RenderSettings,
}

impl Renderer {
    /// Validate `settings` and build a renderer.
    pub fn new(settings: RenderSettings) -> Result<Self> {
        if settings.image_width == 0 || settings.image_height == 0 {
            return Err(Error::InvalidSettings {
                reason: format!(
                    "image must be at least 1x1, got {}x{}",
                    settings.image_width, settings.image_height
                ),
            });
        }
        if settings.samples_per_pixel == 0 {
            return Err(Error::InvalidSettings {
                reason: "samples_per_pixel must be at least 1".to_string(),
            });
        }
        Ok(Self { settings })
    }

    /// Settings this renderer was built with
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Render every pixel and hand it to `sink`.
    ///
    /// Rows go from the top of the image to the bottom, pixels within a row
    /// from left to right.
    pub fn render_to(&self, camera: &Camera, world: &dyn Hittable, sink: &mut dyn PixelSink) -> Result<()> {
        let RenderSettings {
            image_width: width,
            image_height: height,
            samples_per_pixel,
            ..
        } = self.settings;

        info!(
            "Rendering {}x{} at {} samples per pixel (seed {}, jitter {})",
            width, height, samples_per_pixel, self.settings.seed, self.settings.jitter
        );
        let start = std::time::Instant::now();

        let pb = if self.settings.show_progress {
            let pb = ProgressBar::new(height as u64);
            if let Ok(style) = ProgressStyle::default_bar().template("{bar:40} {pos}/{len} scanlines ETA: {eta}") {
                pb.set_style(style);
            }
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut sampler = Sampler::seeded(self.settings.seed);
        sink.begin(width, height)?;

        for j in (0..height).rev() {
            for i in 0..width {
                let color = self.sample_pixel(camera, world, &mut sampler, i, j);
                sink.write_pixel(color)?;
            }
            pb.inc(1);
        }

        sink.finish()?;
        pb.finish_and_clear();
        debug!("{} pixels written", width as u64 * height as u64);
        info!("Image rendered in {:.2?}", start.elapsed());
        Ok(())
    }

    /// Render into memory, in the same order [`Renderer::render_to`] emits.
    pub fn render(&self, camera: &Camera, world: &dyn Hittable) -> Result<Vec<Color>> {
        let mut pixels = PixelBuffer::default();
        self.render_to(camera, world, &mut pixels)?;
        Ok(pixels.0)
    }

    /// Average color of pixel `(i, j)`, with `j = 0` the bottom row.
    fn sample_pixel(&self, camera: &Camera, world: &dyn Hittable, sampler: &mut Sampler, i: u32, j: u32) -> Color {
        let width = self.settings.image_width as f64;
        let height = self.settings.image_height as f64;

        let mut pixel = PixelAccumulator::new();
        for _ in 0..self.settings.samples_per_pixel {
            let (du, dv) = if self.settings.jitter {
                (sampler.random_f64(), sampler.random_f64())
            } else {
                (0.5, 0.5)
            };
            let u = (i as f64 + du) / width;
            let v = (j as f64 + dv) / height;
            pixel.add(ray_color(&camera.get_ray(u, v), world));
        }
        pixel.average()
    }
}

#[derive(Default)]
struct PixelBuffer(Vec<Color>);

impl PixelSink for PixelBuffer {
    fn begin(&mut self, width: u32, height: u32) -> Result<()> {
        self.0 = Vec::with_capacity(width as usize * height as usize);
        Ok(())
    }

    fn write_pixel(&mut self, color: Color) -> Result<()> {
        self.0.push(color);
        Ok(())
    }
}
