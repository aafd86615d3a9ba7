//! # Output Module
//!
//! Destinations for the finished pixel stream produced by the renderer:
//! - Plain-text PPM (`P3`) written incrementally to any [`Write`]
//! - PNG via the `image` crate, 8-bit
//! - EXR via the `exr` crate, linear f32 with no quantization
//!
//! ## Quantization
//!
//! Every 8-bit output uses the same rule: `floor(255.999 * clamp(value, 0, 1))`,
//! optionally after gamma-2 encoding (`sqrt`) of the clamped value.

use std::io::Write;
use std::path::Path;

use exr::prelude::write_rgb_file;
use image::{ImageBuffer, Rgb};
use log::{debug, info};

use crate::error::{Error, Result};
use crate::interval::Interval;
use crate::vec3::Color;

/// HDR image buffer holding linear f32 RGB values.
pub type HdrImage = ImageBuffer<Rgb<f32>, Vec<f32>>;

/// Receiver of finished pixels, in scan order from the top-left pixel.
pub trait PixelSink {
    /// Called once before the first pixel.
    fn begin(&mut self, width: u32, height: u32) -> Result<()>;

    /// Called once per pixel with the averaged sample color.
    fn write_pixel(&mut self, color: Color) -> Result<()>;

    /// Called once after the last pixel.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// How linear channel values are mapped before 8-bit quantization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorEncoding {
    /// Values are quantized as-is
    #[default]
    Linear,
    /// Gamma 2.0: the square root of each clamped channel is quantized
    Gamma2,
}

impl ColorEncoding {
    /// Clamp `value` to [0, 1] and apply the encoding curve.
    pub fn encode(self, value: f64) -> f64 {
        let clamped = Interval::new(0.0, 1.0).clamp(value);
        match self {
            ColorEncoding::Linear => clamped,
            ColorEncoding::Gamma2 => clamped.sqrt(),
        }
    }

    /// Encode and quantize a single channel to 8 bits.
    pub fn quantize(self, value: f64) -> u8 {
        (255.999 * self.encode(value)).floor() as u8
    }

    /// Quantize all three channels of `color`, in R, G, B order.
    pub fn quantize_color(self, color: Color) -> [u8; 3] {
        [
            self.quantize(color.x),
            self.quantize(color.y),
            self.quantize(color.z),
        ]
    }
}

/// Streams pixels as a plain-text PPM (`P3`) image.
pub struct PpmWriter<W: Write> {
    out: W,
    encoding: ColorEncoding,
}

impl<W: Write> PpmWriter<W> {
    /// Wrap `out`; buffering is left to the caller.
    pub fn new(out: W, encoding: ColorEncoding) -> Self {
        Self { out, encoding }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PixelSink for PpmWriter<W> {
    fn begin(&mut self, width: u32, height: u32) -> Result<()> {
        write!(self.out, "P3\n{width} {height}\n255\n")?;
        Ok(())
    }

    fn write_pixel(&mut self, color: Color) -> Result<()> {
        let [r, g, b] = self.encoding.quantize_color(color);
        writeln!(self.out, "{r} {g} {b}")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Collects the pixel stream into an in-memory HDR image.
#[derive(Default)]
pub struct ImageCollector {
    image: HdrImage,
    next: u32,
}

impl ImageCollector {
    /// Create an empty collector; [`PixelSink::begin`] allocates the buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The collected image.
    pub fn into_image(self) -> HdrImage {
        self.image
    }
}

impl PixelSink for ImageCollector {
    fn begin(&mut self, width: u32, height: u32) -> Result<()> {
        self.image = ImageBuffer::new(width, height);
        self.next = 0;
        Ok(())
    }

    fn write_pixel(&mut self, color: Color) -> Result<()> {
        let width = self.image.width();
        let (x, y) = (self.next % width.max(1), self.next / width.max(1));
        if y >= self.image.height() {
            return Err(Error::InvalidSettings {
                reason: format!("more pixels written than the {}x{} image holds", width, self.image.height()),
            });
        }
        self.image
            .put_pixel(x, y, Rgb([color.x as f32, color.y as f32, color.z as f32]));
        self.next += 1;
        Ok(())
    }
}

/// Where a rendered image goes, picked from the output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain-text PPM on standard output (`-`)
    Stdout,
    /// Plain-text PPM file
    Ppm,
    /// 8-bit PNG file
    Png,
    /// Linear f32 EXR file
    Exr,
}

impl OutputFormat {
    /// Choose the format from `path`'s extension (case-insensitive).
    pub fn from_path(path: &str) -> Result<Self> {
        if path == "-" {
            return Ok(OutputFormat::Stdout);
        }
        let extension = Path::new(path)
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "ppm" => Ok(OutputFormat::Ppm),
            "png" => Ok(OutputFormat::Png),
            "exr" => Ok(OutputFormat::Exr),
            _ => Err(Error::UnsupportedOutput(path.to_string())),
        }
    }
}

/// Save an f32 RGB image as 8-bit PNG.
///
/// Each channel goes through [`ColorEncoding::quantize`], so a PNG and a PPM
/// of the same render hold identical byte values.
pub fn save_image_as_png(image: &HdrImage, output_path: &Path, encoding: ColorEncoding) -> Result<()> {
    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
            let pixel = image.get_pixel(x, y);
            Rgb([
                encoding.quantize(pixel[0] as f64),
                encoding.quantize(pixel[1] as f64),
                encoding.quantize(pixel[2] as f64),
            ])
        });

    u8_image.save_with_format(output_path, image::ImageFormat::Png)?;
    info!("Image saved as {}", output_path.display());
    Ok(())
}

/// Save an f32 RGB image as EXR with full HDR precision.
///
/// Values are written linear, without clamping or gamma.
pub fn save_image_as_exr(image: &HdrImage, output_path: &Path) -> Result<()> {
    let width = image.width() as usize;
    debug!("Writing {}x{} EXR", width, image.height());

    write_rgb_file(output_path, width, image.height() as usize, |x, y| {
        let pixel = image.get_pixel(x as u32, y as u32);
        (pixel[0], pixel[1], pixel[2])
    })?;

    info!("HDR image saved as EXR: {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantization_rule() {
        let q = |v| ColorEncoding::Linear.quantize(v);
        assert_eq!(q(1.0), 255);
        assert_eq!(q(0.0), 0);
        assert_eq!(q(0.5), 127);
        assert_eq!(q(-1.0), 0);
        assert_eq!(q(2.0), 255);
        assert_eq!(q(f64::NAN), 0);
    }

    #[test]
    fn gamma_encoding_brightens_midtones() {
        assert_eq!(ColorEncoding::Gamma2.quantize(0.25), 127);
        assert_eq!(ColorEncoding::Gamma2.quantize(1.0), 255);
        assert_eq!(ColorEncoding::Gamma2.quantize(-0.5), 0);
    }

    #[test]
    fn ppm_layout() {
        let mut sink = PpmWriter::new(Vec::new(), ColorEncoding::Linear);
        sink.begin(2, 1).unwrap();
        sink.write_pixel(Color::new(1.0, 0.0, 0.5)).unwrap();
        sink.write_pixel(Color::new(0.0, 1.0, 2.0)).unwrap();
        sink.finish().unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n255 0 127\n0 255 255\n");
    }

    #[test]
    fn collector_fills_rows_top_down() {
        let mut sink = ImageCollector::new();
        sink.begin(2, 2).unwrap();
        for k in 0..4 {
            sink.write_pixel(Color::splat(k as f64)).unwrap();
        }
        assert!(sink.write_pixel(Color::ZERO).is_err());
        let image = sink.into_image();
        assert_eq!(image.get_pixel(1, 0)[0], 1.0);
        assert_eq!(image.get_pixel(0, 1)[0], 2.0);
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(OutputFormat::from_path("-").unwrap(), OutputFormat::Stdout);
        assert_eq!(OutputFormat::from_path("out.ppm").unwrap(), OutputFormat::Ppm);
        assert_eq!(OutputFormat::from_path("a/b.PNG").unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path("x.exr").unwrap(), OutputFormat::Exr);
        assert!(matches!(
            OutputFormat::from_path("x.jpg"),
            Err(Error::UnsupportedOutput(_))
        ));
    }

    #[test]
    fn png_and_exr_round_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = ImageCollector::new();
        sink.begin(3, 2).unwrap();
        for _ in 0..6 {
            sink.write_pixel(Color::new(0.5, 0.25, 1.0)).unwrap();
        }
        let image = sink.into_image();

        let png = dir.path().join("out.png");
        save_image_as_png(&image, &png, ColorEncoding::Linear).unwrap();
        let decoded = image::open(&png).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1).0, [127, 63, 255]);

        let exr = dir.path().join("out.exr");
        save_image_as_exr(&image, &exr).unwrap();
        assert!(exr.metadata().unwrap().len() > 0);
    }
}
