//! spheretrace: a CPU ray tracer for scenes made of spheres
//!
//! Casts camera rays through a viewport, finds the closest sphere each ray hits
//! and shades it by its surface normal, with a sky gradient behind everything.
//! Pixels are averaged over jittered samples and streamed in scan order to a
//! [`output::PixelSink`] (PPM text, PNG or EXR).

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod config;
pub mod error;
pub mod hittable;
pub mod interval;
pub mod output;
pub mod random;
pub mod ray;
pub mod render;
pub mod sphere;
pub mod vec3;
