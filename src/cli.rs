use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser, Debug)]
#[command(name = "spheretrace")]
#[command(about = "Ray trace a scene of spheres to a PPM, PNG or EXR image")]
pub struct Args {
    /// Scene file (TOML); the built-in scene is used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set the logging level (defaults to "info")
    #[arg(long, value_enum, default_value = "info")]
    pub debug_level: LogLevel,

    /// Image width in pixels, overriding the scene file
    #[arg(long)]
    pub width: Option<u32>,

    /// Number of samples per pixel, overriding the scene file
    #[arg(long, short = 's')]
    pub samples_per_pixel: Option<u32>,

    /// Seed for the sample jitter, overriding the scene file
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sample pixel centers only (no antialiasing jitter)
    #[arg(long)]
    pub no_jitter: bool,

    /// Apply gamma 2.0 before quantizing 8-bit output
    #[arg(long)]
    pub gamma: bool,

    /// Hide the scanline progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Output file path (.ppm, .png, .exr, or - for PPM on stdout)
    #[arg(short, long, default_value = "-")]
    pub output: String,
}
