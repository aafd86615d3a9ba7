use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use clap::Parser;
use log::{error, info};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;
use spheretrace::config::SceneConfig;
use spheretrace::error::Result;
use spheretrace::output::{
    save_image_as_exr, save_image_as_png, ColorEncoding, ImageCollector, OutputFormat, PpmWriter,
};
use spheretrace::random::random_seed;
use spheretrace::render::{RenderSettings, Renderer};

/// Load the scene, apply command-line overrides, render and write the image.
fn run(args: Args) -> Result<()> {
    // Reject unknown extensions before spending time on the render
    let format = OutputFormat::from_path(&args.output)?;

    let mut scene = match &args.config {
        Some(path) => SceneConfig::load(path)?,
        None => {
            info!("No scene file given, using the built-in scene");
            SceneConfig::default()
        }
    };

    if let Some(width) = args.width {
        scene.image.width = width;
    }
    if let Some(samples) = args.samples_per_pixel {
        scene.image.samples_per_pixel = samples;
    }
    if args.seed.is_some() {
        scene.image.seed = args.seed;
    }
    if args.no_jitter {
        scene.image.jitter = false;
    }

    let seed = match scene.image.seed {
        Some(seed) => seed,
        None => {
            let seed = random_seed();
            info!("No seed configured, using {} (pass --seed {} to reproduce)", seed, seed);
            seed
        }
    };

    let world = scene.build_world()?;
    let camera = scene.build_camera()?;
    let renderer = Renderer::new(RenderSettings {
        image_width: scene.image.width,
        image_height: scene.image.height()?,
        samples_per_pixel: scene.image.samples_per_pixel,
        jitter: scene.image.jitter,
        seed,
        show_progress: !args.no_progress,
    })?;
    info!("Scene: {} spheres", world.len());

    let encoding = if args.gamma {
        ColorEncoding::Gamma2
    } else {
        ColorEncoding::Linear
    };

    match format {
        OutputFormat::Stdout => {
            let stdout = io::stdout();
            let mut sink = PpmWriter::new(BufWriter::new(stdout.lock()), encoding);
            renderer.render_to(&camera, &world, &mut sink)?;
        }
        OutputFormat::Ppm => {
            let file = File::create(&args.output)?;
            let mut sink = PpmWriter::new(BufWriter::new(file), encoding);
            renderer.render_to(&camera, &world, &mut sink)?;
            info!("Image saved as {}", args.output);
        }
        OutputFormat::Png | OutputFormat::Exr => {
            let mut sink = ImageCollector::new();
            renderer.render_to(&camera, &world, &mut sink)?;
            let image = sink.into_image();
            let path = Path::new(&args.output);
            if format == OutputFormat::Png {
                save_image_as_png(&image, path, encoding)?;
            } else {
                save_image_as_exr(&image, path)?;
            }
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    // Log application startup with version information
    info!("spheretrace - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
