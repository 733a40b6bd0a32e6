use std::{fs, io, path::Path, path::PathBuf, process};

use clap::{Parser, Subcommand};
use log::{error, info};
use thiserror::Error;

use parse_scene::{parse_scene, ParseError};
use ray_tracer::prelude::*;

mod demos;

#[derive(Error, Debug)]
enum RunError {
    #[error("Could not parse scene: {0}")]
    Scene(#[from] ParseError),

    #[error("Could not render: {0}")]
    RayTracer(#[from] RayTracerError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a YAML scene description to a PPM image
    Render {
        scene: PathBuf,

        #[arg(short, long, default_value = "scene.ppm")]
        output: PathBuf,

        /// Maximum characters per line of pixel data
        #[arg(long, conflicts_with = "no_wrap")]
        line_width: Option<usize>,

        /// Write each row of pixels on a single line
        #[arg(long)]
        no_wrap: bool,
    },
    /// Render the built-in room with three spheres
    Room {
        #[arg(short, long, default_value = "room.ppm")]
        output: PathBuf,

        #[arg(long, default_value_t = 100)]
        width: usize,

        #[arg(long, default_value_t = 50)]
        height: usize,
    },
    /// Draw the hour marks of an analog clock
    Clock {
        #[arg(short, long, default_value = "clock.ppm")]
        output: PathBuf,

        #[arg(long, default_value_t = 100)]
        size: usize,
    },
    /// Shade a single sphere by casting rays at it directly
    LitSphere {
        #[arg(short, long, default_value = "lit_sphere.ppm")]
        output: PathBuf,

        #[arg(long, default_value_t = 200)]
        size: usize,
    },
    /// Draw the outline a sphere casts onto the canvas
    Silhouette {
        #[arg(short, long, default_value = "silhouette.ppm")]
        output: PathBuf,

        #[arg(long, default_value_t = 40)]
        size: usize,
    },
    /// Print the path of a projectile until it hits the ground
    Projectile,
}

/// A small ray tracer for scenes made of spheres
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log progress at info level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

fn write_image(canvas: &Canvas, path: &Path, options: PpmOptions) -> Result<(), RunError> {
    canvas.write_ppm(path, options)?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn run(command: Command) -> Result<(), RunError> {
    match command {
        Command::Render {
            scene,
            output,
            line_width,
            no_wrap,
        } => {
            let input = fs::read_to_string(&scene)?;
            let scene = parse_scene(&input)?;
            let canvas = scene.render()?;

            let mut options = PpmOptions::default();
            if no_wrap {
                options.line_width = None;
            } else if line_width.is_some() {
                options.line_width = line_width;
            }
            write_image(&canvas, &output, options)
        }
        Command::Room {
            output,
            width,
            height,
        } => {
            let (world, camera) = demos::spheres_room(width, height)?;
            let canvas = world.render(&camera)?;
            write_image(&canvas, &output, PpmOptions::default())
        }
        Command::Clock { output, size } => {
            let canvas = demos::draw_clock(size);
            write_image(&canvas, &output, PpmOptions::default())
        }
        Command::LitSphere { output, size } => {
            let canvas = demos::draw_lit_sphere(size)?;
            write_image(&canvas, &output, PpmOptions::default())
        }
        Command::Silhouette { output, size } => {
            let canvas = demos::draw_silhouette(size)?;
            write_image(&canvas, &output, PpmOptions::default())
        }
        Command::Projectile => {
            demos::run_projectile();
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli.command) {
        error!("{e}");
        process::exit(1);
    }
}
