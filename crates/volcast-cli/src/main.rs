//! volcast CLI - preview renderer for procedural volumes
//!
//! Renders the built-in fire and cloud presets (or a JSON preset file) to
//! PNG through an orthographic camera looking into the unit cube.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use volcast_field::PRESET_NAMES;

use volcast_cli::commands;
use volcast_cli::commands::render::RenderOptions;

/// volcast - procedural volumetric fire and clouds
#[derive(Parser)]
#[command(name = "volcast")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a preset to one or more PNG frames
    Render {
        /// Built-in preset (see `volcast presets`)
        #[arg(short, long, default_value = "fire", value_parser = PossibleValuesParser::new(PRESET_NAMES))]
        preset: String,

        /// JSON preset file; takes precedence over --preset
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the preset's noise seed
        #[arg(long)]
        seed: Option<u32>,

        /// Image width in pixels
        #[arg(long, default_value_t = 128, value_parser = clap::value_parser!(u32).range(1..))]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value_t = 128, value_parser = clap::value_parser!(u32).range(1..))]
        height: u32,

        /// Animation time of the first frame
        #[arg(short, long, default_value_t = 0.0, allow_hyphen_values = true)]
        time: f64,

        /// Number of frames to render
        #[arg(long, default_value_t = 1)]
        frames: u32,

        /// Time between frames
        #[arg(long, default_value_t = 0.1)]
        frame_step: f64,

        /// Ray-marching step in cube units (default 0.01)
        #[arg(long)]
        step: Option<f64>,

        /// Output PNG path; multiple frames get a _NNNN suffix
        #[arg(short, long)]
        out: PathBuf,
    },

    /// List built-in presets
    Presets {
        /// Dump every preset's parameters as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            preset,
            config,
            seed,
            width,
            height,
            time,
            frames,
            frame_step,
            step,
            out,
        } => commands::render::run(&RenderOptions {
            preset,
            config,
            seed,
            width,
            height,
            time,
            frames,
            frame_step,
            step,
            out,
        }),
        Commands::Presets { json } => commands::presets::run(json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_render_defaults() {
        let cli = Cli::try_parse_from(["volcast", "render", "--out", "fire.png"]).unwrap();
        match cli.command {
            Commands::Render {
                preset,
                width,
                height,
                frames,
                step,
                out,
                ..
            } => {
                assert_eq!(preset, "fire");
                assert_eq!((width, height), (128, 128));
                assert_eq!(frames, 1);
                assert!(step.is_none());
                assert_eq!(out, PathBuf::from("fire.png"));
            }
            _ => panic!("expected render command"),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parses_animation() {
        let cli = Cli::try_parse_from([
            "volcast",
            "-v",
            "render",
            "--preset",
            "cloud",
            "--frames",
            "4",
            "--frame-step",
            "0.25",
            "--time",
            "-1.0",
            "--out",
            "cloud.png",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Render {
                preset,
                frames,
                frame_step,
                time,
                ..
            } => {
                assert_eq!(preset, "cloud");
                assert_eq!(frames, 4);
                assert_eq!(frame_step, 0.25);
                assert_eq!(time, -1.0);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_accepts_every_builtin_preset() {
        for name in PRESET_NAMES {
            let cli = Cli::try_parse_from(["volcast", "render", "--preset", name, "--out", "x.png"])
                .unwrap();
            match cli.command {
                Commands::Render { preset, .. } => assert_eq!(preset, name),
                _ => panic!("expected render command"),
            }
        }
    }

    #[test]
    fn test_cli_rejects_unknown_preset() {
        let result = Cli::try_parse_from(["volcast", "render", "--preset", "smoke", "--out", "x.png"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_zero_width() {
        let result = Cli::try_parse_from(["volcast", "render", "--width", "0", "--out", "x.png"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_presets() {
        let cli = Cli::try_parse_from(["volcast", "presets", "--json"]).unwrap();
        match cli.command {
            Commands::Presets { json } => assert!(json),
            _ => panic!("expected presets command"),
        }
    }
}
