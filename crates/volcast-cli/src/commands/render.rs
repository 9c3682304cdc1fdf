//! Render command implementation
//!
//! Builds a volume cube from a preset and writes one PNG per frame.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::{debug, info};
use volcast_field::FieldPreset;
use volcast_volume::{FrameState, VolumeConfig, VolumeCube};

use crate::camera::OrthographicCamera;
use crate::image::{write_rgb, PngConfig};

/// Options of a render run.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Built-in preset name; ignored when `config` is set.
    pub preset: String,
    /// JSON file with a full preset definition.
    pub config: Option<PathBuf>,
    /// Override of the preset's noise seed.
    pub seed: Option<u32>,
    pub width: u32,
    pub height: u32,
    /// Time of the first frame.
    pub time: f64,
    pub frames: u32,
    /// Time between consecutive frames.
    pub frame_step: f64,
    /// Marching step override.
    pub step: Option<f64>,
    pub out: PathBuf,
}

/// A written frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    pub path: PathBuf,
    pub time: f64,
    pub hash: String,
}

/// Run the render command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(options: &RenderOptions) -> Result<ExitCode> {
    let frames = render(options)?;
    for frame in &frames {
        println!(
            "{} {} {} {}",
            "Wrote".green().bold(),
            frame.path.display(),
            format!("t={:.3}", frame.time).dimmed(),
            frame.hash[..16].cyan()
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// Render every requested frame and return what was written.
pub fn render(options: &RenderOptions) -> Result<Vec<RenderedFrame>> {
    if options.frames == 0 {
        anyhow::bail!("--frames must be at least 1");
    }
    if !options.time.is_finite() || !options.frame_step.is_finite() {
        anyhow::bail!("--time and --frame-step must be finite");
    }

    let preset = load_preset(options)?;
    let mut config = VolumeConfig::default();
    if let Some(step) = options.step {
        config.step = step;
    }
    let cube = VolumeCube::from_preset(&preset, config).context("Failed to build volume")?;
    let camera = OrthographicCamera::new(options.width, options.height);
    let png_config = PngConfig::default();

    if let Some(parent) = options.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    info!(
        width = options.width,
        height = options.height,
        frames = options.frames,
        "rendering"
    );

    let mut written = Vec::with_capacity(options.frames as usize);
    for index in 0..options.frames {
        let time = options.time + index as f64 * options.frame_step;
        let path = frame_path(&options.out, index, options.frames);
        let image = camera
            .render(&cube, &FrameState::at(time))
            .context("Failed to render frame")?;
        let hash = write_rgb(&image, &path, &png_config)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(path = %path.display(), time, "frame written");
        written.push(RenderedFrame { path, time, hash });
    }
    Ok(written)
}

fn load_preset(options: &RenderOptions) -> Result<FieldPreset> {
    let preset = match &options.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            FieldPreset::from_json(&json)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        }
        None => FieldPreset::named(&options.preset)?,
    };
    Ok(match options.seed {
        Some(seed) => preset.with_seed(seed),
        None => preset,
    })
}

/// Output path of frame `index`; multi-frame runs get a `_NNNN` suffix.
pub fn frame_path(out: &Path, index: u32, frames: u32) -> PathBuf {
    if frames <= 1 {
        return out.to_path_buf();
    }
    let stem = out
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    let file_name = match out.extension() {
        Some(ext) => format!("{}_{:04}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}_{:04}", stem, index),
    };
    out.with_file_name(file_name)
}
