use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod glyph;
mod gradient;
mod icon_gen;
mod postprocess;
mod probe;
mod squircle;

use gradient::Gradient;
use icon_gen::{ColorMode, IconSpec};
use postprocess::CropStrategy;

#[derive(Debug, Parser)]
#[clap(
    name = "app-icon-gen",
    about = "Generate and post-process squircle app icons"
)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Synthesize the gradient + envelope icon from scratch.
    Generate {
        /// Output path for the PNG.
        #[clap(short, long, value_name = "PATH", default_value = "app-icon.png")]
        output: PathBuf,

        /// Icon side length in pixels.
        #[clap(short, long, value_name = "SIZE", default_value_t = 1024)]
        size: u32,

        /// Write an opaque RGB PNG with no alpha channel.
        #[clap(long, conflicts_with = "squircle")]
        rgb: bool,

        /// Pre-mask with the 22.5% squircle instead of a full square.
        #[clap(long)]
        squircle: bool,

        /// Gradient stop at the top-left corner (CSS color format).
        #[clap(long, value_name = "COLOR")]
        from: Option<String>,

        /// Gradient stop on the diagonal midpoint (CSS color format).
        #[clap(long, value_name = "COLOR")]
        via: Option<String>,

        /// Gradient stop at the bottom-right corner (CSS color format).
        #[clap(long, value_name = "COLOR")]
        to: Option<String>,
    },

    /// Crop, resample and squircle-mask an externally produced image.
    Process {
        /// Path to the source image.
        #[clap(value_name = "INPUT")]
        input: PathBuf,

        /// Output path for the PNG.
        #[clap(short, long, value_name = "PATH", default_value = "app-icon.png")]
        output: PathBuf,

        /// Output side length in pixels.
        #[clap(short, long, value_name = "SIZE", default_value_t = 1024)]
        size: u32,

        /// Trim this fraction of the image off every edge before resampling.
        #[clap(
            long,
            value_name = "RATIO",
            conflicts_with_all = ["crop_bounds", "detect_crop"]
        )]
        crop_percent: Option<f32>,

        /// Crop to absolute pixel bounds LEFT,TOP,RIGHT,BOTTOM.
        #[clap(
            long,
            value_delimiter = ',',
            value_name = "BOUNDS",
            conflicts_with = "detect_crop"
        )]
        crop_bounds: Option<Vec<u32>>,

        /// Crop to the content bounds measured by the edge-detection probe.
        #[clap(long)]
        detect_crop: bool,
    },

    /// Report the non-near-white content bounds along the center cross-sections.
    Probe {
        /// Path to the image to inspect.
        #[clap(value_name = "INPUT")]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    match Args::parse().command {
        Command::Generate {
            output,
            size,
            rgb,
            squircle,
            from,
            via,
            to,
        } => {
            let spec = IconSpec {
                size,
                color_mode: if rgb { ColorMode::Rgb } else { ColorMode::Rgba },
                squircle,
                gradient: Gradient::from_css(from.as_deref(), via.as_deref(), to.as_deref())?,
            };
            icon_gen::generate(&spec, &output)
        }
        Command::Process {
            input,
            output,
            size,
            crop_percent,
            crop_bounds,
            detect_crop,
        } => {
            let strategy = if let Some(margin) = crop_percent {
                CropStrategy::Percent(margin)
            } else if let Some(bounds) = crop_bounds {
                let [left, top, right, bottom] = bounds[..] else {
                    bail!("--crop-bounds takes exactly four values: LEFT,TOP,RIGHT,BOTTOM");
                };
                CropStrategy::Absolute {
                    left,
                    top,
                    right,
                    bottom,
                }
            } else if detect_crop {
                CropStrategy::Detected
            } else {
                CropStrategy::None
            };
            postprocess::process(&input, &output, size, strategy)
        }
        Command::Probe { input } => {
            let image = image::open(&input)
                .with_context(|| format!("Failed to load image {}", input.display()))?;
            println!("{}", probe::measure(&image));
            Ok(())
        }
    }
}
