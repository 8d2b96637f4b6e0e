use crate::icon_gen;
use crate::probe;
use crate::squircle;
use anyhow::{ensure, Context, Result};
use image::{imageops::FilterType, DynamicImage};
use std::path::Path;

/// How to trim an unwanted border off the source before resampling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CropStrategy {
    None,
    /// Trim this fraction of the width/height off every edge.
    Percent(f32),
    /// Literal pixel bounds, exclusive on the right and bottom.
    Absolute {
        left: u32,
        top: u32,
        right: u32,
        bottom: u32,
    },
    /// Crop to the content bounds measured by the edge-detection probe.
    Detected,
}

/// Crop, resample to `size`x`size` and squircle-mask an externally produced
/// image, then write it as a PNG.
pub fn process(input: &Path, out_path: &Path, size: u32, strategy: CropStrategy) -> Result<()> {
    ensure!(size > 0, "output size must be positive");
    println!("Processing {}...", input.display());

    let source =
        image::open(input).with_context(|| format!("Failed to load image {}", input.display()))?;
    let cropped = crop(&source, strategy)?;
    let resized = cropped.resize_exact(size, size, FilterType::Lanczos3);

    let mask = squircle::build_mask(size, squircle::RADIUS_RATIO)?;
    let masked = squircle::composite_through(&resized.to_rgba8(), &mask);

    icon_gen::save_png(&DynamicImage::ImageRgba8(masked), out_path)?;
    println!("✓ Generated {} ({size}x{size})", out_path.display());
    Ok(())
}

fn crop(source: &DynamicImage, strategy: CropStrategy) -> Result<DynamicImage> {
    let (width, height) = (source.width(), source.height());
    let (left, top, right, bottom) = match strategy {
        CropStrategy::None => return Ok(source.clone()),
        CropStrategy::Percent(margin) => {
            ensure!(
                margin > 0.0 && margin < 0.5,
                "crop margin must be in (0, 0.5), got {margin}"
            );
            let mx = (width as f32 * margin) as u32;
            let my = (height as f32 * margin) as u32;
            (mx, my, width - mx, height - my)
        }
        CropStrategy::Absolute {
            left,
            top,
            right,
            bottom,
        } => (left, top, right, bottom),
        CropStrategy::Detected => {
            let bounds = probe::measure(source);
            (bounds.left, bounds.top, bounds.right + 1, bounds.bottom + 1)
        }
    };

    ensure!(
        left < right && top < bottom,
        "crop bounds ({left}, {top}, {right}, {bottom}) are not ordered"
    );
    ensure!(
        right <= width && bottom <= height,
        "crop bounds ({left}, {top}, {right}, {bottom}) exceed the {width}x{height} source"
    );
    Ok(source.crop_imm(left, top, right - left, bottom - top))
}
