use crate::glyph;
use crate::gradient::Gradient;
use crate::squircle;
use anyhow::{Context, Result};
use image::{imageops, DynamicImage, RgbaImage};
use std::fs::{create_dir_all, File};
use std::path::Path;

/// Pixel format of the generated icon. macOS .icns sources want plain RGB;
/// everything else takes RGBA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Rgb,
    Rgba,
}

/// Everything that varies between the icon variants: one parameterized spec
/// instead of a script per combination.
#[derive(Debug, Clone)]
pub struct IconSpec {
    pub size: u32,
    pub color_mode: ColorMode,
    /// Pre-mask with the squircle. Off by default: macOS rounds Dock icons
    /// itself, and pre-rounded icons get wrapped in a dark square.
    pub squircle: bool,
    pub gradient: Gradient,
}

impl Default for IconSpec {
    fn default() -> Self {
        IconSpec {
            size: 1024,
            color_mode: ColorMode::Rgba,
            squircle: false,
            gradient: Gradient::default(),
        }
    }
}

/// Synthesize the icon: gradient canvas, glyph overlay, optional squircle.
pub fn render(spec: &IconSpec) -> Result<DynamicImage> {
    let size = spec.size;
    let background = spec.gradient.fill(size)?;
    let mut canvas: RgbaImage = DynamicImage::ImageRgb8(background).into_rgba8();

    let mut glyph_layer = glyph::overlay(size);
    if spec.squircle {
        let mask = squircle::build_mask(size, squircle::RADIUS_RATIO)?;
        squircle::set_alpha(&mut canvas, &mask);
        // The glyph must not paint alpha back into the rounded-off corners.
        glyph_layer = squircle::composite_through(&glyph_layer, &mask);
    }
    imageops::overlay(&mut canvas, &glyph_layer, 0, 0);

    Ok(match spec.color_mode {
        ColorMode::Rgba => DynamicImage::ImageRgba8(canvas),
        ColorMode::Rgb => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(canvas).to_rgb8()),
    })
}

/// Render the icon and write it to `out_path`.
pub fn generate(spec: &IconSpec, out_path: &Path) -> Result<()> {
    println!("Generating {}...", out_path.display());
    let icon = render(spec)?;
    save_png(&icon, out_path)?;
    println!("✓ Generated {} ({}x{})", out_path.display(), spec.size, spec.size);
    Ok(())
}

/// Write a lossless PNG, creating the output directory if needed.
pub fn save_png(image: &DynamicImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)
                .with_context(|| format!("Can't create output directory {}", parent.display()))?;
        }
    }
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    image
        .write_to(&mut file, image::ImageOutputFormat::Png)
        .context("Failed to write PNG")?;
    Ok(())
}
