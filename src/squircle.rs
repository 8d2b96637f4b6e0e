use anyhow::{ensure, Result};
use image::{GrayImage, Luma, RgbaImage};

/// Corner radius as a fraction of the side length, approximating the
/// curvature macOS applies to app icons.
pub const RADIUS_RATIO: f32 = 0.225;

/// Build a single-channel rounded-rectangle mask: 255 inside, 0 outside,
/// with a one-pixel anti-aliased band along the corner arcs.
pub fn build_mask(size: u32, ratio: f32) -> Result<GrayImage> {
    ensure!(size > 0, "mask size must be positive");
    ensure!(ratio > 0.0, "squircle radius ratio must be positive");
    let radius = size as f32 * ratio;
    ensure!(
        radius <= size as f32 / 2.0,
        "corner radius {radius} exceeds half the {size}px mask"
    );
    Ok(GrayImage::from_fn(size, size, |x, y| {
        Luma([coverage(x, y, size as f32, radius)])
    }))
}

fn coverage(x: u32, y: u32, size: f32, radius: f32) -> u8 {
    let px = x as f32 + 0.5;
    let py = y as f32 + 0.5;

    // Pixels in the straight-edge bands are fully covered; only the four
    // corner quarters test against the arc.
    let cx = if px < radius {
        radius
    } else if px > size - radius {
        size - radius
    } else {
        return 255;
    };
    let cy = if py < radius {
        radius
    } else if py > size - radius {
        size - radius
    } else {
        return 255;
    };

    let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
    if d <= radius - 1.0 {
        255
    } else if d >= radius {
        0
    } else {
        (255.0 * (radius - d)) as u8
    }
}

/// Replace the alpha channel of `img` with the mask values.
pub fn set_alpha(img: &mut RgbaImage, mask: &GrayImage) {
    debug_assert_eq!(img.dimensions(), mask.dimensions());
    for (pixel, cover) in img.pixels_mut().zip(mask.pixels()) {
        pixel[3] = cover[0];
    }
}

/// Composite `img` onto a fully transparent canvas through the mask: each
/// output pixel keeps its color but has its alpha scaled by the mask value.
pub fn composite_through(img: &RgbaImage, mask: &GrayImage) -> RgbaImage {
    debug_assert_eq!(img.dimensions(), mask.dimensions());
    let (width, height) = img.dimensions();
    RgbaImage::from_fn(width, height, |x, y| {
        let mut pixel = *img.get_pixel(x, y);
        let cover = mask.get_pixel(x, y)[0] as u16;
        pixel[3] = ((pixel[3] as u16 * cover) / 255) as u8;
        pixel
    })
}
