use image::DynamicImage;
use std::fmt;

/// Channels at or above this count as background white.
const NEAR_WHITE: u8 = 240;

/// Bounds of non-near-white content along the center cross-sections, used to
/// pick crop bounds for AI-generated sources with a white frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentBounds {
    pub width: u32,
    pub height: u32,
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

/// Scan the horizontal and vertical lines through the image center, from each
/// edge toward the center, for the first pixel that is not near-white. Falls
/// back to the outer edge when an entire half-scan is white.
pub fn measure(image: &DynamicImage) -> ContentBounds {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let (cx, cy) = (width / 2, height / 2);

    let content = |x: u32, y: u32| {
        let p = rgba.get_pixel(x, y);
        p[0] < NEAR_WHITE || p[1] < NEAR_WHITE || p[2] < NEAR_WHITE
    };

    ContentBounds {
        width,
        height,
        left: (0..cx).find(|&x| content(x, cy)).unwrap_or(0),
        right: (cx + 1..width)
            .rev()
            .find(|&x| content(x, cy))
            .unwrap_or(width - 1),
        top: (0..cy).find(|&y| content(cx, y)).unwrap_or(0),
        bottom: (cy + 1..height)
            .rev()
            .find(|&y| content(cx, y))
            .unwrap_or(height - 1),
    }
}

impl fmt::Display for ContentBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Image size: {}x{}", self.width, self.height)?;
        write!(
            f,
            "Content bounds (center cross-section): left={}, right={}, top={}, bottom={}",
            self.left, self.right, self.top, self.bottom
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn white_frame_image(size: u32, inset: u32) -> DynamicImage {
        let img = RgbaImage::from_fn(size, size, |x, y| {
            let inside = x >= inset && x < size - inset && y >= inset && y < size - inset;
            if inside {
                Rgba([40, 30, 120, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn finds_the_content_square_inside_a_white_frame() {
        let bounds = measure(&white_frame_image(100, 20));
        assert_eq!(
            bounds,
            ContentBounds {
                width: 100,
                height: 100,
                left: 20,
                right: 79,
                top: 20,
                bottom: 79,
            }
        );
    }

    #[test]
    fn all_white_image_falls_back_to_the_edges() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            64,
            64,
            Rgba([255, 255, 255, 255]),
        ));
        let bounds = measure(&img);
        assert_eq!((bounds.left, bounds.right, bounds.top, bounds.bottom), (0, 63, 0, 63));
    }

    #[test]
    fn near_white_pixels_count_as_background() {
        // 240 on every channel is still background; 239 is content.
        let img = RgbaImage::from_fn(50, 50, |x, _| {
            if x >= 10 {
                Rgba([239, 255, 255, 255])
            } else {
                Rgba([240, 240, 240, 255])
            }
        });
        let bounds = measure(&DynamicImage::ImageRgba8(img));
        assert_eq!(bounds.left, 10);
    }

    #[test]
    fn report_names_all_four_coordinates() {
        let text = measure(&white_frame_image(100, 20)).to_string();
        assert!(text.contains("Image size: 100x100"));
        assert!(text.contains("left=20"));
        assert!(text.contains("right=79"));
        assert!(text.contains("top=20"));
        assert!(text.contains("bottom=79"));
    }
}
