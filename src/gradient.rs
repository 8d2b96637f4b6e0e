use anyhow::{anyhow, bail, Result};
use image::{Rgb, RgbImage};
use std::str::FromStr;

/// Default stops: deep navy through purple to blue, sampled diagonally.
pub const LOW: Rgb<u8> = Rgb([20, 15, 60]);
pub const MID: Rgb<u8> = Rgb([107, 33, 168]);
pub const HIGH: Rgb<u8> = Rgb([37, 99, 235]);

/// Two-segment diagonal gradient: `low` at the top-left corner, `mid` on the
/// anti-diagonal, `high` at the bottom-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub low: Rgb<u8>,
    pub mid: Rgb<u8>,
    pub high: Rgb<u8>,
}

impl Default for Gradient {
    fn default() -> Self {
        Gradient {
            low: LOW,
            mid: MID,
            high: HIGH,
        }
    }
}

impl Gradient {
    /// Build a gradient from optional CSS color strings, falling back to the
    /// default stop for any that are not given.
    pub fn from_css(low: Option<&str>, mid: Option<&str>, high: Option<&str>) -> Result<Self> {
        Ok(Gradient {
            low: low.map(parse_css_color).transpose()?.unwrap_or(LOW),
            mid: mid.map(parse_css_color).transpose()?.unwrap_or(MID),
            high: high.map(parse_css_color).transpose()?.unwrap_or(HIGH),
        })
    }

    /// Color at pixel (x, y) of a `size`-wide canvas. The blend parameter is
    /// the diagonal `t = 0.5*x/size + 0.5*y/size`; the first half interpolates
    /// low to mid, the second half mid to high.
    pub fn sample(&self, x: u32, y: u32, size: u32) -> Rgb<u8> {
        let t = (x as f32 / size as f32) * 0.5 + (y as f32 / size as f32) * 0.5;
        if t < 0.5 {
            lerp(self.low, self.mid, t * 2.0)
        } else {
            lerp(self.mid, self.high, (t - 0.5) * 2.0)
        }
    }

    /// Paint a full `size`x`size` canvas.
    pub fn fill(&self, size: u32) -> Result<RgbImage> {
        if size == 0 {
            bail!("gradient canvas size must be positive");
        }
        Ok(RgbImage::from_fn(size, size, |x, y| self.sample(x, y, size)))
    }
}

fn lerp(a: Rgb<u8>, b: Rgb<u8>, s: f32) -> Rgb<u8> {
    let ch = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * s) as u8;
    Rgb([ch(a[0], b[0]), ch(a[1], b[1]), ch(a[2], b[2])])
}

fn parse_css_color(color: &str) -> Result<Rgb<u8>> {
    let srgb = css_color::Srgb::from_str(color)
        .map_err(|_| anyhow!("Invalid CSS color: {color}"))?;
    Ok(Rgb([
        (srgb.red * 255.) as u8,
        (srgb.green * 255.) as u8,
        (srgb.blue * 255.) as u8,
    ]))
}
