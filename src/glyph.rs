use image::{Rgba, RgbaImage};

// Translucent whites layered over the gradient for the frosted-glass look.
const BODY_FILL: Rgba<u8> = Rgba([255, 255, 255, 60]);
const BODY_OUTLINE: Rgba<u8> = Rgba([255, 255, 255, 100]);
const FLAP: Rgba<u8> = Rgba([255, 255, 255, 120]);
const PLANE: Rgba<u8> = Rgba([255, 255, 255, 150]);
const TRAIL: Rgba<u8> = Rgba([255, 255, 255, 80]);

/// Envelope and paper-plane coordinates, all derived from the canvas size so
/// the glyph scales with the output.
#[derive(Debug, Clone, Copy)]
struct Geometry {
    margin: f32,
    top: f32,
    bottom: f32,
    corner_radius: f32,
    flap_apex: (f32, f32),
    plane_center: (f32, f32),
    plane_size: f32,
    stroke: f32,
    trail_stroke: f32,
    size: f32,
}

impl Geometry {
    fn derive(size: u32) -> Self {
        let s = size as f32;
        Geometry {
            margin: s * 0.25,
            top: s * 0.35,
            bottom: s * 0.72,
            corner_radius: s * 0.04,
            flap_apex: (s / 2.0, s * 0.53),
            plane_center: (s * 0.62, s * 0.32),
            plane_size: s * 0.18,
            stroke: (s * 0.003).round().max(2.0),
            trail_stroke: (s * 0.002).round().max(1.0),
            size: s,
        }
    }
}

/// Render the envelope + paper-plane overlay onto a transparent layer of the
/// given size. The caller composites the layer over its background (and may
/// gate it through a squircle mask first).
pub fn overlay(size: u32) -> RgbaImage {
    let g = Geometry::derive(size);
    let mut layer = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]));

    // Envelope body with its outline.
    draw_envelope_body(&mut layer, &g);

    // Flap: a V from the top corners down to the apex.
    let left_top = (g.margin, g.top);
    let right_top = (g.size - g.margin, g.top);
    draw_line(&mut layer, left_top, g.flap_apex, FLAP, g.stroke);
    draw_line(&mut layer, g.flap_apex, right_top, FLAP, g.stroke);

    // Paper plane in the upper right, nose pointing right.
    let (cx, cy) = g.plane_center;
    let sz = g.plane_size;
    let tail = (cx - sz / 2.0, cy + sz / 2.0);
    let nose = (cx + sz / 2.0, cy - sz / 3.0);
    let fold = (cx - sz / 4.0, cy);
    draw_triangle(&mut layer, [tail, nose, fold], PLANE);

    // Trail streaking off behind the tail.
    draw_line(
        &mut layer,
        tail,
        (cx - sz, cy + sz / 3.0),
        TRAIL,
        g.trail_stroke,
    );

    layer
}

/// Later shapes overwrite earlier ones on the layer; blending against the
/// background happens once, when the whole layer is composited.
fn put(layer: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < layer.width() && (y as u32) < layer.height() {
        layer.put_pixel(x as u32, y as u32, color);
    }
}

fn draw_envelope_body(layer: &mut RgbaImage, g: &Geometry) {
    let (left, right) = (g.margin, g.size - g.margin);
    let (top, bottom) = (g.top, g.bottom);
    let inner_radius = (g.corner_radius - g.stroke).max(0.0);

    for y in top.floor() as i64..=bottom.ceil() as i64 {
        for x in left.floor() as i64..=right.ceil() as i64 {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;
            if !in_rounded_rect(px, py, left, top, right, bottom, g.corner_radius) {
                continue;
            }
            let interior = in_rounded_rect(
                px,
                py,
                left + g.stroke,
                top + g.stroke,
                right - g.stroke,
                bottom - g.stroke,
                inner_radius,
            );
            put(layer, x, y, if interior { BODY_FILL } else { BODY_OUTLINE });
        }
    }
}

fn in_rounded_rect(
    px: f32,
    py: f32,
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
    radius: f32,
) -> bool {
    if px < left || px > right || py < top || py > bottom {
        return false;
    }
    let cx = px.clamp(left + radius, right - radius);
    let cy = py.clamp(top + radius, bottom - radius);
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= radius * radius
}

fn draw_line(layer: &mut RgbaImage, a: (f32, f32), b: (f32, f32), color: Rgba<u8>, width: f32) {
    let half = width / 2.0;
    let x0 = (a.0.min(b.0) - half).floor() as i64;
    let x1 = (a.0.max(b.0) + half).ceil() as i64;
    let y0 = (a.1.min(b.1) - half).floor() as i64;
    let y1 = (a.1.max(b.1) + half).ceil() as i64;

    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = (x as f32 + 0.5, y as f32 + 0.5);
            if dist_to_segment(p, a, b) <= half {
                put(layer, x, y, color);
            }
        }
    }
}

fn dist_to_segment(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len_sq).clamp(0.0, 1.0)
    };
    let (dx, dy) = (p.0 - (a.0 + t * abx), p.1 - (a.1 + t * aby));
    (dx * dx + dy * dy).sqrt()
}

fn draw_triangle(layer: &mut RgbaImage, v: [(f32, f32); 3], color: Rgba<u8>) {
    let x0 = v.iter().map(|p| p.0).fold(f32::INFINITY, f32::min).floor() as i64;
    let x1 = v.iter().map(|p| p.0).fold(f32::NEG_INFINITY, f32::max).ceil() as i64;
    let y0 = v.iter().map(|p| p.1).fold(f32::INFINITY, f32::min).floor() as i64;
    let y1 = v.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max).ceil() as i64;

    let edge = |p: (f32, f32), a: (f32, f32), b: (f32, f32)| {
        (p.0 - b.0) * (a.1 - b.1) - (a.0 - b.0) * (p.1 - b.1)
    };

    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = (x as f32 + 0.5, y as f32 + 0.5);
            let d0 = edge(p, v[0], v[1]);
            let d1 = edge(p, v[1], v[2]);
            let d2 = edge(p, v[2], v[0]);
            let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
            let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
            if !(has_neg && has_pos) {
                put(layer, x, y, color);
            }
        }
    }
}
