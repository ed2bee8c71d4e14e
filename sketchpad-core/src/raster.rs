// Path primitives rasterized straight onto a Canvas.
//
// Coverage is binary: a pixel is painted when its center (x + 0.5, y + 0.5) falls inside the
// shape. Strokes are centered on the path, so a stroke of width w reaches w / 2 either side.

use ecolor::Color32;
use tracing::trace;

use crate::canvas::{Canvas, Point};

/// Half-widths below this would let thin strokes fall between pixel centers.
const MIN_HALF_WIDTH: f32 = 0.5;

fn half_width(width: f32) -> f32 {
    (width / 2.0).max(MIN_HALF_WIDTH)
}

/// Pixel rows/columns whose centers could lie in `[min, max]`, clipped to `0..limit`.
fn pixel_span(min: f32, max: f32, limit: u32) -> std::ops::Range<i64> {
    let start = (min - 0.5).floor().max(0.0) as i64;
    let end = ((max - 0.5).ceil() as i64 + 1).min(limit as i64);
    start..end.max(start)
}

fn pixel_center(x: i64, y: i64) -> Point {
    Point::new(x as f32 + 0.5, y as f32 + 0.5)
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

/// Stroke a straight segment with round caps.
pub fn stroke_segment(canvas: &mut Canvas, from: Point, to: Point, width: f32, color: Color32) {
    trace!(?from, ?to, width, "stroke segment");
    let r = half_width(width);

    for y in pixel_span(from.y.min(to.y) - r, from.y.max(to.y) + r, canvas.height()) {
        for x in pixel_span(from.x.min(to.x) - r, from.x.max(to.x) + r, canvas.width()) {
            if distance_to_segment(pixel_center(x, y), from, to) <= r {
                canvas.plot(x, y, color);
            }
        }
    }

    // The pixels under the endpoints are always covered, even for hairlines.
    canvas.plot(from.x.floor() as i64, from.y.floor() as i64, color);
    canvas.plot(to.x.floor() as i64, to.y.floor() as i64, color);
}

/// Outline the rectangle with corner `(x, y)` and signed size `(w, h)`.
pub fn stroke_rect(canvas: &mut Canvas, x: f32, y: f32, w: f32, h: f32, width: f32, color: Color32) {
    let corners = [
        Point::new(x, y),
        Point::new(x + w, y),
        Point::new(x + w, y + h),
        Point::new(x, y + h),
    ];
    for i in 0..corners.len() {
        stroke_segment(canvas, corners[i], corners[(i + 1) % 4], width, color);
    }
}

/// Fill the rectangle with corner `(x, y)` and signed size `(w, h)`.
pub fn fill_rect(canvas: &mut Canvas, x: f32, y: f32, w: f32, h: f32, color: Color32) {
    let (x0, x1) = (x.min(x + w), x.max(x + w));
    let (y0, y1) = (y.min(y + h), y.max(y + h));
    trace!(x0, y0, x1, y1, "fill rect");

    for py in pixel_span(y0, y1, canvas.height()) {
        for px in pixel_span(x0, x1, canvas.width()) {
            let c = pixel_center(px, py);
            if c.x >= x0 && c.x <= x1 && c.y >= y0 && c.y <= y1 {
                canvas.plot(px, py, color);
            }
        }
    }
}

/// Outline a full circle.
pub fn stroke_circle(canvas: &mut Canvas, center: Point, radius: f32, width: f32, color: Color32) {
    trace!(?center, radius, width, "stroke circle");
    let r = half_width(width);
    let reach = radius + r;

    for y in pixel_span(center.y - reach, center.y + reach, canvas.height()) {
        for x in pixel_span(center.x - reach, center.x + reach, canvas.width()) {
            if (pixel_center(x, y).distance(center) - radius).abs() <= r {
                canvas.plot(x, y, color);
            }
        }
    }
}

pub fn fill_circle(canvas: &mut Canvas, center: Point, radius: f32, color: Color32) {
    trace!(?center, radius, "fill circle");
    for y in pixel_span(center.y - radius, center.y + radius, canvas.height()) {
        for x in pixel_span(center.x - radius, center.x + radius, canvas.width()) {
            if pixel_center(x, y).distance(center) <= radius {
                canvas.plot(x, y, color);
            }
        }
    }
}

/// Replace the 4-connected region sharing the color at `(x, y)`. Returns the number of pixels changed.
pub fn flood_fill(canvas: &mut Canvas, x: u32, y: u32, replacement: Color32) -> usize {
    let target = match canvas.get_pixel(x, y) {
        Some(color) => color,
        None => {
            trace!("Fill attempted at out-of-bounds position ({}, {})", x, y);
            return 0;
        }
    };

    if target == replacement {
        trace!("Target color already matches fill color, skipping fill");
        return 0;
    }

    let mut filled = 0;
    let mut stack = vec![(x, y)];
    while let Some((x, y)) = stack.pop() {
        if canvas.get_pixel(x, y) != Some(target) {
            continue;
        }
        canvas.set_pixel(x, y, replacement);
        filled += 1;

        if x > 0 {
            stack.push((x - 1, y));
        }
        if y > 0 {
            stack.push((x, y - 1));
        }
        if x + 1 < canvas.width() {
            stack.push((x + 1, y));
        }
        if y + 1 < canvas.height() {
            stack.push((x, y + 1));
        }
    }

    trace!(filled, "flood fill completed");
    filled
}
