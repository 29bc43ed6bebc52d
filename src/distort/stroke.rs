//! Anti-aliased strokes of arbitrary width.
//!
//! Wide strokes are built from parallel Wu lines spaced one pixel apart along
//! the segment normal.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_antialiased_line_segment_mut;
use imageproc::pixelops::interpolate;
use rand::{Rng, RngCore};

/// Strokes consecutive points as one connected path.
pub(crate) fn stroke_polyline(
    canvas: &mut RgbImage,
    points: &[(f64, f64)],
    width: f64,
    color: Rgb<u8>,
) {
    for pair in points.windows(2) {
        stroke_segment(canvas, pair[0], pair[1], width, color);
    }
}

pub(crate) fn stroke_segment(
    canvas: &mut RgbImage,
    from: (f64, f64),
    to: (f64, f64),
    width: f64,
    color: Rgb<u8>,
) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let length = dx.hypot(dy);
    if length < f64::EPSILON {
        put_pixel_checked(canvas, f64_to_i32(from.0), f64_to_i32(from.1), color);
        return;
    }

    let (nx, ny) = (-dy / length, dx / length);
    let passes = f64_to_u32(width.round()).max(1);
    let centre = f64::from(passes - 1) / 2.0;

    for pass in 0..passes {
        let offset = f64::from(pass) - centre;
        let start = (
            f64_to_i32(nx.mul_add(offset, from.0)),
            f64_to_i32(ny.mul_add(offset, from.1)),
        );
        let end = (
            f64_to_i32(nx.mul_add(offset, to.0)),
            f64_to_i32(ny.mul_add(offset, to.1)),
        );
        if start == end {
            put_pixel_checked(canvas, start.0, start.1, color);
        } else {
            draw_antialiased_line_segment_mut(canvas, start, end, color, interpolate);
        }
    }
}

/// Writes a pixel, ignoring coordinates outside the canvas.
pub(crate) fn put_pixel_checked(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    let (width, height) = canvas.dimensions();
    if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y))
        && x < width
        && y < height
    {
        canvas.put_pixel(x, y, color);
    }
}

/// Uniform integer in `0..bound`, or 0 when the range is empty.
pub(crate) fn below(rng: &mut dyn RngCore, bound: u32) -> u32 {
    if bound == 0 { 0 } else { rng.random_range(0..bound) }
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn f64_to_i32(val: f64) -> i32 {
    val.round() as i32
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn f64_to_u32(val: f64) -> u32 {
    val.max(0.0) as u32
}
