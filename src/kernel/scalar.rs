//! Reference kernel: one point at a time.

use std::ops::{Add, Mul, Sub};

use crate::{coords::map_scaled, render::Frame};

/// Escape-time count of `c = cx + i·cy`, in `[0, max_iter]`.
///
/// The operation order (squares first, divergence test, then the update) is
/// the one the vector kernels use lane by lane.
#[inline]
pub fn escape_time<T>(cx: T, cy: T, max_iter: u32) -> u32
where
    T: Copy + PartialOrd + From<u8> + Add<Output = T> + Sub<Output = T> + Mul<Output = T>,
{
    let four = T::from(4);
    let mut x = T::from(0);
    let mut y = T::from(0);

    for n in 0..max_iter {
        let xx = x * x;
        let yy = y * y;
        if xx + yy > four {
            return n;
        }
        let xy = x * y;
        y = xy + xy + cy;
        x = xx - yy + cx;
    }

    max_iter
}

/// Fills a whole row with single-precision counts.
pub fn fill_row(frame: &Frame, y: u32, counts: &mut [u32]) {
    let cy = map_scaled(y as f32, frame.factors.y as f32, frame.bounds.min_y as f32);
    fill_span_f32(frame, cy, 0, counts);
}

/// Single-precision counts for pixels `start..start + counts.len()` of the row at `cy`.
pub(crate) fn fill_span_f32(frame: &Frame, cy: f32, start: usize, counts: &mut [u32]) {
    let x_factor = frame.factors.x as f32;
    let min_x = frame.bounds.min_x as f32;

    for (x, count) in (start..).zip(counts.iter_mut()) {
        let cx = map_scaled(x as f32, x_factor, min_x);
        *count = escape_time(cx, cy, frame.max_iter);
    }
}

/// Double-precision counts for pixels `start..start + counts.len()` of the row at `cy`.
pub(crate) fn fill_span_f64(frame: &Frame, cy: f64, start: usize, counts: &mut [u32]) {
    let x_factor = frame.factors.x;
    let min_x = frame.bounds.min_x;

    for (x, count) in (start..).zip(counts.iter_mut()) {
        let cx = map_scaled(x as f64, x_factor, min_x);
        *count = escape_time(cx, cy, frame.max_iter);
    }
}
