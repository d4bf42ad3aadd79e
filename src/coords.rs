//! Pixel to complex plane mapping.

use std::ops::{Add, Mul};

/// A point on the complex plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Complex {
    pub real: f64,
    pub imaginary: f64,
}

impl Complex {
    pub const ZERO: Self = Complex {
        real: 0.0,
        imaginary: 0.0,
    };

    pub fn new(real: f64, imaginary: f64) -> Self {
        Self { real, imaginary }
    }
}

/// Affine remap of `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// `in_min == in_max` divides by zero; callers keep their spans non-empty.
pub fn map(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}

/**
Pixel index to plane coordinate with a pre-divided `factor`.

With `factor = (out_max - out_min) / in_max` and `offset = out_min` this is
[`map`] for `in_min = 0`, minus the per-pixel division. Every kernel maps its
pixels with this form (in its own float width, multiply then add), so the
scalar and vector paths see bit-identical coordinates.
*/
#[inline(always)]
pub fn map_scaled<T>(index: T, factor: T, offset: T) -> T
where
    T: Mul<Output = T> + Add<Output = T>,
{
    index * factor + offset
}
