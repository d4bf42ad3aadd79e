//! Colouring algorithms.

use std::{fmt, str::FromStr};

use crate::{error::Error, pixel::Pixel};

/// Iteration count to pixel colour strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Palette {
    /// See [`polynomial`].
    #[default]
    Polynomial,
    /// See [`banded`].
    Banded,
}

impl Palette {
    #[inline]
    pub fn colour(self, iteration_count: u32, max_iter: u32) -> Pixel {
        match self {
            Palette::Polynomial => polynomial(iteration_count, max_iter),
            Palette::Banded => banded(iteration_count, max_iter),
        }
    }
}

impl FromStr for Palette {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "polynomial" | "poly" => Ok(Palette::Polynomial),
            "banded" | "bands" => Ok(Palette::Banded),
            _ => Err(Error::UnknownPalette(s.to_string())),
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Palette::Polynomial => write!(f, "polynomial"),
            Palette::Banded => write!(f, "banded"),
        }
    }
}

/**
Smooth polynomial palette.

With `t = iteration_count / max_iter`:

* red = `9 (1 - t) t³`
* green = `15 (1 - t)² t²`
* blue = `8.5 (1 - t)³ t`

each scaled to `[0, 255]` and truncated. Every channel has roots at `t = 0` and
`t = 1`, so points that escape immediately and points assumed inside the set
are both opaque black.
*/
pub fn polynomial(iteration_count: u32, max_iter: u32) -> Pixel {
    let t = iteration_count as f64 / max_iter as f64;
    let u = 1.0 - t;

    Pixel::opaque(
        (9.0 * u * t * t * t * 255.0) as u8,
        (15.0 * u * u * t * t * 255.0) as u8,
        (8.5 * u * u * u * t * 255.0) as u8,
    )
}

/// Colours per channel in [`banded`].
const BANDS: u32 = 256;

/**
Integer banding palette.

Scales `t = iteration_count / max_iter` onto `[0, 256³)` and splits the result
into three base-256 digits: `(middle, low, high)` become `(red, green, blue)`.
`t = 1` is clamped to the last colour so the top digit stays within a byte.
*/
pub fn banded(iteration_count: u32, max_iter: u32) -> Pixel {
    let cube = BANDS * BANDS * BANDS;
    let t = iteration_count as f64 / max_iter as f64;
    let n = ((t * cube as f64) as u32).min(cube - 1);

    let high = n / (BANDS * BANDS);
    let rest = n - high * BANDS * BANDS;
    let middle = rest / BANDS;
    let low = rest - middle * BANDS;

    Pixel::opaque(middle as u8, low as u8, high as u8)
}
