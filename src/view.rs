//! The rendered region of the complex plane, and how pan/zoom move it.

use log::trace;

use crate::{
    coords::{self, Complex},
    error::Error,
    screen,
};

/// Bound scale applied by one zoom step towards the focal point.
pub const ZOOM_IN_FACTOR: f64 = 0.8;

/// Bound scale applied by one zoom step away from the focal point.
pub const ZOOM_OUT_FACTOR: f64 = 1.2;

/// Fraction of a drag's plane-space distance that a pan moves the view.
pub const PAN_DAMPING: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    pub fn factor(self) -> f64 {
        match self {
            ZoomDirection::In => ZOOM_IN_FACTOR,
            ZoomDirection::Out => ZOOM_OUT_FACTOR,
        }
    }
}

/// Axis-aligned rectangle of the complex plane. `min < max` on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl ViewBounds {
    /// The whole set: `[-2, 2] x [-2, 2]`.
    pub const DEFAULT: Self = ViewBounds {
        min_x: -2.0,
        max_x: 2.0,
        min_y: -2.0,
        max_y: 2.0,
    };

    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Result<Self, Error> {
        let bounds = Self {
            min_x,
            max_x,
            min_y,
            max_y,
        };
        if bounds.is_valid() {
            Ok(bounds)
        } else {
            Err(Error::InvalidBounds(bounds))
        }
    }

    pub fn is_valid(&self) -> bool {
        [self.min_x, self.max_x, self.min_y, self.max_y]
            .iter()
            .all(|bound| bound.is_finite())
            && self.min_x < self.max_x
            && self.min_y < self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Plane coordinate under pixel `(x, y)` of a grid of `size`.
    pub fn pixel_to_plane(&self, size: screen::Size, x: f64, y: f64) -> Complex {
        Complex {
            real: coords::map(x, 0.0, size.width() as f64, self.min_x, self.max_x),
            imaginary: coords::map(y, 0.0, size.height() as f64, self.min_y, self.max_y),
        }
    }

    /// Rescale every bound towards (in) or away from (out) `focal`.
    pub fn zoom(&mut self, focal: Complex, direction: ZoomDirection) {
        let factor = direction.factor();
        let rescale = |bound: f64, centre: f64| centre + factor * (bound - centre);

        self.min_x = rescale(self.min_x, focal.real);
        self.max_x = rescale(self.max_x, focal.real);
        self.min_y = rescale(self.min_y, focal.imaginary);
        self.max_y = rescale(self.max_y, focal.imaginary);

        trace!("zoom {:?} at {:?} -> {:?}", direction, focal, self);
    }

    /**
    Translate the view by a damped drag of `(dx, dy)` pixels.

    Each pixel delta is mapped onto its own axis (`min_x`/`max_x` for `dx`,
    `min_y`/`max_y` for `dy`) and measured from that axis's minimum, which gives
    the plane-space length of the drag. The bounds then move by
    [`PAN_DAMPING`] times that length, keeping the drag's sign.
    */
    pub fn pan(&mut self, size: screen::Size, dx: f64, dy: f64) {
        let delta_x = coords::map(dx, 0.0, size.width() as f64, self.min_x, self.max_x) - self.min_x;
        let delta_y =
            coords::map(dy, 0.0, size.height() as f64, self.min_y, self.max_y) - self.min_y;

        let shift_x = delta_x * PAN_DAMPING;
        let shift_y = delta_y * PAN_DAMPING;

        self.min_x += shift_x;
        self.max_x += shift_x;
        self.min_y += shift_y;
        self.max_y += shift_y;

        trace!("pan by ({}, {}) px -> {:?}", dx, dy, self);
    }
}

impl Default for ViewBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Plane distance between neighbouring pixels on each axis.
///
/// Derived from a [`ViewBounds`] and a [`screen::Size`]; rebuild it whenever
/// either changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
}

impl ScaleFactors {
    pub fn new(bounds: &ViewBounds, size: screen::Size) -> Self {
        Self {
            x: bounds.width() / size.width() as f64,
            y: bounds.height() / size.height() as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn scale_factors_for_default_view() {
        let size = screen::Size::new(800, 800).unwrap();
        let factors = ScaleFactors::new(&ViewBounds::DEFAULT, size);
        assert_close(factors.x, 0.005);
        assert_close(factors.y, 0.005);
    }

    #[test]
    fn scale_factors_follow_aspect_ratio() {
        let size = screen::Size::new(400, 100).unwrap();
        let bounds = ViewBounds::new(-2.0, 1.0, -1.0, 1.0).unwrap();
        let factors = ScaleFactors::new(&bounds, size);
        assert_close(factors.x, 3.0 / 400.0);
        assert_close(factors.y, 2.0 / 100.0);
    }

    #[test]
    fn degenerate_bounds_are_rejected() {
        assert!(ViewBounds::new(1.0, 1.0, -1.0, 1.0).is_err());
        assert!(ViewBounds::new(-1.0, 1.0, 2.0, -2.0).is_err());
        assert!(ViewBounds::new(f64::NAN, 1.0, -1.0, 1.0).is_err());
        assert!(ViewBounds::new(-1.0, f64::INFINITY, -1.0, 1.0).is_err());
    }

    #[test]
    fn zoom_in_shrinks_towards_focal_point() {
        let mut bounds = ViewBounds::DEFAULT;
        bounds.zoom(Complex::ZERO, ZoomDirection::In);
        assert_close(bounds.min_x, -1.6);
        assert_close(bounds.max_x, 1.6);
        assert_close(bounds.min_y, -1.6);
        assert_close(bounds.max_y, 1.6);
    }

    #[test]
    fn zoom_keeps_focal_point_fixed() {
        let size = screen::Size::new(800, 600).unwrap();
        let mut bounds = ViewBounds::DEFAULT;
        let focal = bounds.pixel_to_plane(size, 200.0, 450.0);
        bounds.zoom(focal, ZoomDirection::Out);
        let after = bounds.pixel_to_plane(size, 200.0, 450.0);
        assert_close(after.real, focal.real);
        assert_close(after.imaginary, focal.imaginary);
    }

    #[test]
    fn zoom_in_then_out_drifts_by_compound_factor() {
        let original = ViewBounds::new(-1.5, 0.5, -0.75, 1.25).unwrap();
        let focal = Complex::new(-0.3, 0.2);

        let mut bounds = original;
        bounds.zoom(focal, ZoomDirection::In);
        bounds.zoom(focal, ZoomDirection::Out);

        let drift = ZOOM_IN_FACTOR * ZOOM_OUT_FACTOR;
        assert_close(drift, 0.96);
        assert_close(bounds.min_x, focal.real + drift * (original.min_x - focal.real));
        assert_close(bounds.max_x, focal.real + drift * (original.max_x - focal.real));
        assert_close(
            bounds.min_y,
            focal.imaginary + drift * (original.min_y - focal.imaginary),
        );
        assert_close(
            bounds.max_y,
            focal.imaginary + drift * (original.max_y - focal.imaginary),
        );
        assert_ne!(bounds, original);
    }

    #[test]
    fn zoom_preserves_ordering() {
        let mut bounds = ViewBounds::DEFAULT;
        let focal = Complex::new(5.0, -7.0);
        for _ in 0..50 {
            bounds.zoom(focal, ZoomDirection::In);
            assert!(bounds.is_valid());
        }
        for _ in 0..50 {
            bounds.zoom(focal, ZoomDirection::Out);
            assert!(bounds.is_valid());
        }
    }

    #[test]
    fn pan_translates_by_damped_plane_delta() {
        let size = screen::Size::new(800, 400).unwrap();
        let mut bounds = ViewBounds::new(-2.0, 2.0, -1.0, 1.0).unwrap();

        // 100 px is 0.5 on the x axis and 0.5 on the y axis.
        bounds.pan(size, 100.0, -100.0);

        assert_close(bounds.min_x, -2.0 + 0.025);
        assert_close(bounds.max_x, 2.0 + 0.025);
        assert_close(bounds.min_y, -1.0 - 0.025);
        assert_close(bounds.max_y, 1.0 - 0.025);
    }

    #[test]
    fn pan_uses_each_axis_own_span() {
        let size = screen::Size::new(100, 100).unwrap();
        let mut bounds = ViewBounds::new(0.0, 10.0, 0.0, 1.0).unwrap();
        bounds.pan(size, 10.0, 10.0);
        // 10 px is 1.0 on x and 0.1 on y.
        assert_close(bounds.min_x, 0.05);
        assert_close(bounds.min_y, 0.005);
        assert_close(bounds.width(), 10.0);
        assert_close(bounds.height(), 1.0);
    }

    #[test]
    fn zero_pan_is_a_no_op() {
        let size = screen::Size::new(640, 480).unwrap();
        let mut bounds = ViewBounds::DEFAULT;
        bounds.pan(size, 0.0, 0.0);
        assert_eq!(bounds, ViewBounds::DEFAULT);
    }
}
