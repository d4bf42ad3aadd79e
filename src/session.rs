/*!
The interactive render context.

A [`Session`] owns the view bounds, the grid size, the scale factors derived
from both, the pixel buffer and the worker pool. Every view mutation refreshes
the scale factors before returning, and both mutation and rendering take
`&mut self`, so a view change can never overlap a frame in flight.
*/

use log::{debug, trace, warn};

use crate::{
    colour::Palette,
    config::Config,
    coords::Complex,
    error::Error,
    kernel::{InstructionSet, Kernel},
    pixel::Pixel,
    render::{self, Frame},
    screen,
    view::{ScaleFactors, ViewBounds, ZoomDirection},
};

pub struct Session {
    initial_bounds: ViewBounds,
    bounds: ViewBounds,
    size: screen::Size,
    factors: ScaleFactors,
    max_iter: u32,
    instruction_set: InstructionSet,
    palette: Palette,
    pixels: Vec<Pixel>,
    pool: rayon::ThreadPool,
    last_instruction_set: Option<InstructionSet>,
    warned_fallback: bool,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self, Error> {
        config.validate()?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|index| format!("mandelbrot-row-{}", index))
            .build()?;

        debug!(
            "session {}x{}, max_iter {}, {} requested, {} worker threads",
            config.size.width(),
            config.size.height(),
            config.max_iter,
            config.instruction_set,
            pool.current_num_threads()
        );

        Ok(Self {
            initial_bounds: config.bounds,
            bounds: config.bounds,
            size: config.size,
            factors: ScaleFactors::new(&config.bounds, config.size),
            max_iter: config.max_iter,
            instruction_set: config.instruction_set,
            palette: config.palette,
            pixels: vec![Pixel::default(); config.size.pixel_count()],
            pool,
            last_instruction_set: None,
            warned_fallback: false,
        })
    }

    pub fn bounds(&self) -> ViewBounds {
        self.bounds
    }

    pub fn size(&self) -> screen::Size {
        self.size
    }

    pub fn factors(&self) -> ScaleFactors {
        self.factors
    }

    pub fn max_iter(&self) -> u32 {
        self.max_iter
    }

    /// Row-major, `width * height` pixels, complete as of the last [`Session::render`].
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// The backend the last frame actually ran on.
    pub fn last_instruction_set(&self) -> Option<InstructionSet> {
        self.last_instruction_set
    }

    pub fn frame(&self) -> Frame {
        Frame {
            bounds: self.bounds,
            factors: self.factors,
            size: self.size,
            max_iter: self.max_iter,
        }
    }

    /// Recompute every pixel for the current view.
    pub fn render(&mut self) {
        let kernel = self.kernel();
        let frame = self.frame();
        let palette = self.palette;
        let pixels = &mut self.pixels;

        self.pool
            .install(|| render::render(&frame, &kernel, palette, pixels));
    }

    /// The escape-time count of every pixel for the current view, row-major.
    pub fn iteration_field(&mut self) -> Vec<u32> {
        let kernel = self.kernel();
        let frame = self.frame();
        let mut counts = vec![0; self.size.pixel_count()];

        self.pool
            .install(|| render::render_iterations(&frame, &kernel, &mut counts));
        counts
    }

    pub fn zoom(&mut self, focal: Complex, direction: ZoomDirection) {
        self.bounds.zoom(focal, direction);
        self.refresh_factors();
    }

    /// Zoom around the plane point under pixel `(x, y)`.
    pub fn zoom_at(&mut self, x: f64, y: f64, direction: ZoomDirection) {
        let focal = self.bounds.pixel_to_plane(self.size, x, y);
        self.zoom(focal, direction);
    }

    /// Pan by a drag of `(dx, dy)` pixels.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.bounds.pan(self.size, dx, dy);
        self.refresh_factors();
    }

    /// Resize the grid, reallocating the pixel buffer. The view bounds stay put.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        let size = screen::Size::new(width, height)?;
        if size != self.size {
            self.size = size;
            self.pixels = vec![Pixel::default(); size.pixel_count()];
            self.refresh_factors();
            debug!("resized to {}x{}", width, height);
        }
        Ok(())
    }

    /// Back to the bounds the session started with.
    pub fn reset(&mut self) {
        self.bounds = self.initial_bounds;
        self.refresh_factors();
    }

    fn refresh_factors(&mut self) {
        self.factors = ScaleFactors::new(&self.bounds, self.size);
        trace!("bounds {:?}, factors {:?}", self.bounds, self.factors);
    }

    fn kernel(&mut self) -> Kernel {
        let kernel = Kernel::detect(self.instruction_set);
        if kernel.instruction_set() != self.instruction_set && !self.warned_fallback {
            warn!(
                "{} is not available on this processor, rendering with {}",
                self.instruction_set,
                kernel.instruction_set()
            );
            self.warned_fallback = true;
        }
        self.last_instruction_set = Some(kernel.instruction_set());
        kernel
    }
}
