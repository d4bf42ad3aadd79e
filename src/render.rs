//! Full-frame driver: rows across the worker pool, one kernel call per group.

use std::time::Instant;

use log::debug;
use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSliceMut};

use crate::{
    colour::Palette,
    kernel::Kernel,
    pixel::Pixel,
    screen,
    view::{ScaleFactors, ViewBounds},
};

/// Everything a kernel reads while a frame is in flight.
///
/// The scale factors are derived in [`Frame::new`], so they can't be stale
/// relative to the bounds and size they travel with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub bounds: ViewBounds,
    pub factors: ScaleFactors,
    pub size: screen::Size,
    pub max_iter: u32,
}

impl Frame {
    pub fn new(bounds: ViewBounds, size: screen::Size, max_iter: u32) -> Self {
        Self {
            bounds,
            factors: ScaleFactors::new(&bounds, size),
            size,
            max_iter,
        }
    }

    pub fn width(&self) -> usize {
        self.size.width() as usize
    }
}

/**
Overwrite every pixel of `pixels` with the colour of its escape-time count.

`pixels` is row-major, `frame.size.pixel_count()` long. Rows are
handed out one at a time on the current [`rayon`] pool, so workers that finish
cheap rows steal the remaining expensive ones. Each row only writes its own
`width` pixels.
*/
pub fn render(frame: &Frame, kernel: &Kernel, palette: Palette, pixels: &mut [Pixel]) {
    debug_assert_eq!(pixels.len(), frame.size.pixel_count());

    let start = Instant::now();
    let width = frame.width();
    let max_iter = frame.max_iter;

    pixels
        .par_chunks_mut(width)
        .with_max_len(1)
        .enumerate()
        .for_each_init(
            || vec![0u32; width],
            |counts, (y, row)| {
                kernel.fill_row(frame, y as u32, counts);
                for (pixel, &count) in row.iter_mut().zip(counts.iter()) {
                    *pixel = palette.colour(count, max_iter);
                }
            },
        );

    debug!(
        "rendered {}x{} with {} ({} lanes) in {:?}",
        frame.size.width(),
        frame.size.height(),
        kernel.instruction_set(),
        kernel.lanes(),
        start.elapsed()
    );
}

/// Like [`render`], but keeps the raw escape-time counts.
pub fn render_iterations(frame: &Frame, kernel: &Kernel, counts: &mut [u32]) {
    debug_assert_eq!(counts.len(), frame.size.pixel_count());

    counts
        .par_chunks_mut(frame.width())
        .with_max_len(1)
        .enumerate()
        .for_each(|(y, row)| kernel.fill_row(frame, y as u32, row));
}
