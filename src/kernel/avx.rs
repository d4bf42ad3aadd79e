/*!
Sixteen-wide double-precision kernel (AVX).

A group of 16 consecutive pixels of one row is split into four 256-bit vectors
of four `f64` lanes. Vector `v`, lane `i` holds pixel `x + 4v + i`, and
[`escape_time_x16`] returns the counts in that order.

Everything here requires AVX; the only way in from safe code is
[`super::Kernel`], which selects [`fill_row`] after the capability probe
succeeded.
*/

use std::arch::x86_64::*;

use super::scalar;
use crate::{coords::map_scaled, render::Frame};

/// Pixels per kernel call.
pub const LANES: usize = 16;

/// `f64` lanes per 256-bit vector.
const WIDTH: usize = 4;

#[inline]
#[target_feature(enable = "avx")]
unsafe fn map_x4(index: __m256d, factor: f64, offset: f64) -> __m256d {
    _mm256_add_pd(_mm256_mul_pd(index, _mm256_set1_pd(factor)), _mm256_set1_pd(offset))
}

/**
Escape-time counts of four points, as `f64` lanes.

Same masking as the four-lane `f32` kernel: a lane that diverged keeps its `z`
and its count frozen while the others iterate on.

# Safety

The processor must support AVX.
*/
#[inline]
#[target_feature(enable = "avx")]
pub unsafe fn escape_time_f64x4(cx: __m256d, cy: __m256d, max_iter: u32) -> __m256d {
    let four = _mm256_set1_pd(4.0);
    let one = _mm256_set1_pd(1.0);
    let mut x = _mm256_setzero_pd();
    let mut y = _mm256_setzero_pd();
    let mut counts = _mm256_setzero_pd();

    for _ in 0..max_iter {
        let xx = _mm256_mul_pd(x, x);
        let yy = _mm256_mul_pd(y, y);
        let active = _mm256_cmp_pd(_mm256_add_pd(xx, yy), four, _CMP_LE_OQ);
        if _mm256_movemask_pd(active) == 0 {
            break;
        }

        counts = _mm256_add_pd(counts, _mm256_and_pd(active, one));

        let xy = _mm256_mul_pd(x, y);
        let next_y = _mm256_add_pd(_mm256_add_pd(xy, xy), cy);
        let next_x = _mm256_add_pd(_mm256_sub_pd(xx, yy), cx);
        x = _mm256_blendv_pd(x, next_x, active);
        y = _mm256_blendv_pd(y, next_y, active);
    }

    counts
}

/// Counts in lane order: element `i` is lane `i`.
///
/// # Safety
///
/// The processor must support AVX.
#[inline]
#[target_feature(enable = "avx")]
pub unsafe fn extract_lanes(counts: __m256d) -> [u32; WIDTH] {
    let mut lanes = [0f64; WIDTH];
    _mm256_storeu_pd(lanes.as_mut_ptr(), counts);
    [
        lanes[0] as u32,
        lanes[1] as u32,
        lanes[2] as u32,
        lanes[3] as u32,
    ]
}

/// Counts of 16 points sharing one `cy`, as four independent four-lane runs.
///
/// # Safety
///
/// The processor must support AVX.
#[target_feature(enable = "avx")]
pub unsafe fn escape_time_x16(cx: [__m256d; 4], cy: __m256d, max_iter: u32) -> [u32; LANES] {
    let mut counts = [0u32; LANES];
    for (chunk, cx) in counts.chunks_exact_mut(WIDTH).zip(cx) {
        chunk.copy_from_slice(&extract_lanes(escape_time_f64x4(cx, cy, max_iter)));
    }
    counts
}

#[target_feature(enable = "avx")]
unsafe fn fill_row_avx(frame: &Frame, y: u32, counts: &mut [u32]) {
    let x_factor = frame.factors.x;
    let min_x = frame.bounds.min_x;
    let cy_scalar = map_scaled(y as f64, frame.factors.y, frame.bounds.min_y);
    let cy = _mm256_set1_pd(cy_scalar);

    let step = _mm256_set1_pd(WIDTH as f64);
    let lane_offsets = _mm256_set_pd(3.0, 2.0, 1.0, 0.0);

    let aligned = counts.len() - counts.len() % LANES;
    let (groups, remainder) = counts.split_at_mut(aligned);

    for (group, chunk) in groups.chunks_exact_mut(LANES).enumerate() {
        let mut vx = _mm256_add_pd(lane_offsets, _mm256_set1_pd((group * LANES) as f64));
        let mut cx = [_mm256_setzero_pd(); 4];
        for lane in cx.iter_mut() {
            *lane = map_x4(vx, x_factor, min_x);
            vx = _mm256_add_pd(vx, step);
        }
        chunk.copy_from_slice(&escape_time_x16(cx, cy, frame.max_iter));
    }

    scalar::fill_span_f64(frame, cy_scalar, aligned, remainder);
}

/// Fills a row sixteen pixels at a time; the last `width % 16` pixels go
/// through the `f64` scalar kernel.
pub(super) fn fill_row(frame: &Frame, y: u32, counts: &mut [u32]) {
    debug_assert!(crate::cpu::supports_wide_vector());
    // Only handed out by `Kernel::select` once AVX support was confirmed.
    unsafe { fill_row_avx(frame, y, counts) }
}
