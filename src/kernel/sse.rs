//! Four-lane single-precision kernel (SSE2, part of the x86_64 baseline).
//!
//! Lane `i` of every vector holds pixel `x + i` of the current group.

use std::arch::x86_64::*;

use super::scalar;
use crate::{coords::map_scaled, render::Frame};

/// Pixels per kernel call.
pub const LANES: usize = 4;

/// Vector form of [`map_scaled`], lane by lane.
#[inline(always)]
pub fn map_x4(index: __m128, factor: f32, offset: f32) -> __m128 {
    unsafe { _mm_add_ps(_mm_mul_ps(index, _mm_set1_ps(factor)), _mm_set1_ps(offset)) }
}

/**
Escape-time counts of four points at once.

Each lane stops advancing (both `z` and its count) on the first iteration where
its `|z|² > 4`, so every lane ends with the count [`scalar::escape_time`] gives
for the same `f32` inputs. The loop exits early once all four lanes diverged.
*/
#[inline]
pub fn escape_time_x4(cx: __m128, cy: __m128, max_iter: u32) -> __m128i {
    unsafe {
        let four = _mm_set1_ps(4.0);
        let mut x = _mm_setzero_ps();
        let mut y = _mm_setzero_ps();
        let mut counts = _mm_setzero_si128();

        for _ in 0..max_iter {
            let xx = _mm_mul_ps(x, x);
            let yy = _mm_mul_ps(y, y);
            let active = _mm_cmple_ps(_mm_add_ps(xx, yy), four);
            if _mm_movemask_ps(active) == 0 {
                break;
            }

            // Active lanes are all ones, i.e. -1.
            counts = _mm_sub_epi32(counts, _mm_castps_si128(active));

            let xy = _mm_mul_ps(x, y);
            let next_y = _mm_add_ps(_mm_add_ps(xy, xy), cy);
            let next_x = _mm_add_ps(_mm_sub_ps(xx, yy), cx);
            x = select(active, next_x, x);
            y = select(active, next_y, y);
        }

        counts
    }
}

/// Lanes of `mask` set take `if_set`, the others `if_clear`.
#[inline(always)]
fn select(mask: __m128, if_set: __m128, if_clear: __m128) -> __m128 {
    unsafe { _mm_or_ps(_mm_and_ps(mask, if_set), _mm_andnot_ps(mask, if_clear)) }
}

/// Counts in lane order: element `i` is lane `i`.
#[inline]
pub fn extract_lanes(counts: __m128i) -> [u32; LANES] {
    let mut lanes = [0u32; LANES];
    unsafe { _mm_storeu_si128(lanes.as_mut_ptr().cast(), counts) };
    lanes
}

/// Fills a row four pixels at a time; the last `width % 4` pixels go through
/// the `f32` scalar kernel.
pub fn fill_row(frame: &Frame, y: u32, counts: &mut [u32]) {
    let x_factor = frame.factors.x as f32;
    let min_x = frame.bounds.min_x as f32;
    let cy_scalar = map_scaled(y as f32, frame.factors.y as f32, frame.bounds.min_y as f32);

    let aligned = counts.len() - counts.len() % LANES;
    let (groups, remainder) = counts.split_at_mut(aligned);

    let (cy, lane_offsets) = unsafe { (_mm_set1_ps(cy_scalar), _mm_set_ps(3.0, 2.0, 1.0, 0.0)) };
    for (group, chunk) in groups.chunks_exact_mut(LANES).enumerate() {
        let x = (group * LANES) as f32;
        let vx = unsafe { _mm_add_ps(lane_offsets, _mm_set1_ps(x)) };
        let cx = map_x4(vx, x_factor, min_x);
        chunk.copy_from_slice(&extract_lanes(escape_time_x4(cx, cy, frame.max_iter)));
    }

    scalar::fill_span_f32(frame, cy_scalar, aligned, remainder);
}
