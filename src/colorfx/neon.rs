/*
 * // Copyright (c) Radzivon Bartoshyk 2/2025. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::colorfx::process_pixels;
use crate::image::CHANNELS;
use crate::{
    ProgressHook, RetouchError, RetouchImage, RetouchImageMut, Sample, Status, ThreadingPolicy,
};

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Default, Hash)]
pub enum EdgeEffect {
    /// Glowing edges on black
    #[default]
    Neon,
    /// Dark edges on white, inverted neon
    FindEdges,
}

/// Parameters of [neon_edges], out of range values are clamped.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct NeonParams {
    pub effect: EdgeEffect,
    /// Gain exponent, edge strength is multiplied by `sqrt(2^intensity)`. `0..=5`.
    pub intensity: i32,
    /// Distance to the compared neighbours. `1..=5`.
    pub border_width: i32,
}

impl Default for NeonParams {
    fn default() -> Self {
        NeonParams {
            effect: EdgeEffect::Neon,
            intensity: 3,
            border_width: 2,
        }
    }
}

impl NeonParams {
    pub fn new(effect: EdgeEffect, intensity: i32, border_width: i32) -> NeonParams {
        NeonParams {
            effect,
            intensity,
            border_width,
        }
    }
}

/// Step towards the neighbour, shrinks so `position + step` stays inside `len`.
#[inline]
fn neighbour_step(position: usize, border_width: usize, len: usize) -> usize {
    border_width.min(len - 1 - position)
}

/// Highlights edges by the difference with the right and the lower neighbour.
///
/// Colour channels become `sqrt(dh² + dv²) * sqrt(2^intensity)`, truncated and clamped,
/// [EdgeEffect::FindEdges] writes `MAX` minus that. Alpha is copied.
pub fn neon_edges<T: Sample>(
    src: &RetouchImage<T>,
    dst: &mut RetouchImageMut<T>,
    params: NeonParams,
    threading_policy: ThreadingPolicy,
    hook: &ProgressHook,
) -> Result<Status, RetouchError> {
    let intensity = params.intensity.clamp(0, 5);
    let border_width = params.border_width.clamp(1, 5) as usize;
    let factor = ((1u32 << intensity) as f64).sqrt();
    let width = src.width as usize;
    let height = src.height as usize;
    let max = T::MAX as i64;

    process_pixels(src, dst, threading_policy, hook, |x, y, px, dst| {
        let right_x = x + neighbour_step(x, border_width, width);
        let below_y = y + neighbour_step(y, border_width, height);
        let right = &src.row(y)[right_x * CHANNELS..right_x * CHANNELS + CHANNELS];
        let below = &src.row(below_y)[x * CHANNELS..x * CHANNELS + CHANNELS];
        for c in 0..3 {
            let point: u32 = px[c].as_();
            let other_h: u32 = right[c].as_();
            let other_v: u32 = below[c].as_();
            let dh = point as i64 - other_h as i64;
            let dv = point as i64 - other_v as i64;
            let value = (((dh * dh + dv * dv) as f64).sqrt() * factor) as i64;
            let value = value.clamp(0, max);
            dst[c] = match params.effect {
                EdgeEffect::Neon => T::from_i64_clamped(value),
                EdgeEffect::FindEdges => T::from_i64_clamped(max - value),
            };
        }
        dst[3] = px[3];
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<T: Sample>(data: &[T], width: u32, height: u32, params: NeonParams) -> Vec<T> {
        let src = RetouchImage::borrow(data, width, height);
        let mut dst = RetouchImageMut::default();
        let status = neon_edges(
            &src,
            &mut dst,
            params,
            ThreadingPolicy::Single,
            &ProgressHook::none(),
        )
        .unwrap();
        assert_eq!(status, Status::Completed);
        dst.data.borrow().to_vec()
    }

    #[test]
    fn test_neighbour_step() {
        assert_eq!(neighbour_step(0, 3, 10), 3);
        assert_eq!(neighbour_step(8, 3, 10), 1);
        assert_eq!(neighbour_step(9, 3, 10), 0);
    }

    #[test]
    fn test_flat_image() {
        let data = vec![120u8; 4 * 3 * CHANNELS];
        let neon = run(&data, 4, 3, NeonParams::new(EdgeEffect::Neon, 2, 1));
        for px in neon.chunks_exact(CHANNELS) {
            assert_eq!(px, &[0, 0, 0, 120]);
        }
        let edges = run(&data, 4, 3, NeonParams::new(EdgeEffect::FindEdges, 2, 1));
        for px in edges.chunks_exact(CHANNELS) {
            assert_eq!(px, &[255, 255, 255, 120]);
        }
    }

    #[test]
    fn test_vertical_edge() {
        // 3x1 image 10 | 40 | 40, border width 1, intensity 0
        let data = [10u8, 10, 10, 255, 40, 40, 40, 255, 40, 40, 40, 255];
        let out = run(&data, 3, 1, NeonParams::new(EdgeEffect::Neon, 0, 1));
        assert_eq!(&out[..4], &[30, 30, 30, 255]);
        assert_eq!(&out[4..], &[0, 0, 0, 255, 0, 0, 0, 255]);
        // sqrt(900 * 2^2) = 60
        let out = run(&data, 3, 1, NeonParams::new(EdgeEffect::Neon, 2, 1));
        assert_eq!(out[0], 60);
    }

    #[test]
    fn test_out_of_range_parameters_are_clamped() {
        let data = [0u16, 0, 0, 0, 65535, 65535, 65535, 0];
        let strong = run(&data, 2, 1, NeonParams::new(EdgeEffect::FindEdges, 40, -3));
        assert_eq!(&strong[..3], &[0, 0, 0]);
        let clamped = run(&data, 2, 1, NeonParams::new(EdgeEffect::FindEdges, 5, 1));
        assert_eq!(strong, clamped);
    }
}
