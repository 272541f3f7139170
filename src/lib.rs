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
#![allow(clippy::too_many_arguments)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod colorfx;
mod composite;
mod curves;
mod edge_mode;
mod film_grain;
mod filter_2d;
mod gaussian;
mod image;
pub mod matrix;
mod progress;
pub mod refocus;
mod safe_math;
mod sample;
mod threading_policy;
mod unsharp;
mod util;

pub use colorfx::{
    apply_lut3d, neon_edges, solarize, vivid, EdgeEffect, Lut3d, Lut3dInterpolation, NeonParams,
    SolarizeMode, MAX_LUT_SIZE,
};
pub use composite::{blend_over, mix_percent};
pub use curves::{apply_tone_curve, ToneCurve, MAX_CURVE_POINTS};
pub use edge_mode::EdgeMode;
pub use film_grain::{film_grain, FilmGrainParams};
pub use filter_2d::filter_2d;
pub use gaussian::{gaussian_blur, LookupTable, SeparableBlurKernel};
pub use image::{AlphaMode, BufferStore, RetouchImage, RetouchImageMut, CHANNELS};
pub use progress::{ProgressHook, Status};
pub use refocus::{refocus, RefocusParams};
pub use sample::{BitDepth, Sample};
pub use threading_policy::ThreadingPolicy;
pub use unsharp::{unsharp_mask, UnsharpParams};
pub use util::{MismatchedSize, RetouchError};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[test]
    fn test_pipeline_on_borrowed_buffers() {
        let width = 24u32;
        let height = 16u32;
        let src: Vec<u8> = (0..width as usize * height as usize * CHANNELS)
            .map(|x| (x * 13 % 256) as u8)
            .collect();
        let src_image = RetouchImage::borrow(&src, width, height);
        let mut sharpened = vec![0u8; src.len()];
        let mut dst = RetouchImageMut::borrow(&mut sharpened, width, height);
        let status = unsharp_mask(
            &src_image,
            &mut dst,
            UnsharpParams::new(1.5, 0.7, 0.05),
            ThreadingPolicy::Adaptive,
            &ProgressHook::none(),
        )
        .unwrap();
        assert!(status.is_completed());

        let sharpened_image = dst.to_immutable_ref();
        let mut refocused = RetouchImageMut::default();
        let status = refocus(
            &sharpened_image,
            &mut refocused,
            RefocusParams::default(),
            ThreadingPolicy::Single,
            &ProgressHook::none(),
        )
        .unwrap();
        assert_eq!(status, Status::Completed);
        assert_eq!(refocused.width, width);
        assert_eq!(refocused.height, height);
    }

    #[test]
    fn test_progress_reaches_hundred() {
        let seen = Mutex::new(Vec::new());
        let callback = |p: u8| seen.lock().unwrap().push(p);
        let hook = ProgressHook::default().with_callback(&callback);
        let src = vec![77u16; 10 * 10 * CHANNELS];
        let src_image = RetouchImage::borrow(&src, 10, 10);
        let mut dst = RetouchImageMut::default();
        let status = film_grain(
            &src_image,
            &mut dst,
            FilmGrainParams::new(800, 1),
            ThreadingPolicy::Single,
            &hook,
        )
        .unwrap();
        assert_eq!(status, Status::Completed);
        let seen = seen.lock().unwrap();
        assert!(seen.windows(2).all(|w| w[0] < w[1]), "{seen:?}");
        assert_eq!(seen.last(), Some(&100));
    }

    #[test]
    fn test_single_pixel_and_single_line_images() {
        for (width, height) in [(1u32, 1u32), (1, 7), (7, 1)] {
            let mut src = vec![100u8; width as usize * height as usize * CHANNELS];
            for px in src.chunks_exact_mut(CHANNELS) {
                px[3] = 255;
            }
            let src_image = RetouchImage::borrow(&src, width, height);
            let hook = ProgressHook::none();
            let policy = ThreadingPolicy::Single;
            let assert_near = |dst: &RetouchImageMut<u8>, what: &str| {
                assert_eq!((dst.width, dst.height), (width, height), "{what}");
                for px in dst.data.borrow().chunks_exact(CHANNELS) {
                    for &v in &px[..3] {
                        let diff = (v as i32 - 100).abs();
                        assert!(diff <= 1, "{what} on {width}x{height} gave {v}");
                    }
                    assert_eq!(px[3], 255, "{what}");
                }
            };

            let mut dst = RetouchImageMut::default();
            let status =
                gaussian_blur(&src_image, &mut dst, 2.5, AlphaMode::Preserve, policy, &hook)
                    .unwrap();
            assert_eq!(status, Status::Completed);
            assert_near(&dst, "gaussian blur");

            let params = UnsharpParams::new(2., 1., 0.);
            let status = unsharp_mask(&src_image, &mut dst, params, policy, &hook).unwrap();
            assert_eq!(status, Status::Completed);
            assert_near(&dst, "unsharp mask");

            for edge_mode in [EdgeMode::Clip, EdgeMode::Clamp, EdgeMode::Reflect] {
                let params = RefocusParams {
                    edge_mode,
                    ..Default::default()
                };
                let status = refocus(&src_image, &mut dst, params, policy, &hook).unwrap();
                assert_eq!(status, Status::Completed);
                if edge_mode != EdgeMode::Clip {
                    assert_near(&dst, "refocus");
                }
            }

            let params = NeonParams::new(EdgeEffect::Neon, 3, 2);
            let status = neon_edges(&src_image, &mut dst, params, policy, &hook).unwrap();
            assert_eq!(status, Status::Completed);
            for px in dst.data.borrow().chunks_exact(CHANNELS) {
                assert_eq!(px, &[0, 0, 0, 255]);
            }
        }
    }

    #[test]
    fn test_cancelled_operations() {
        let flag = AtomicBool::new(false);
        flag.store(true, Ordering::Relaxed);
        let hook = ProgressHook::default().with_cancel_flag(&flag);
        let src = vec![1u8; 4 * 4 * CHANNELS];
        let src_image = RetouchImage::borrow(&src, 4, 4);
        let mut dst = RetouchImageMut::default();
        assert_eq!(
            gaussian_blur(
                &src_image,
                &mut dst,
                3.,
                AlphaMode::Process,
                ThreadingPolicy::Single,
                &hook
            ),
            Ok(Status::Cancelled)
        );
        assert_eq!(
            solarize(
                &src_image,
                &mut dst,
                20,
                SolarizeMode::Stretch,
                ThreadingPolicy::Single,
                &hook
            ),
            Ok(Status::Cancelled)
        );
        assert_eq!(
            refocus(
                &src_image,
                &mut dst,
                RefocusParams::default(),
                ThreadingPolicy::Single,
                &hook
            ),
            Ok(Status::Cancelled)
        );
    }
}
