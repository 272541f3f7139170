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
use crate::image::{prepare_pair, ALPHA, CHANNELS};
use crate::matrix::CenteredMatrix;
use crate::progress::StageTracker;
use crate::{
    AlphaMode, EdgeMode, ProgressHook, RetouchError, RetouchImage, RetouchImageMut, Sample,
    Status, ThreadingPolicy,
};

#[derive(Debug, Copy, Clone)]
struct ScanPoint2d {
    x: isize,
    y: isize,
    weight: f64,
}

/// Non-zero taps of the kernel.
fn scan_kernel(kernel: &CenteredMatrix) -> Vec<ScanPoint2d> {
    let r = kernel.radius() as i32;
    let mut points = vec![];
    for y in -r..=r {
        for x in -r..=r {
            let weight = kernel.at(x, y);
            if weight != 0. {
                points.push(ScanPoint2d {
                    x: x as isize,
                    y: y as isize,
                    weight,
                });
            }
        }
    }
    points
}

/// Direct 2D convolution `out(x, y) = Σ k(i, j) · src(x + i, y + j)` with a centred kernel.
///
/// Sums are accumulated in `f64`, rounded to nearest and clamped into the sample range.
///
/// # Arguments
///
/// * `src`: Source image.
/// * `dst`: Destination image, owned destination is resized to the source.
/// * `kernel`: Kernel, not required to be normalized.
/// * `edge_mode`: How taps outside of the image are treated, see [EdgeMode] for more info.
/// * `alpha_mode`: Whether alpha is filtered or copied, see [AlphaMode].
/// * `threading_policy`: See [ThreadingPolicy] for more info.
/// * `hook`: Progress reporting and cancellation, see [ProgressHook].
///
pub fn filter_2d<T: Sample>(
    src: &RetouchImage<T>,
    dst: &mut RetouchImageMut<T>,
    kernel: &CenteredMatrix,
    edge_mode: EdgeMode,
    alpha_mode: AlphaMode,
    threading_policy: ThreadingPolicy,
    hook: &ProgressHook,
) -> Result<Status, RetouchError> {
    prepare_pair(src, dst)?;
    let stage = hook.stage(0, 100, src.height as usize);
    if stage.is_cancelled() {
        return Ok(Status::Cancelled);
    }
    filter_2d_rows(src, dst, kernel, edge_mode, alpha_mode, threading_policy, &stage);
    Ok(stage.status())
}

pub(crate) fn filter_2d_rows<T: Sample>(
    src: &RetouchImage<T>,
    dst: &mut RetouchImageMut<T>,
    kernel: &CenteredMatrix,
    edge_mode: EdgeMode,
    alpha_mode: AlphaMode,
    threading_policy: ThreadingPolicy,
    stage: &StageTracker,
) {
    let points = scan_kernel(kernel);
    let width = src.width as usize;
    let height = src.height as usize;
    let filtered = alpha_mode.filtered_channels();
    let dst_stride = dst.row_stride() as usize;

    log::debug!(
        "Dense filter {width}x{height} with {} non-zero taps of radius {}",
        points.len(),
        kernel.radius()
    );

    threading_policy.for_each_row(
        dst.data.borrow_mut(),
        dst_stride,
        src.width,
        src.height,
        |y, row| {
            if stage.is_cancelled() {
                return;
            }
            let dst_row = &mut row[..width * CHANNELS];
            let src_row = src.row(y);
            for (x, dst) in dst_row.chunks_exact_mut(CHANNELS).enumerate() {
                let mut acc = [0f64; CHANNELS];
                for point in points.iter() {
                    let Some(sy) = edge_mode.resolve(y as isize + point.y, height) else {
                        continue;
                    };
                    let Some(sx) = edge_mode.resolve(x as isize + point.x, width) else {
                        continue;
                    };
                    let px = &src.row(sy)[sx * CHANNELS..sx * CHANNELS + CHANNELS];
                    for (acc, &v) in acc.iter_mut().zip(px.iter()).take(filtered) {
                        let v: f64 = v.as_();
                        *acc += point.weight * v;
                    }
                }
                for (dst, &acc) in dst.iter_mut().zip(acc.iter()).take(filtered) {
                    *dst = T::from_f64_rounded(acc);
                }
                if filtered == ALPHA {
                    dst[ALPHA] = src_row[x * CHANNELS + ALPHA];
                }
            }
            stage.row_done();
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(value: u8, width: u32, height: u32) -> Vec<u8> {
        vec![value; width as usize * height as usize * CHANNELS]
    }

    #[test]
    fn test_identity_kernel_copies() {
        let src_data: Vec<u8> = (0..5 * 4 * CHANNELS).map(|x| (x * 7 % 256) as u8).collect();
        let src = RetouchImage::borrow(&src_data, 5, 4);
        let mut dst = RetouchImageMut::default();
        let status = filter_2d(
            &src,
            &mut dst,
            &CenteredMatrix::identity(2).unwrap(),
            EdgeMode::Clip,
            AlphaMode::Process,
            ThreadingPolicy::Single,
            &ProgressHook::none(),
        )
        .unwrap();
        assert_eq!(status, Status::Completed);
        assert_eq!(dst.data.borrow(), src_data.as_slice());
    }

    #[test]
    fn test_output_is_clamped() {
        let src_data = uniform(255, 3, 3);
        let src = RetouchImage::borrow(&src_data, 3, 3);
        let mut kernel = CenteredMatrix::new(1).unwrap();
        *kernel.element_mut(0, 0).unwrap() = 2.;
        let mut dst = RetouchImageMut::default();
        let status = filter_2d(
            &src,
            &mut dst,
            &kernel,
            EdgeMode::Clip,
            AlphaMode::Preserve,
            ThreadingPolicy::Single,
            &ProgressHook::none(),
        )
        .unwrap();
        assert_eq!(status, Status::Completed);
        assert!(dst.data.borrow().iter().all(|&v| v == 255));

        *kernel.element_mut(0, 0).unwrap() = -1.;
        let status = filter_2d(
            &src,
            &mut dst,
            &kernel,
            EdgeMode::Clip,
            AlphaMode::Preserve,
            ThreadingPolicy::Single,
            &ProgressHook::none(),
        )
        .unwrap();
        assert_eq!(status, Status::Completed);
        for px in dst.data.borrow().chunks_exact(CHANNELS) {
            assert_eq!(px, &[0, 0, 0, 255]);
        }
    }

    #[test]
    fn test_sixteen_bit_overflow_saturates() {
        let mut src_data = vec![60000u16; 4 * 3 * CHANNELS];
        src_data[CHANNELS..2 * CHANNELS].copy_from_slice(&[65535, 1, 30000, 60000]);
        let src = RetouchImage::borrow(&src_data, 4, 3);
        let kernel = CenteredMatrix::from_fn(1, |_, _| 1.).unwrap();
        let mut dst = RetouchImageMut::default();
        for edge_mode in [EdgeMode::Clip, EdgeMode::Clamp, EdgeMode::Reflect] {
            let status = filter_2d(
                &src,
                &mut dst,
                &kernel,
                edge_mode,
                AlphaMode::Preserve,
                ThreadingPolicy::Single,
                &ProgressHook::none(),
            )
            .unwrap();
            assert_eq!(status, Status::Completed);
            for px in dst.data.borrow().chunks_exact(CHANNELS) {
                assert_eq!(px, &[65535, 65535, 65535, 60000], "{edge_mode:?}");
            }
        }
    }

    #[test]
    fn test_edge_modes() {
        let src_data = uniform(90, 4, 3);
        let src = RetouchImage::borrow(&src_data, 4, 3);
        let mut kernel = CenteredMatrix::from_fn(1, |_, _| 1.).unwrap();
        kernel.normalize().unwrap();
        for (mode, corner) in [
            (EdgeMode::Clip, 40u8),
            (EdgeMode::Clamp, 90),
            (EdgeMode::Reflect, 90),
        ] {
            let mut dst = RetouchImageMut::default();
            let status = filter_2d(
                &src,
                &mut dst,
                &kernel,
                mode,
                AlphaMode::Process,
                ThreadingPolicy::Single,
                &ProgressHook::none(),
            )
            .unwrap();
            assert_eq!(status, Status::Completed);
            let data = dst.data.borrow();
            // Corner sees 4 of 9 taps when clipped, 90 * 4 / 9 = 40
            assert_eq!(data[0], corner, "{mode:?}");
            let centre = (4 + 1) * CHANNELS;
            assert_eq!(data[centre], 90, "{mode:?}");
        }
    }

    #[test]
    fn test_cancelled_before_start() {
        let src_data = uniform(10, 2, 2);
        let src = RetouchImage::borrow(&src_data, 2, 2);
        let mut dst = RetouchImageMut::default();
        let flag = std::sync::atomic::AtomicBool::new(true);
        let status = filter_2d(
            &src,
            &mut dst,
            &CenteredMatrix::identity(1).unwrap(),
            EdgeMode::Clip,
            AlphaMode::Preserve,
            ThreadingPolicy::Single,
            &ProgressHook::default().with_cancel_flag(&flag),
        )
        .unwrap();
        assert_eq!(status, Status::Cancelled);
    }
}
