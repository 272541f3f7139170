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
use crate::gaussian::{LookupTable, SeparableBlurKernel};
use crate::image::{prepare_pair, ALPHA, CHANNELS};
use crate::{
    AlphaMode, ProgressHook, RetouchError, RetouchImage, RetouchImageMut, Sample, Status,
    ThreadingPolicy,
};

/// Convolves the line sample at `center` out of `n` samples fetched by `fetch`.
///
/// Taps falling outside the line are dropped and the remaining weights renormalized.
#[inline(always)]
fn blur_sample<T: Sample>(
    weights: &[f64],
    table: &LookupTable,
    center: usize,
    n: usize,
    fetch: impl Fn(usize) -> T,
) -> T {
    let half = weights.len() / 2;
    if center >= half && center + half < n {
        let start = center - half;
        let mut sum = 0f64;
        for tap in 0..weights.len() {
            let value: usize = fetch(start + tap).as_();
            sum += table.product(tap, value) as f64;
        }
        T::from_f64_rounded(sum)
    } else {
        let mut sum = 0f64;
        let mut scale = 0f64;
        for (tap, &weight) in weights.iter().enumerate() {
            let position = center as isize + tap as isize - half as isize;
            if position < 0 || position as usize >= n {
                continue;
            }
            let value: f64 = fetch(position as usize).as_();
            sum += weight * value;
            scale += weight;
        }
        T::from_f64_rounded(sum / scale)
    }
}

/// Two pass blur into `dst` mapping progress onto `[from, to]`, `dst` must already match `src`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn separable_blur<T: Sample>(
    src: &RetouchImage<T>,
    dst: &mut RetouchImageMut<T>,
    kernel: &SeparableBlurKernel,
    alpha_mode: AlphaMode,
    threading_policy: ThreadingPolicy,
    hook: &ProgressHook,
    from: u8,
    to: u8,
) -> Result<Status, RetouchError> {
    let width = src.width as usize;
    let height = src.height as usize;
    let filtered = alpha_mode.filtered_channels();
    let middle = from + (to.saturating_sub(from)) / 2;

    if kernel.len() == 1 {
        src.copy_to_mut(dst)?;
        let stage = hook.stage(from, to, 1);
        stage.row_done();
        return Ok(stage.status());
    }

    let table = kernel.lookup_table::<T>()?;
    let weights = kernel.weights();
    let mut intermediate = RetouchImageMut::<T>::alloc(src.width, src.height)?;
    let intermediate_stride = intermediate.row_stride() as usize;

    let stage = hook.stage(from, middle, height);
    threading_policy.for_each_row(
        intermediate.data.borrow_mut(),
        intermediate_stride,
        src.width,
        src.height,
        |y, row| {
            if stage.is_cancelled() {
                return;
            }
            let src_row = src.row(y);
            for (x, dst) in row[..width * CHANNELS]
                .chunks_exact_mut(CHANNELS)
                .enumerate()
            {
                for (c, dst) in dst.iter_mut().enumerate().take(filtered) {
                    *dst = blur_sample(weights, &table, x, width, |i| src_row[i * CHANNELS + c]);
                }
            }
            stage.row_done();
        },
    );
    if stage.status() == Status::Cancelled {
        return Ok(Status::Cancelled);
    }

    let intermediate = intermediate.to_immutable_ref();
    let dst_stride = dst.row_stride() as usize;
    let stage = hook.stage(middle, to, height);
    threading_policy.for_each_row(
        dst.data.borrow_mut(),
        dst_stride,
        src.width,
        src.height,
        |y, row| {
            if stage.is_cancelled() {
                return;
            }
            let src_row = src.row(y);
            for (x, dst) in row[..width * CHANNELS]
                .chunks_exact_mut(CHANNELS)
                .enumerate()
            {
                for (c, dst) in dst.iter_mut().enumerate().take(filtered) {
                    *dst = blur_sample(weights, &table, y, height, |i| {
                        intermediate.row(i)[x * CHANNELS + c]
                    });
                }
                if filtered == ALPHA {
                    dst[ALPHA] = src_row[x * CHANNELS + ALPHA];
                }
            }
            stage.row_done();
        },
    );
    Ok(stage.status())
}

/// Performs gaussian blur with a lookup table driven separable kernel.
///
/// Rows are blurred into an intermediate image of the same depth, then columns into `dst`.
/// Near the borders only taps inside the image are used and rescaled to sum to one, so
/// uniform images stay unchanged.
///
/// # Arguments
///
/// * `src`: Source image.
/// * `dst`: Destination image, owned destination is resized to the source.
/// * `radius`: Radius of effect, 0 copies the image, see [SeparableBlurKernel].
/// * `alpha_mode`: Whether alpha is blurred or copied, see [AlphaMode].
/// * `threading_policy`: See [ThreadingPolicy] for more info.
/// * `hook`: Progress reporting and cancellation, see [ProgressHook].
///
pub fn gaussian_blur<T: Sample>(
    src: &RetouchImage<T>,
    dst: &mut RetouchImageMut<T>,
    radius: f64,
    alpha_mode: AlphaMode,
    threading_policy: ThreadingPolicy,
    hook: &ProgressHook,
) -> Result<Status, RetouchError> {
    prepare_pair(src, dst)?;
    let kernel = SeparableBlurKernel::new(radius)?;
    if hook.is_cancelled() {
        return Ok(Status::Cancelled);
    }
    separable_blur(src, dst, &kernel, alpha_mode, threading_policy, hook, 0, 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;

    #[test]
    fn test_uniform_image_is_fixed_point() {
        let src_data = vec![100u8; 3 * 3 * CHANNELS];
        let src = RetouchImage::borrow(&src_data, 3, 3);
        let mut dst = RetouchImageMut::default();
        let status = gaussian_blur(
            &src,
            &mut dst,
            1.,
            AlphaMode::Process,
            ThreadingPolicy::Single,
            &ProgressHook::none(),
        )
        .unwrap();
        assert_eq!(status, Status::Completed);
        assert!(dst.data.borrow().iter().all(|&v| v == 100));
    }

    #[test]
    fn test_zero_radius_is_identity() {
        let src_data: Vec<u16> = (0..6 * 5 * CHANNELS).map(|x| (x * 911) as u16).collect();
        let src = RetouchImage::borrow(&src_data, 6, 5);
        let mut dst = RetouchImageMut::default();
        let status = gaussian_blur(
            &src,
            &mut dst,
            0.,
            AlphaMode::Preserve,
            ThreadingPolicy::Single,
            &ProgressHook::none(),
        )
        .unwrap();
        assert_eq!(status, Status::Completed);
        assert_eq!(dst.data.borrow(), src_data.as_slice());
    }

    #[test]
    fn test_kernel_wider_than_image() {
        let width = 4u32;
        let height = 2u32;
        let src_data = vec![77u16; (width * height) as usize * CHANNELS];
        let src = RetouchImage::borrow(&src_data, width, height);
        let mut dst = RetouchImageMut::default();
        let status = gaussian_blur(
            &src,
            &mut dst,
            20.,
            AlphaMode::Process,
            ThreadingPolicy::Single,
            &ProgressHook::none(),
        )
        .unwrap();
        assert_eq!(status, Status::Completed);
        for (i, &v) in dst.data.borrow().iter().enumerate() {
            let diff = (v as i32 - 77).abs();
            assert!(diff <= 1, "Diff expected to be <= 1 but it was {diff} at {i}");
        }
    }

    #[test]
    fn test_blur_spreads_point() {
        let size = 9usize;
        let mut src_data = vec![0u8; size * size * CHANNELS];
        let centre = (4 * size + 4) * CHANNELS;
        src_data[centre..centre + 4].fill(255);
        let src = RetouchImage::borrow(&src_data, size as u32, size as u32);
        let mut single = RetouchImageMut::default();
        let status = gaussian_blur(
            &src,
            &mut single,
            2.,
            AlphaMode::Preserve,
            ThreadingPolicy::Single,
            &ProgressHook::none(),
        )
        .unwrap();
        assert_eq!(status, Status::Completed);
        let data = single.data.borrow();
        assert!(data[centre] < 255);
        assert!(data[centre + CHANNELS] > 0);
        assert_eq!(data[centre + CHANNELS], data[centre - CHANNELS]);
        // alpha preserved
        assert_eq!(data[centre + 3], 255);
        assert_eq!(data[centre + CHANNELS + 3], 0);

        let mut threaded = RetouchImageMut::default();
        let status = gaussian_blur(
            &src,
            &mut threaded,
            2.,
            AlphaMode::Preserve,
            ThreadingPolicy::Fixed(NonZeroUsize::new(3).unwrap()),
            &ProgressHook::none(),
        )
        .unwrap();
        assert_eq!(status, Status::Completed);
        assert_eq!(threaded.data.borrow(), single.data.borrow());
    }
}
