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
use crate::gaussian::{separable_blur, SeparableBlurKernel};
use crate::image::{prepare_pair, CHANNELS};
use crate::util::check_non_negative;
use crate::{
    AlphaMode, ProgressHook, RetouchError, RetouchImage, RetouchImageMut, Sample, Status,
    ThreadingPolicy,
};

/// Parameters of [unsharp_mask].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UnsharpParams {
    /// Blur radius of effect.
    pub radius: f64,
    /// Multiplier of the difference between the image and its blurred copy.
    pub amount: f64,
    /// Fraction of the sample range, differences below it are not sharpened. `0..=1`.
    pub threshold: f64,
}

impl Default for UnsharpParams {
    fn default() -> Self {
        UnsharpParams {
            radius: 1.,
            amount: 0.5,
            threshold: 0.,
        }
    }
}

impl UnsharpParams {
    pub fn new(radius: f64, amount: f64, threshold: f64) -> UnsharpParams {
        UnsharpParams {
            radius,
            amount,
            threshold,
        }
    }

    fn validate(&self) -> Result<(), RetouchError> {
        check_non_negative(self.radius, "unsharp radius must be finite and non-negative")?;
        check_non_negative(self.amount, "unsharp amount must be finite and non-negative")?;
        if !(0. ..=1.).contains(&self.threshold) {
            return Err(RetouchError::InvalidParameter(
                "unsharp threshold must be in range 0..=1",
            ));
        }
        Ok(())
    }
}

#[inline(always)]
fn sharpen_sample<T: Sample>(original: T, blurred: T, amount: f64, threshold: f64) -> T {
    let original_f: f64 = original.as_();
    let blurred_f: f64 = blurred.as_();
    let diff = original_f - blurred_f;
    if (2. * diff).abs() < threshold {
        return original;
    }
    T::from_f64_rounded(original_f + amount * diff)
}

/// Sharpens the image by adding back the difference between it and its gaussian blurred copy.
///
/// All four channels are blurred and merged, samples whose doubled difference is below
/// `threshold * MAX` are left as they are.
///
/// # Arguments
///
/// * `src`: Source image.
/// * `dst`: Destination image, owned destination is resized to the source.
/// * `params`: See [UnsharpParams] for more info.
/// * `threading_policy`: See [ThreadingPolicy] for more info.
/// * `hook`: Progress reporting and cancellation, see [ProgressHook].
///
pub fn unsharp_mask<T: Sample>(
    src: &RetouchImage<T>,
    dst: &mut RetouchImageMut<T>,
    params: UnsharpParams,
    threading_policy: ThreadingPolicy,
    hook: &ProgressHook,
) -> Result<Status, RetouchError> {
    params.validate()?;
    prepare_pair(src, dst)?;
    if hook.is_cancelled() {
        return Ok(Status::Cancelled);
    }

    let kernel = SeparableBlurKernel::new(params.radius)?;
    let mut blurred = RetouchImageMut::<T>::alloc(src.width, src.height)?;
    let status = separable_blur(
        src,
        &mut blurred,
        &kernel,
        AlphaMode::Process,
        threading_policy,
        hook,
        0,
        67,
    )?;
    if status == Status::Cancelled {
        return Ok(status);
    }

    let blurred = blurred.to_immutable_ref();
    let threshold = params.threshold * T::MAX as f64;
    let width = src.width as usize;
    let dst_stride = dst.row_stride() as usize;
    let stage = hook.stage(67, 100, src.height as usize);

    threading_policy.for_each_row(
        dst.data.borrow_mut(),
        dst_stride,
        src.width,
        src.height,
        |y, row| {
            if stage.is_cancelled() {
                return;
            }
            for ((dst, &original), &blurred) in row[..width * CHANNELS]
                .iter_mut()
                .zip(src.row(y).iter())
                .zip(blurred.row(y).iter())
            {
                *dst = sharpen_sample(original, blurred, params.amount, threshold);
            }
            stage.row_done();
        },
    );
    Ok(stage.status())
}
