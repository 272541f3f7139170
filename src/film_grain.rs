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
use crate::composite::blend_over;
use crate::curves::ToneCurve;
use crate::gaussian::{separable_blur, SeparableBlurKernel};
use crate::image::{prepare_pair, ALPHA, CHANNELS};
use crate::{
    AlphaMode, ProgressHook, RetouchError, RetouchImage, RetouchImageMut, Sample, Status,
    ThreadingPolicy,
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Parameters of [film_grain].
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct FilmGrainParams {
    /// Film sensitivity, grain amplitude is `sensitivity / 10` in 8-bit units, 0 disables grain.
    pub sensitivity: u32,
    /// Opacity of the grain layer in 8-bit units, `0..=255`.
    pub shade: u8,
    /// Seed of the noise generator, `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for FilmGrainParams {
    fn default() -> Self {
        FilmGrainParams {
            sensitivity: 2400,
            shade: 52,
            seed: None,
        }
    }
}

impl FilmGrainParams {
    pub fn new(sensitivity: u32, seed: u64) -> FilmGrainParams {
        FilmGrainParams {
            sensitivity,
            seed: Some(seed),
            ..Default::default()
        }
    }
}

/// Grey noise plane centred at the middle of the range, alpha is opaque.
fn noise_plane<T: Sample>(
    width: u32,
    height: u32,
    sensitivity: u32,
    rng: &mut ChaCha8Rng,
) -> Result<RetouchImageMut<'static, T>, RetouchError> {
    let mut plane = RetouchImageMut::<T>::alloc(width, height)?;
    let scale = if T::MAX > u8::MAX as u32 { 257i64 } else { 1 };
    let range = (sensitivity as i64 / 10).max(1) * scale;
    let mid = (T::MAX as i64 + 1) / 2;
    for px in plane.data.borrow_mut().chunks_exact_mut(CHANNELS) {
        let value = mid + rng.random_range(0..range) - range / 2;
        let value = T::from_i64_clamped(value);
        px[..ALPHA].fill(value);
        px[ALPHA] = T::from_i64_clamped(T::MAX as i64);
    }
    Ok(plane)
}

/// Overlays blurred monochrome noise emulating film grain.
///
/// Noise is blurred with radius 1, mapped through a curve peaking at midtones so grain
/// stays strongest there, then composed over the image with `shade / 255` opacity.
/// Alpha is copied, sensitivity 0 copies the image.
///
/// # Arguments
///
/// * `src`: Source image.
/// * `dst`: Destination image, owned destination is resized to the source.
/// * `params`: See [FilmGrainParams] for more info.
/// * `threading_policy`: See [ThreadingPolicy] for more info.
/// * `hook`: Progress reporting and cancellation, see [ProgressHook].
///
pub fn film_grain<T: Sample>(
    src: &RetouchImage<T>,
    dst: &mut RetouchImageMut<T>,
    params: FilmGrainParams,
    threading_policy: ThreadingPolicy,
    hook: &ProgressHook,
) -> Result<Status, RetouchError> {
    prepare_pair(src, dst)?;
    if hook.is_cancelled() {
        return Ok(Status::Cancelled);
    }
    if params.sensitivity == 0 {
        src.copy_to_mut(dst)?;
        hook.report(100);
        return Ok(Status::Completed);
    }

    let mut rng = match params.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    };

    let noise = noise_plane::<T>(src.width, src.height, params.sensitivity, &mut rng)?;
    hook.report(10);

    let mut grain = RetouchImageMut::<T>::alloc(src.width, src.height)?;
    let status = separable_blur(
        &noise.to_immutable_ref(),
        &mut grain,
        &SeparableBlurKernel::new(1.)?,
        AlphaMode::Preserve,
        threading_policy,
        hook,
        10,
        70,
    )?;
    if status == Status::Cancelled {
        return Ok(status);
    }

    let mid = (T::MAX + 1) / 2;
    let curve = ToneCurve::new::<T>(&[(0, 0), (mid, mid), (T::MAX, 0)])?;
    let alpha = params.shade as f64 / 255.;
    let grain = grain.to_immutable_ref();
    let width = src.width as usize;
    let dst_stride = dst.row_stride() as usize;
    let stage = hook.stage(70, 100, src.height as usize);

    threading_policy.for_each_row(
        dst.data.borrow_mut(),
        dst_stride,
        src.width,
        src.height,
        |y, row| {
            if stage.is_cancelled() {
                return;
            }
            for ((dst, src), grain) in row[..width * CHANNELS]
                .chunks_exact_mut(CHANNELS)
                .zip(src.row(y).chunks_exact(CHANNELS))
                .zip(grain.row(y).chunks_exact(CHANNELS))
            {
                for c in 0..ALPHA {
                    dst[c] = blend_over(curve.map(grain[c]), src[c], alpha);
                }
                dst[ALPHA] = src[ALPHA];
            }
            stage.row_done();
        },
    );
    Ok(stage.status())
}
