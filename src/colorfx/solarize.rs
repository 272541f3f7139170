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
use crate::{
    ProgressHook, RetouchError, RetouchImage, RetouchImageMut, Sample, Status, ThreadingPolicy,
};

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Default, Hash)]
/// How samples above the solarization threshold are remapped
pub enum SolarizeMode {
    /// Both sides of the threshold are stretched to the full range,
    /// values above are inverted.
    #[default]
    Stretch,
    /// Only values above the threshold are inverted.
    Invert,
}

#[inline(always)]
fn solarize_sample(v: u64, max: u64, threshold: u64, mode: SolarizeMode) -> u64 {
    match mode {
        SolarizeMode::Stretch => {
            if v > threshold {
                (max - v) * max / (max - threshold)
            } else {
                v * max / threshold
            }
        }
        SolarizeMode::Invert => {
            if v > threshold {
                max - v
            } else {
                v
            }
        }
    }
}

/// Solarizes colour channels, `factor` in `0..=100` moves the threshold from the top of
/// the range down to zero. Alpha is copied.
pub fn solarize<T: Sample>(
    src: &RetouchImage<T>,
    dst: &mut RetouchImageMut<T>,
    factor: u32,
    mode: SolarizeMode,
    threading_policy: ThreadingPolicy,
    hook: &ProgressHook,
) -> Result<Status, RetouchError> {
    if factor > 100 {
        return Err(RetouchError::InvalidParameter(
            "solarize factor must be in range 0..=100",
        ));
    }
    let max = T::MAX as u64;
    let threshold = ((100 - factor as u64) * (max + 1) / 100).max(1);
    process_pixels(src, dst, threading_policy, hook, |_, _, src, dst| {
        for (dst, &src) in dst.iter_mut().zip(src.iter()).take(3) {
            let v: u32 = src.as_();
            *dst = T::from_i64_clamped(solarize_sample(v as u64, max, threshold, mode) as i64);
        }
        dst[3] = src[3];
    })
}
