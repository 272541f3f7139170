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
mod lut3d;
mod neon;
mod solarize;
mod vivid;

pub use lut3d::{apply_lut3d, Lut3d, Lut3dInterpolation, MAX_LUT_SIZE};
pub use neon::{neon_edges, EdgeEffect, NeonParams};
pub use solarize::{solarize, SolarizeMode};
pub use vivid::vivid;

use crate::image::{prepare_pair, CHANNELS};
use crate::{
    ProgressHook, RetouchError, RetouchImage, RetouchImageMut, Sample, Status, ThreadingPolicy,
};

/// Runs `f(x, y, src_pixel, dst_pixel)` for every pixel.
pub(crate) fn process_pixels<T, F>(
    src: &RetouchImage<T>,
    dst: &mut RetouchImageMut<T>,
    threading_policy: ThreadingPolicy,
    hook: &ProgressHook,
    f: F,
) -> Result<Status, RetouchError>
where
    T: Sample,
    F: Fn(usize, usize, &[T], &mut [T]) + Send + Sync,
{
    prepare_pair(src, dst)?;
    let stage = hook.stage(0, 100, src.height as usize);
    if stage.is_cancelled() {
        return Ok(Status::Cancelled);
    }
    let width = src.width as usize;
    let dst_stride = dst.row_stride() as usize;
    threading_policy.for_each_row(
        dst.data.borrow_mut(),
        dst_stride,
        src.width,
        src.height,
        |y, row| {
            if stage.is_cancelled() {
                return;
            }
            for (x, (dst, src)) in row[..width * CHANNELS]
                .chunks_exact_mut(CHANNELS)
                .zip(src.row(y).chunks_exact(CHANNELS))
                .enumerate()
            {
                f(x, y, src, dst);
            }
            stage.row_done();
        },
    );
    Ok(stage.status())
}
