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
mod kernel;
mod psf;

pub use kernel::{compute_refocus_kernel, DeconvolutionParams};
pub use psf::PointSpread;

use crate::filter_2d::filter_2d_rows;
use crate::image::prepare_pair;
use crate::matrix::{correlate, CenteredMatrix};
use crate::util::check_non_negative;
use crate::{
    AlphaMode, EdgeMode, ProgressHook, RetouchError, RetouchImage, RetouchImageMut, Sample,
    Status, ThreadingPolicy,
};

/// Largest accepted deconvolution kernel radius.
pub const MAX_MATRIX_RADIUS: usize = 25;

/// Parameters of [refocus].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RefocusParams {
    /// Deconvolution kernel radius, `0..=MAX_MATRIX_RADIUS`.
    pub matrix_radius: usize,
    /// Radius of the out-of-focus disc.
    pub circle_radius: f64,
    /// Half intensity radius of the gaussian part of the blur.
    pub gauss_radius: f64,
    /// Signal correlation `gamma`, usually `0..=1`.
    pub correlation: f64,
    /// Noise to signal ratio.
    pub noise: f64,
    /// Solve the reduced symmetric system, both shapes are symmetric so the kernel is the same.
    pub symmetric: bool,
    pub edge_mode: EdgeMode,
    pub alpha_mode: AlphaMode,
}

impl Default for RefocusParams {
    fn default() -> Self {
        RefocusParams {
            matrix_radius: 5,
            circle_radius: 0.9,
            gauss_radius: 0.,
            correlation: 0.5,
            noise: 0.01,
            symmetric: true,
            edge_mode: EdgeMode::Reflect,
            alpha_mode: AlphaMode::Preserve,
        }
    }
}

impl RefocusParams {
    pub fn new(matrix_radius: usize, circle_radius: f64, gauss_radius: f64) -> RefocusParams {
        RefocusParams {
            matrix_radius,
            circle_radius,
            gauss_radius,
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<(), RetouchError> {
        if self.matrix_radius > MAX_MATRIX_RADIUS {
            return Err(RetouchError::InvalidParameter(
                "matrix radius must not exceed 25",
            ));
        }
        check_non_negative(self.circle_radius, "circle radius must be finite and non-negative")?;
        check_non_negative(self.gauss_radius, "gauss radius must be finite and non-negative")?;
        Ok(())
    }

    fn deconvolution(&self) -> DeconvolutionParams {
        DeconvolutionParams {
            matrix_radius: self.matrix_radius,
            gamma: self.correlation,
            noise_factor: self.noise,
            musq: 0.,
            symmetric: self.symmetric,
        }
    }
}

/// Builds the point spread of a lens blur combined with a gaussian blur and the kernel inverting it.
pub fn refocus_kernel(params: &RefocusParams) -> Result<CenteredMatrix, RetouchError> {
    params.validate()?;
    let m = params.matrix_radius;
    let gaussian = PointSpread::Gaussian {
        radius: params.gauss_radius,
    }
    .to_matrix(m)?;
    let circle = PointSpread::Disc {
        radius: params.circle_radius,
    }
    .to_matrix(m)?;
    let mut psf = CenteredMatrix::new(m)?;
    correlate(&mut psf, &gaussian, &circle);
    compute_refocus_kernel(&psf, params.deconvolution())
}

/// Sharpens an image blurred by a defocused lens and/or gaussian blur.
///
/// Computes a least-squares deconvolution kernel and applies it with the dense filter.
///
/// # Arguments
///
/// * `src`: Source image.
/// * `dst`: Destination image, owned destination is resized to the source.
/// * `params`: See [RefocusParams] for more info.
/// * `threading_policy`: See [ThreadingPolicy] for more info.
/// * `hook`: Progress reporting and cancellation, kernel solving takes the first 10 percent.
///
pub fn refocus<T: Sample>(
    src: &RetouchImage<T>,
    dst: &mut RetouchImageMut<T>,
    params: RefocusParams,
    threading_policy: ThreadingPolicy,
    hook: &ProgressHook,
) -> Result<Status, RetouchError> {
    prepare_pair(src, dst)?;
    if hook.is_cancelled() {
        return Ok(Status::Cancelled);
    }
    let kernel = refocus_kernel(&params)?;
    hook.report(10);

    let stage = hook.stage(10, 100, src.height as usize);
    filter_2d_rows(
        src,
        dst,
        &kernel,
        params.edge_mode,
        params.alpha_mode,
        threading_policy,
        &stage,
    );
    Ok(stage.status())
}
