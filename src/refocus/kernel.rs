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
use crate::matrix::{convolve, correlate, CenteredMatrix, LinearMatrix};
use crate::refocus::MAX_MATRIX_RADIUS;
use crate::util::{check_non_negative, try_vec};
use crate::RetouchError;

/// Parameters of the least-squares deconvolution kernel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DeconvolutionParams {
    /// Kernel radius `m` up to [MAX_MATRIX_RADIUS], produced matrix has `2 * m + 1` rows.
    pub matrix_radius: usize,
    /// Base of the signal autocorrelation `gamma^distance`, usually in `[0, 1]`.
    pub gamma: f64,
    /// Noise to signal ratio added to the system diagonal.
    pub noise_factor: f64,
    /// Constant term of the signal autocorrelation.
    pub musq: f64,
    /// Solve the reduced system valid for 8-fold symmetric point spread functions.
    pub symmetric: bool,
}

impl Default for DeconvolutionParams {
    fn default() -> Self {
        DeconvolutionParams {
            matrix_radius: 5,
            gamma: 0.5,
            noise_factor: 0.01,
            musq: 0.,
            symmetric: true,
        }
    }
}

impl DeconvolutionParams {
    pub fn new(matrix_radius: usize, gamma: f64, noise_factor: f64) -> DeconvolutionParams {
        DeconvolutionParams {
            matrix_radius,
            gamma,
            noise_factor,
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<(), RetouchError> {
        if self.matrix_radius > MAX_MATRIX_RADIUS {
            return Err(RetouchError::InvalidParameter(
                "matrix radius must not exceed 25",
            ));
        }
        check_non_negative(self.gamma, "correlation must be finite and non-negative")?;
        check_non_negative(self.noise_factor, "noise must be finite and non-negative")?;
        check_non_negative(self.musq, "musq must be finite and non-negative")?;
        Ok(())
    }
}

#[inline]
fn full_index(x: i32, y: i32, m: i32) -> usize {
    ((y + m) * (2 * m + 1) + (x + m)) as usize
}

/// Index of the symmetry class of offset `(x, y)`, shared by all 8 mirror images.
#[inline]
fn symmetric_index(x: i32, y: i32) -> usize {
    let x = x.unsigned_abs() as usize;
    let y = y.unsigned_abs() as usize;
    let (a, b) = if x > y { (x, y) } else { (y, x) };
    a * (a + 1) / 2 + b
}

fn full_system(
    a: &CenteredMatrix,
    h: &CenteredMatrix,
    m: i32,
    noise_factor: f64,
) -> Result<(LinearMatrix, Vec<f64>), RetouchError> {
    let side = (2 * m + 1) as usize;
    let size = side * side;
    let mut system = LinearMatrix::new(size, size)?;
    let mut rhs = try_vec(size, 0f64)?;

    for yr in -m..=m {
        for xr in -m..=m {
            let row = full_index(xr, yr, m);
            for yc in -m..=m {
                for xc in -m..=m {
                    *system.at_mut(row, full_index(xc, yc, m)) = a.at(xr - xc, yr - yc);
                }
            }
            *system.at_mut(row, row) += noise_factor;
            rhs[row] = h.at(xr, yr);
        }
    }
    Ok((system, rhs))
}

fn symmetric_system(
    a: &CenteredMatrix,
    h: &CenteredMatrix,
    m: i32,
    noise_factor: f64,
) -> Result<(LinearMatrix, Vec<f64>), RetouchError> {
    let size = symmetric_index(m, m) + 1;
    let mut system = LinearMatrix::new(size, size)?;
    let mut rhs = try_vec(size, 0f64)?;

    for yr in 0..=m {
        for xr in 0..=yr {
            let row = symmetric_index(xr, yr);
            for yc in -m..=m {
                for xc in -m..=m {
                    *system.at_mut(row, symmetric_index(xc, yc)) += a.at(xr - xc, yr - yc);
                }
            }
            *system.at_mut(row, row) += noise_factor;
            rhs[row] = h.at(xr, yr);
        }
    }
    Ok((system, rhs))
}

/// Computes the normalized deconvolution kernel undoing `psf`.
///
/// `psf` may have any radius; it is modelled together with a signal autocorrelation
/// `musq + gamma^distance` and the kernel minimizing the expected squared error is obtained
/// by solving a dense linear system of `(2m + 1)²` unknowns, or `(m + 1)(m + 2) / 2`
/// unknowns when `symmetric` is set.
pub fn compute_refocus_kernel(
    psf: &CenteredMatrix,
    params: DeconvolutionParams,
) -> Result<CenteredMatrix, RetouchError> {
    params.validate()?;
    let m = params.matrix_radius;

    let correlation = CenteredMatrix::from_fn(4 * m, |x, y| {
        let distance = ((x * x + y * y) as f64).sqrt();
        params.musq + params.gamma.powf(distance)
    })?;

    let mut h = CenteredMatrix::new(3 * m)?;
    convolve(&mut h, psf, &correlation);

    let mut a = CenteredMatrix::new(2 * m)?;
    correlate(&mut a, psf, &h);

    let mi = m as i32;
    let (system, rhs) = if params.symmetric {
        symmetric_system(&a, &h, mi, params.noise_factor)?
    } else {
        full_system(&a, &h, mi, params.noise_factor)?
    };

    log::debug!(
        "Solving {} refocus system of {} unknowns for radius {m}",
        if params.symmetric { "symmetric" } else { "full" },
        system.rows()
    );

    let solution = system.solve(&rhs)?;

    let mut kernel = if params.symmetric {
        CenteredMatrix::from_fn(m, |x, y| solution[symmetric_index(x, y)])?
    } else {
        CenteredMatrix::from_fn(m, |x, y| solution[full_index(x, y, mi)])?
    };
    kernel.normalize()?;
    Ok(kernel)
}
