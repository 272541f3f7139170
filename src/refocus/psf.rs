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
use crate::matrix::CenteredMatrix;
use crate::RetouchError;
use std::f64::consts::{LN_2, PI};

/// Point spread function shapes a blurred image is modelled with.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointSpread {
    /// Out-of-focus lens, uniform disc of the given radius.
    Disc { radius: f64 },
    /// Gaussian blur where `radius` is the distance at which intensity halves.
    Gaussian { radius: f64 },
}

/// Area below `y = sqrt(r² - t²)` for `t` in `[0, x]`.
#[inline]
fn circle_integral(x: f64, radius: f64) -> f64 {
    if radius == 0. {
        return 0.;
    }
    let sin = (x / radius).clamp(-1., 1.);
    let sq_diff = (radius * radius - x * x).max(0.);
    (x * sq_diff.sqrt() + radius * radius * sin.asin()) / 2.
}

/// Fraction of the pixel centred at `(x, y)` covered by a disc of `radius` at the origin,
/// divided by the disc area.
fn circle_intensity(x: i32, y: i32, radius: f64) -> f64 {
    if radius == 0. {
        return if x == 0 && y == 0 { 1. } else { 0. };
    }
    let r2 = radius * radius;
    let mut symmetry = 1.;

    let mut xlo = (x as f64).abs() - 0.5;
    let xhi = (x as f64).abs() + 0.5;
    let mut ylo = (y as f64).abs() - 0.5;
    let yhi = (y as f64).abs() + 0.5;

    if xlo < 0. {
        xlo = 0.;
        symmetry *= 2.;
    }
    if ylo < 0. {
        ylo = 0.;
        symmetry *= 2.;
    }

    let xc1 = if xlo * xlo + yhi * yhi > r2 {
        xlo
    } else if xhi * xhi + yhi * yhi > r2 {
        (r2 - yhi * yhi).sqrt()
    } else {
        xhi
    };

    let xc2 = if xlo * xlo + ylo * ylo > r2 {
        xlo
    } else if xhi * xhi + ylo * ylo > r2 {
        (r2 - ylo * ylo).sqrt()
    } else {
        xhi
    };

    let covered = (yhi - ylo) * (xc1 - xlo) + circle_integral(xc2, radius)
        - circle_integral(xc1, radius)
        - (xc2 - xc1) * ylo;
    covered * symmetry / (PI * r2)
}

fn gaussian_intensity(x: i32, y: i32, radius: f64) -> f64 {
    let r2 = radius * radius;
    if r2 <= 1. / f32::MAX as f64 {
        return if x == 0 && y == 0 { 1. } else { 0. };
    }
    let alpha = LN_2 / r2;
    (-alpha * (x as f64 * x as f64 + y as f64 * y as f64)).exp()
}

impl PointSpread {
    fn radius(&self) -> f64 {
        match *self {
            PointSpread::Disc { radius } => radius,
            PointSpread::Gaussian { radius } => radius,
        }
    }

    fn validate(&self) -> Result<(), RetouchError> {
        let radius = self.radius();
        if !radius.is_finite() || radius < 0. {
            return Err(RetouchError::InvalidParameter(
                "point spread radius must be finite and non-negative",
            ));
        }
        Ok(())
    }

    /// Unnormalized intensity of the pixel at offset `(x, y)`.
    pub fn intensity(&self, x: i32, y: i32) -> f64 {
        match *self {
            PointSpread::Disc { radius } => circle_intensity(x, y, radius),
            PointSpread::Gaussian { radius } => gaussian_intensity(x, y, radius),
        }
    }

    /// Samples the shape into a matrix of `radius`.
    pub fn to_matrix(&self, radius: usize) -> Result<CenteredMatrix, RetouchError> {
        self.validate()?;
        CenteredMatrix::from_fn(radius, |x, y| self.intensity(x, y))
    }
}
