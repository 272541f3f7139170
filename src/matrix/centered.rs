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
use crate::matrix::LinearMatrix;
use crate::RetouchError;

/// Square matrix addressed by signed offsets `(col, row)` in `[-radius, radius]`.
///
/// Backed by a [LinearMatrix] of `2 * radius + 1` rows and columns, offset `(col, row)`
/// is stored at `(row + radius) * row_stride + (col + radius)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CenteredMatrix {
    radius: usize,
    storage: LinearMatrix,
}

impl CenteredMatrix {
    /// Zero filled matrix
    pub fn new(radius: usize) -> Result<CenteredMatrix, RetouchError> {
        let side = radius
            .checked_mul(2)
            .and_then(|x| x.checked_add(1))
            .ok_or(RetouchError::ExceedingPointerSize)?;
        if side > i32::MAX as usize {
            return Err(RetouchError::ExceedingPointerSize);
        }
        Ok(CenteredMatrix {
            radius,
            storage: LinearMatrix::new(side, side)?,
        })
    }

    /// Matrix having 1 at the centre
    pub fn identity(radius: usize) -> Result<CenteredMatrix, RetouchError> {
        let mut matrix = CenteredMatrix::new(radius)?;
        *matrix.at_mut(0, 0) = 1.;
        Ok(matrix)
    }

    /// Fills every offset with `f(col, row)`.
    pub fn from_fn<F>(radius: usize, mut f: F) -> Result<CenteredMatrix, RetouchError>
    where
        F: FnMut(i32, i32) -> f64,
    {
        let mut matrix = CenteredMatrix::new(radius)?;
        let r = radius as i32;
        for row in -r..=r {
            for col in -r..=r {
                *matrix.at_mut(col, row) = f(col, row);
            }
        }
        Ok(matrix)
    }

    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Elements per row, `2 * radius + 1`
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.storage.cols()
    }

    /// Row-major elements starting at offset `(-radius, -radius)`
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        self.storage.as_slice()
    }

    #[inline]
    fn contains(&self, col: i32, row: i32) -> bool {
        let r = self.radius as i64;
        (col as i64).abs() <= r && (row as i64).abs() <= r
    }

    pub fn element(&self, col: i32, row: i32) -> Result<f64, RetouchError> {
        if !self.contains(col, row) {
            return Err(RetouchError::MatrixIndexOutOfBounds {
                col,
                row,
                radius: self.radius,
            });
        }
        Ok(self.at(col, row))
    }

    pub fn element_mut(&mut self, col: i32, row: i32) -> Result<&mut f64, RetouchError> {
        if !self.contains(col, row) {
            return Err(RetouchError::MatrixIndexOutOfBounds {
                col,
                row,
                radius: self.radius,
            });
        }
        Ok(self.at_mut(col, row))
    }

    #[inline(always)]
    pub(crate) fn at(&self, col: i32, row: i32) -> f64 {
        let r = self.radius as i32;
        self.storage.at((row + r) as usize, (col + r) as usize)
    }

    #[inline(always)]
    pub(crate) fn at_mut(&mut self, col: i32, row: i32) -> &mut f64 {
        let r = self.radius as i32;
        self.storage.at_mut((row + r) as usize, (col + r) as usize)
    }

    pub fn sum(&self) -> f64 {
        self.as_slice().iter().sum()
    }

    /// Scales elements so they sum to 1.
    pub fn normalize(&mut self) -> Result<(), RetouchError> {
        let sum = self.sum();
        if sum == 0. || !sum.is_finite() {
            return Err(RetouchError::NumericDegeneracy);
        }
        let scale = 1. / sum;
        for v in self.storage.as_mut_slice().iter_mut() {
            *v *= scale;
        }
        Ok(())
    }
}

/// Computes `result(xr, yr) = Σ a(xa, ya) · b(xr - xa, yr - ya)` for every offset of `result`,
/// only pairs where both operands are defined contribute.
pub fn convolve(result: &mut CenteredMatrix, a: &CenteredMatrix, b: &CenteredMatrix) {
    let rr = result.radius as i32;
    let ra = a.radius as i32;
    let rb = b.radius as i32;

    for yr in -rr..=rr {
        let ya_low = (-ra).max(yr - rb);
        let ya_high = ra.min(yr + rb);
        for xr in -rr..=rr {
            let xa_low = (-ra).max(xr - rb);
            let xa_high = ra.min(xr + rb);
            let mut value = 0f64;
            for ya in ya_low..=ya_high {
                for xa in xa_low..=xa_high {
                    value += a.at(xa, ya) * b.at(xr - xa, yr - ya);
                }
            }
            *result.at_mut(xr, yr) = value;
        }
    }
}

/// Computes `result(xr, yr) = Σ a(xa, ya) · b(xr + xa, yr + ya)` for every offset of `result`,
/// only pairs where both operands are defined contribute.
pub fn correlate(result: &mut CenteredMatrix, a: &CenteredMatrix, b: &CenteredMatrix) {
    let rr = result.radius as i32;
    let ra = a.radius as i32;
    let rb = b.radius as i32;

    for yr in -rr..=rr {
        let ya_low = (-ra).max(-rb - yr);
        let ya_high = ra.min(rb - yr);
        for xr in -rr..=rr {
            let xa_low = (-ra).max(-rb - xr);
            let xa_high = ra.min(rb - xr);
            let mut value = 0f64;
            for ya in ya_low..=ya_high {
                for xa in xa_low..=xa_high {
                    value += a.at(xa, ya) * b.at(xr + xa, yr + ya);
                }
            }
            *result.at_mut(xr, yr) = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_layout() {
        let mut m = CenteredMatrix::new(2).unwrap();
        assert_eq!(m.row_stride(), 5);
        assert_eq!(m.as_slice().len(), 25);
        *m.element_mut(1, -2).unwrap() = 3.;
        // (row + r) * stride + (col + r)
        assert_eq!(m.as_slice()[3], 3.);
        assert_eq!(m.element(1, -2), Ok(3.));
        assert_eq!(
            m.element(3, 0),
            Err(RetouchError::MatrixIndexOutOfBounds {
                col: 3,
                row: 0,
                radius: 2
            })
        );
    }

    #[test]
    fn test_identity_convolution() {
        let a = CenteredMatrix::from_fn(2, |x, y| (x * 3 + y) as f64).unwrap();
        let id = CenteredMatrix::identity(1).unwrap();
        let mut result = CenteredMatrix::new(2).unwrap();
        convolve(&mut result, &a, &id);
        assert_eq!(result, a);
        correlate(&mut result, &id, &a);
        assert_eq!(result, a);
    }

    #[test]
    fn test_convolution_spreads_support() {
        let a = CenteredMatrix::from_fn(1, |_, _| 1.).unwrap();
        let mut result = CenteredMatrix::new(2).unwrap();
        convolve(&mut result, &a, &a);
        assert_eq!(result.element(0, 0), Ok(9.));
        assert_eq!(result.element(2, 2), Ok(1.));
        assert_eq!(result.element(1, 0), Ok(6.));
        assert_eq!(result.sum(), 81.);
    }

    #[test]
    fn test_correlate_is_mirrored_convolution() {
        let a = CenteredMatrix::from_fn(1, |x, y| (1 + x + 2 * y).abs() as f64).unwrap();
        let b = CenteredMatrix::from_fn(2, |x, y| (x - y * y) as f64).unwrap();
        let mirrored = CenteredMatrix::from_fn(1, |x, y| a.at(-x, -y)).unwrap();
        let mut corr = CenteredMatrix::new(2).unwrap();
        let mut conv = CenteredMatrix::new(2).unwrap();
        correlate(&mut corr, &a, &b);
        convolve(&mut conv, &mirrored, &b);
        for (c, v) in corr.as_slice().iter().zip(conv.as_slice()) {
            assert!((c - v).abs() < 1e-12, "{c} != {v}");
        }
    }

    #[test]
    fn test_convolve_is_bilinear() {
        let a = CenteredMatrix::from_fn(1, |x, y| (x + y) as f64 * 0.5).unwrap();
        let b = CenteredMatrix::from_fn(1, |x, y| (x * y) as f64 + 1.).unwrap();
        let scaled = CenteredMatrix::from_fn(1, |x, y| a.at(x, y) * 3.).unwrap();
        let mut ab = CenteredMatrix::new(2).unwrap();
        let mut sb = CenteredMatrix::new(2).unwrap();
        convolve(&mut ab, &a, &b);
        convolve(&mut sb, &scaled, &b);
        for (x, y) in ab.as_slice().iter().zip(sb.as_slice()) {
            assert!((x * 3. - y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_convolve_is_additive() {
        let a = CenteredMatrix::from_fn(2, |x, y| (x * 3 - y) as f64 * 0.25 + 1.).unwrap();
        let a2 = CenteredMatrix::from_fn(1, |x, y| ((x + 2) * (y - 1)) as f64 - 0.5).unwrap();
        let b = CenteredMatrix::from_fn(1, |x, y| (x * x + y) as f64 + 0.3).unwrap();
        let sum = CenteredMatrix::from_fn(2, |x, y| {
            a.at(x, y) + a2.element(x, y).unwrap_or(0.)
        })
        .unwrap();
        let mut ab = CenteredMatrix::new(3).unwrap();
        let mut a2b = CenteredMatrix::new(3).unwrap();
        let mut sum_b = CenteredMatrix::new(3).unwrap();
        convolve(&mut ab, &a, &b);
        convolve(&mut a2b, &a2, &b);
        convolve(&mut sum_b, &sum, &b);
        for ((x, y), z) in ab
            .as_slice()
            .iter()
            .zip(a2b.as_slice())
            .zip(sum_b.as_slice())
        {
            assert!((x + y - z).abs() < 1e-12, "{x} + {y} != {z}");
        }
    }

    #[test]
    fn test_normalize() {
        let mut m = CenteredMatrix::from_fn(1, |_, _| 2.).unwrap();
        m.normalize().unwrap();
        assert!((m.sum() - 1.).abs() < 1e-12);
        let mut zero = CenteredMatrix::new(1).unwrap();
        assert_eq!(zero.normalize(), Err(RetouchError::NumericDegeneracy));
    }
}
