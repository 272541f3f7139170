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
use crate::safe_math::SafeMul;
use crate::util::try_vec;
use crate::RetouchError;

/// Dense `rows × cols` matrix of `f64`.
///
/// Storage is row-major: element `(r, c)` lives at `r * cols + c`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl LinearMatrix {
    /// Zero filled matrix
    pub fn new(rows: usize, cols: usize) -> Result<LinearMatrix, RetouchError> {
        let len = rows.safe_mul(cols)?;
        Ok(LinearMatrix {
            rows,
            cols,
            data: try_vec(len, 0.)?,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut f64> {
        if row < self.rows && col < self.cols {
            Some(&mut self.data[row * self.cols + col])
        } else {
            None
        }
    }

    #[inline(always)]
    pub(crate) fn at(&self, row: usize, col: usize) -> f64 {
        debug_assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col]
    }

    #[inline(always)]
    pub(crate) fn at_mut(&mut self, row: usize, col: usize) -> &mut f64 {
        debug_assert!(row < self.rows && col < self.cols);
        &mut self.data[row * self.cols + col]
    }

    /// Solves `self · x = rhs` for a square matrix using LU decomposition with partial pivoting.
    ///
    /// Singular systems and non-finite solutions are reported as [RetouchError::NumericDegeneracy].
    #[allow(clippy::needless_range_loop)]
    pub fn solve(&self, rhs: &[f64]) -> Result<Vec<f64>, RetouchError> {
        let n = self.rows;
        if self.cols != n {
            return Err(RetouchError::InvalidParameter("system matrix must be square"));
        }
        if rhs.len() != n {
            return Err(RetouchError::InvalidParameter(
                "right hand side must have one value per matrix row",
            ));
        }
        if n == 0 {
            return Ok(Vec::new());
        }

        let scale = self.data.iter().fold(0f64, |acc, &x| acc.max(x.abs()));
        if scale == 0. || !scale.is_finite() {
            return Err(RetouchError::NumericDegeneracy);
        }
        let tolerance = scale * n as f64 * f64::EPSILON;

        let mut lu = self.data.clone();
        let mut x = rhs.to_vec();

        for col in 0..n {
            let mut max_row = col;
            let mut max_val = lu[col * n + col].abs();
            for row in (col + 1)..n {
                let val = lu[row * n + col].abs();
                if val > max_val {
                    max_val = val;
                    max_row = row;
                }
            }

            if max_val <= tolerance {
                log::warn!("Pivot {max_val:e} in column {col} of {n}x{n} system is below {tolerance:e}");
                return Err(RetouchError::NumericDegeneracy);
            }

            if max_row != col {
                for j in 0..n {
                    lu.swap(col * n + j, max_row * n + j);
                }
                x.swap(col, max_row);
            }

            let pivot = lu[col * n + col];
            for row in (col + 1)..n {
                let factor = lu[row * n + col] / pivot;
                if factor == 0. {
                    continue;
                }
                lu[row * n + col] = factor;
                for j in (col + 1)..n {
                    lu[row * n + j] -= factor * lu[col * n + j];
                }
                x[row] -= factor * x[col];
            }
        }

        for row in (0..n).rev() {
            let mut sum = x[row];
            for j in (row + 1)..n {
                sum -= lu[row * n + j] * x[j];
            }
            x[row] = sum / lu[row * n + row];
        }

        if x.iter().any(|v| !v.is_finite()) {
            log::warn!("Solution of {n}x{n} system is not finite");
            return Err(RetouchError::NumericDegeneracy);
        }
        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_layout() {
        let mut m = LinearMatrix::new(2, 3).unwrap();
        *m.get_mut(1, 2).unwrap() = 5.;
        assert_eq!(m.as_slice()[5], 5.);
        assert_eq!(m.get(1, 2), Some(5.));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 3), None);
    }

    #[test]
    fn test_solve_requires_pivoting() {
        let mut m = LinearMatrix::new(3, 3).unwrap();
        let values = [0., 2., 1., 1., 1., 1., 2., 1., 0.];
        m.as_mut_slice().copy_from_slice(&values);
        // x = (1, 2, 3)
        let rhs = [7., 6., 4.];
        let x = m.solve(&rhs).unwrap();
        for (got, expected) in x.iter().zip([1., 2., 3.]) {
            assert!(
                (got - expected).abs() < 1e-12,
                "Expected {expected} but it was {got}"
            );
        }
    }

    #[test]
    fn test_singular_system_is_degenerate() {
        let mut m = LinearMatrix::new(2, 2).unwrap();
        m.as_mut_slice().copy_from_slice(&[1., 2., 2., 4.]);
        assert_eq!(m.solve(&[1., 2.]), Err(RetouchError::NumericDegeneracy));
        let zero = LinearMatrix::new(2, 2).unwrap();
        assert_eq!(zero.solve(&[0., 0.]), Err(RetouchError::NumericDegeneracy));
    }

    #[test]
    fn test_solve_rejects_bad_shapes() {
        let m = LinearMatrix::new(2, 3).unwrap();
        assert!(matches!(
            m.solve(&[0., 0.]),
            Err(RetouchError::InvalidParameter(_))
        ));
        let column = LinearMatrix::new(2, 1).unwrap();
        assert!(matches!(
            column.solve(&[1., 2.]),
            Err(RetouchError::InvalidParameter(_))
        ));
    }
}
