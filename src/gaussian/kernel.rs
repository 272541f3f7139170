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
use crate::util::{check_non_negative, try_vec};
use crate::{RetouchError, Sample};

const SUB_SAMPLES: usize = 50;

/// Symmetric 1D gaussian kernel for two pass blurring.
///
/// `radius` is the radius of effect, kernel has `2 * ceil(radius - 0.5) + 1` taps and the
/// gaussian standard deviation is `radius / 2`. Every tap integrates the gaussian over its pixel
/// with 50 samples, the centre tap with 51 so it stays symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparableBlurKernel {
    radius: f64,
    weights: Vec<f64>,
}

impl SeparableBlurKernel {
    #[allow(clippy::needless_range_loop)]
    pub fn new(radius: f64) -> Result<SeparableBlurKernel, RetouchError> {
        check_non_negative(radius, "blur radius must be finite and non-negative")?;
        let half = (radius - 0.5).ceil().max(0.);
        if half > (u32::MAX / 4) as f64 {
            return Err(RetouchError::ExceedingPointerSize);
        }
        let length = 2 * half as usize + 1;
        if length == 1 {
            return Ok(SeparableBlurKernel {
                radius,
                weights: vec![1.],
            });
        }

        let std_dev = radius / 2.;
        let denominator = 2. * std_dev * std_dev;
        let mut weights = try_vec(length, 0f64)?;
        let middle = length / 2;

        for i in middle + 1..length {
            let base_x = i as f64 - middle as f64 - 0.5;
            let mut sum = 0.;
            for j in 1..=SUB_SAMPLES {
                let x = base_x + 0.02 * j as f64;
                if x <= radius {
                    sum += (-(x * x) / denominator).exp();
                }
            }
            weights[i] = sum / SUB_SAMPLES as f64;
        }

        for i in 0..middle {
            weights[i] = weights[length - 1 - i];
        }

        let mut sum = 0.;
        for j in 0..=SUB_SAMPLES {
            let x = -0.5 + 0.02 * j as f64;
            sum += (-(x * x) / denominator).exp();
        }
        weights[middle] = sum / (SUB_SAMPLES + 1) as f64;

        let total: f64 = weights.iter().sum();
        for weight in weights.iter_mut() {
            *weight /= total;
        }

        log::debug!("Separable kernel of radius {radius} has {length} taps");

        Ok(SeparableBlurKernel { radius, weights })
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Never true, a kernel has at least its centre tap
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Precomputes `weight * value` for every tap and every value of the sample type.
    pub fn lookup_table<T: Sample>(&self) -> Result<LookupTable, RetouchError> {
        let levels = T::MAX as usize + 1;
        let mut table = try_vec(self.weights.len().safe_mul(levels)?, 0f32)?;
        for (weight, row) in self.weights.iter().zip(table.chunks_exact_mut(levels)) {
            for (value, dst) in row.iter_mut().enumerate() {
                *dst = (weight * value as f64) as f32;
            }
        }
        Ok(LookupTable { levels, table })
    }
}

/// Products of kernel weights with sample values indexed by `[tap][value]`.
#[derive(Debug, Clone)]
pub struct LookupTable {
    levels: usize,
    table: Vec<f32>,
}

impl LookupTable {
    #[inline(always)]
    pub fn product(&self, tap: usize, value: usize) -> f32 {
        self.table[tap * self.levels + value]
    }

    /// Amount of distinct sample values, 256 or 65536
    #[inline]
    pub fn levels(&self) -> usize {
        self.levels
    }
}
