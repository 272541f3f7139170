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
use crate::RetouchError;
use num_traits::AsPrimitive;
use std::fmt::Debug;

#[repr(C)]
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
/// Bits per channel sample of a raster
pub enum BitDepth {
    Eight = 8,
    Sixteen = 16,
}

impl BitDepth {
    /// Largest representable sample value
    pub fn max_value(&self) -> u32 {
        match self {
            BitDepth::Eight => u8::MAX as u32,
            BitDepth::Sixteen => u16::MAX as u32,
        }
    }
}

impl TryFrom<u32> for BitDepth {
    type Error = RetouchError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            8 => Ok(BitDepth::Eight),
            16 => Ok(BitDepth::Sixteen),
            _ => Err(RetouchError::InvalidBitDepth(value)),
        }
    }
}

/// Storage type of a single channel sample, implemented for `u8` and `u16`.
pub trait Sample:
    Copy
    + Clone
    + Default
    + Debug
    + Send
    + Sync
    + PartialEq
    + AsPrimitive<f64>
    + AsPrimitive<u32>
    + AsPrimitive<usize>
    + 'static
{
    const BIT_DEPTH: BitDepth;
    const MAX: u32;

    /// Rounds to nearest and saturates into `[0, MAX]`, NaN maps to zero.
    fn from_f64_rounded(v: f64) -> Self;

    /// Saturates into `[0, MAX]`.
    fn from_i64_clamped(v: i64) -> Self;
}

macro_rules! impl_sample {
    ($sample: ident, $depth: expr) => {
        impl Sample for $sample {
            const BIT_DEPTH: BitDepth = $depth;
            const MAX: u32 = $sample::MAX as u32;

            #[inline(always)]
            fn from_f64_rounded(v: f64) -> Self {
                v.round().clamp(0., $sample::MAX as f64) as $sample
            }

            #[inline(always)]
            fn from_i64_clamped(v: i64) -> Self {
                v.clamp(0, $sample::MAX as i64) as $sample
            }
        }
    };
}

impl_sample!(u8, BitDepth::Eight);
impl_sample!(u16, BitDepth::Sixteen);
