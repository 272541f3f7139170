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
use std::error::Error;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
/// Shows size mismatching
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RetouchError {
    ZeroBaseSize,
    MinimumSliceSizeMismatch(MismatchedSize),
    MinimumStrideSizeMismatch(MismatchedSize),
    ImagesMustMatch,
    ExceedingPointerSize,
    InvalidBitDepth(u32),
    /// Rejected operation parameter, carries a short description of the constraint.
    InvalidParameter(&'static str),
    MatrixIndexOutOfBounds {
        col: i32,
        row: i32,
        radius: usize,
    },
    InvalidLutShape {
        width: u32,
        height: u32,
    },
    /// Requested amount of elements that could not be reserved.
    AllocationFailure(usize),
    /// Linear system is singular or the produced kernel is not finite.
    NumericDegeneracy,
}

impl Error for RetouchError {}

impl std::fmt::Display for RetouchError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RetouchError::MinimumSliceSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum image slice size mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            RetouchError::MinimumStrideSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum stride must have size at least {} but it is {}",
                size.expected, size.received
            )),
            RetouchError::ZeroBaseSize => f.write_str("Image size must not be zero"),
            RetouchError::ImagesMustMatch => {
                f.write_str("Source and destination images must match in their dimensions")
            }
            RetouchError::ExceedingPointerSize => {
                f.write_str("Image bounds and kernel radius exceeds pointer capacity")
            }
            RetouchError::InvalidBitDepth(depth) => f.write_fmt(format_args!(
                "Bit depth must be 8 or 16, but received {depth}"
            )),
            RetouchError::InvalidParameter(what) => {
                f.write_fmt(format_args!("Invalid parameter: {what}"))
            }
            RetouchError::MatrixIndexOutOfBounds { col, row, radius } => f.write_fmt(
                format_args!("Offset ({col}, {row}) is outside of matrix with radius {radius}"),
            ),
            RetouchError::InvalidLutShape { width, height } => f.write_fmt(format_args!(
                "Image {width}x{height} is neither a HALD nor a strip 3D LUT"
            )),
            RetouchError::AllocationFailure(count) => {
                f.write_fmt(format_args!("Unable to allocate buffer of {count} elements"))
            }
            RetouchError::NumericDegeneracy => {
                f.write_str("Linear system is singular, kernel cannot be computed")
            }
        }
    }
}

/// Allocates vector of `len` copies of `value` reporting allocation failure instead of aborting.
pub(crate) fn try_vec<T: Clone>(len: usize, value: T) -> Result<Vec<T>, RetouchError> {
    let mut store = Vec::new();
    store
        .try_reserve_exact(len)
        .map_err(|_| RetouchError::AllocationFailure(len))?;
    store.resize(len, value);
    Ok(store)
}

pub(crate) fn check_slice_size<T>(
    arr: &[T],
    stride: usize,
    width: usize,
    height: usize,
    cn: usize,
) -> Result<(), RetouchError> {
    if width == 0 || height == 0 {
        return Err(RetouchError::ZeroBaseSize);
    }
    if arr.len() < stride * (height - 1) + width * cn {
        return Err(RetouchError::MinimumSliceSizeMismatch(MismatchedSize {
            expected: stride * height,
            received: arr.len(),
        }));
    }
    if stride < width * cn {
        return Err(RetouchError::MinimumStrideSizeMismatch(MismatchedSize {
            expected: width * cn,
            received: stride,
        }));
    }
    Ok(())
}

/// Rejects NaN, infinities and negative values.
#[inline]
pub(crate) fn check_non_negative(value: f64, what: &'static str) -> Result<(), RetouchError> {
    if !value.is_finite() || value < 0. {
        return Err(RetouchError::InvalidParameter(what));
    }
    Ok(())
}
