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
use crate::util::{check_slice_size, try_vec};
use crate::RetouchError;
use std::borrow::Cow;
use std::fmt::Debug;

/// Interleaved channels per pixel, BGRA order with alpha last.
pub const CHANNELS: usize = 4;

/// Index of the alpha channel inside a pixel.
pub(crate) const ALPHA: usize = 3;

/// Declares whether the alpha channel takes part in a filter
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Default, Hash)]
pub enum AlphaMode {
    /// Alpha is copied from the source
    #[default]
    Preserve,
    /// Alpha is filtered exactly as colour channels are
    Process,
}

impl AlphaMode {
    /// Leading channels of a pixel the filter writes.
    #[inline]
    pub(crate) fn filtered_channels(&self) -> usize {
        match self {
            AlphaMode::Preserve => ALPHA,
            AlphaMode::Process => CHANNELS,
        }
    }
}

#[derive(Debug)]
pub enum BufferStore<'a, T: Copy + Debug> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
}

impl<T: Copy + Debug> BufferStore<'_, T> {
    #[allow(clippy::should_implement_trait)]
    pub fn borrow(&self) -> &[T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn borrow_mut(&mut self) -> &mut [T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    fn resize(&mut self, new_size: usize, value: T) -> Result<(), RetouchError> {
        match self {
            Self::Borrowed(_) => Ok(()),
            Self::Owned(vec) => {
                if new_size > vec.len() {
                    vec.try_reserve_exact(new_size - vec.len())
                        .map_err(|_| RetouchError::AllocationFailure(new_size))?;
                }
                vec.resize(new_size, value);
                Ok(())
            }
        }
    }
}

/// Immutable raster, 4 interleaved channels per pixel.
pub struct RetouchImage<'a, T: Clone + Copy + Default + Debug> {
    pub data: Cow<'a, [T]>,
    pub width: u32,
    pub height: u32,
    /// Samples per row, might be 0 for tightly packed rows
    pub stride: u32,
}

/// Mutable raster.
/// If it owns vector it does auto resizing on methods that working out-of-place.
pub struct RetouchImageMut<'a, T: Clone + Copy + Default + Debug> {
    pub data: BufferStore<'a, T>,
    pub width: u32,
    pub height: u32,
    /// Samples per row, might be 0 for tightly packed rows
    pub stride: u32,
}

impl<T: Clone + Copy + Default + Debug> Default for RetouchImageMut<'_, T> {
    fn default() -> Self {
        RetouchImageMut {
            data: BufferStore::Owned(Vec::new()),
            width: 0,
            height: 0,
            stride: 0,
        }
    }
}

fn packed_len(width: u32, height: u32) -> Result<usize, RetouchError> {
    (width as usize)
        .safe_mul(height as usize)?
        .safe_mul(CHANNELS)
}

impl<'a, T: Clone + Copy + Default + Debug> RetouchImage<'a, T> {
    /// Allocates zeroed image.
    pub fn alloc(width: u32, height: u32) -> Result<Self, RetouchError> {
        Ok(Self {
            data: Cow::Owned(try_vec(packed_len(width, height)?, T::default())?),
            width,
            height,
            stride: width * CHANNELS as u32,
        })
    }

    /// Borrows existing data
    /// Stride will be default `width * CHANNELS`
    pub fn borrow(arr: &'a [T], width: u32, height: u32) -> Self {
        Self {
            data: Cow::Borrowed(arr),
            width,
            height,
            stride: width * CHANNELS as u32,
        }
    }

    /// Returns row stride
    #[inline]
    pub fn row_stride(&self) -> u32 {
        if self.stride == 0 {
            self.width * CHANNELS as u32
        } else {
            self.stride
        }
    }

    #[inline]
    pub fn check_layout(&self) -> Result<(), RetouchError> {
        check_slice_size(
            self.data.as_ref(),
            self.row_stride() as usize,
            self.width as usize,
            self.height as usize,
            CHANNELS,
        )
    }

    /// Checks if it is matches the size of the other image
    #[inline]
    pub fn size_matches_mut(&self, other: &RetouchImageMut<'_, T>) -> Result<(), RetouchError> {
        if self.width == other.width && self.height == other.height {
            return Ok(());
        }
        Err(RetouchError::ImagesMustMatch)
    }

    /// Pixels of the row `y` without stride padding.
    #[inline]
    pub(crate) fn row(&self, y: usize) -> &[T] {
        let start = y * self.row_stride() as usize;
        &self.data.as_ref()[start..start + self.width as usize * CHANNELS]
    }

    /// Deep copy immutable image to mutable
    pub fn copy_to_mut(&self, dst: &mut RetouchImageMut<T>) -> Result<(), RetouchError> {
        self.check_layout()?;
        dst.check_layout(Some(self))?;
        self.size_matches_mut(dst)?;
        let dst_stride = dst.row_stride() as usize;
        let row_length = self.width as usize * CHANNELS;
        for (y, dst) in dst
            .data
            .borrow_mut()
            .chunks_mut(dst_stride)
            .take(self.height as usize)
            .enumerate()
        {
            dst[..row_length].copy_from_slice(self.row(y));
        }
        Ok(())
    }
}

impl<'a, T: Clone + Copy + Default + Debug> RetouchImageMut<'a, T> {
    /// Allocates zeroed image.
    pub fn alloc(width: u32, height: u32) -> Result<Self, RetouchError> {
        Ok(Self {
            data: BufferStore::Owned(try_vec(packed_len(width, height)?, T::default())?),
            width,
            height,
            stride: width * CHANNELS as u32,
        })
    }

    /// Mutable borrows existing data
    /// Stride will be default `width * CHANNELS`
    pub fn borrow(arr: &'a mut [T], width: u32, height: u32) -> Self {
        Self {
            data: BufferStore::Borrowed(arr),
            width,
            height,
            stride: width * CHANNELS as u32,
        }
    }

    /// Returns row stride
    #[inline]
    pub fn row_stride(&self) -> u32 {
        if self.stride == 0 {
            self.width * CHANNELS as u32
        } else {
            self.stride
        }
    }

    /// Checks if layout matches necessary requirements.
    /// Owned destination is resized to the other image.
    #[inline]
    pub fn check_layout(&mut self, other: Option<&RetouchImage<'_, T>>) -> Result<(), RetouchError> {
        if let Some(other) = other {
            if matches!(self.data, BufferStore::Owned(_)) {
                return self.resize(other.width, other.height);
            }
        }
        check_slice_size(
            self.data.borrow(),
            self.row_stride() as usize,
            self.width as usize,
            self.height as usize,
            CHANNELS,
        )
    }

    #[inline]
    pub fn to_immutable_ref(&self) -> RetouchImage<'_, T> {
        RetouchImage {
            data: Cow::Borrowed(self.data.borrow()),
            stride: self.row_stride(),
            width: self.width,
            height: self.height,
        }
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), RetouchError> {
        if width == 0 || height == 0 {
            return Err(RetouchError::ZeroBaseSize);
        }
        self.width = width;
        self.height = height;
        self.stride = width * CHANNELS as u32;
        self.data.resize(packed_len(width, height)?, T::default())
    }
}

/// Validates source and destination pair and sizes an owned destination.
pub(crate) fn prepare_pair<T: Clone + Copy + Default + Debug>(
    src: &RetouchImage<T>,
    dst: &mut RetouchImageMut<T>,
) -> Result<(), RetouchError> {
    src.check_layout()?;
    dst.check_layout(Some(src))?;
    src.size_matches_mut(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_destination_follows_source() {
        let src = RetouchImage::<u8>::alloc(7, 3).unwrap();
        let mut dst = RetouchImageMut::default();
        prepare_pair(&src, &mut dst).unwrap();
        assert_eq!(dst.width, 7);
        assert_eq!(dst.height, 3);
        assert_eq!(dst.data.borrow().len(), 7 * 3 * CHANNELS);
    }

    #[test]
    fn test_borrowed_destination_must_match() {
        let src = RetouchImage::<u16>::alloc(4, 4).unwrap();
        let mut store = vec![0u16; 3 * 4 * CHANNELS];
        let mut dst = RetouchImageMut::borrow(&mut store, 3, 4);
        assert_eq!(
            prepare_pair(&src, &mut dst),
            Err(RetouchError::ImagesMustMatch)
        );
    }

    #[test]
    fn test_copy_respects_stride() {
        let width = 2u32;
        let height = 2u32;
        let padded = vec![
            1u8, 2, 3, 4, 5, 6, 7, 8, 0, 0, //
            9, 10, 11, 12, 13, 14, 15, 16, 0, 0,
        ];
        let mut src = RetouchImage::borrow(&padded, width, height);
        src.stride = 10;
        let mut dst = RetouchImageMut::default();
        src.copy_to_mut(&mut dst).unwrap();
        assert_eq!(
            dst.data.borrow(),
            &[1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16]
        );
    }
}
