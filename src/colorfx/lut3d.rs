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
use crate::colorfx::process_pixels;
use crate::composite::mix_percent;
use crate::image::CHANNELS;
use crate::util::try_vec;
use crate::{
    ProgressHook, RetouchError, RetouchImage, RetouchImageMut, Sample, Status, ThreadingPolicy,
};

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Default, Hash)]
pub enum Lut3dInterpolation {
    /// Blend of the 4 corners of the tetrahedron containing the colour
    #[default]
    Tetrahedral,
    /// Blend of all 8 cube corners
    Trilinear,
}

/// Dense `N×N×N` colour table, entries are normalized RGB in `[0, 1]`.
///
/// Cell `(r, g, b)` is stored at `r + N * g + N² * b`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lut3d {
    size: usize,
    table: Vec<[f32; 3]>,
}

/// Largest number of cells per axis.
pub const MAX_LUT_SIZE: usize = 256;

/// Recognized layouts of a LUT image.
fn lut_shape(width: u32, height: u32) -> Option<usize> {
    let width = width as u64;
    let height = height as u64;
    let accepted = |size: u64| (2..=MAX_LUT_SIZE as u64).contains(&size);
    if width == height {
        let cells = width * width;
        let size = (cells as f64).cbrt().round() as u64;
        if accepted(size) && size * size * size == cells {
            return Some(size as usize);
        }
    }
    if accepted(height) && height.checked_mul(height) == Some(width) {
        return Some(height as usize);
    }
    None
}

impl Lut3d {
    /// Table mapping every colour onto itself
    pub fn identity(size: usize) -> Result<Lut3d, RetouchError> {
        if !(2..=MAX_LUT_SIZE).contains(&size) {
            return Err(RetouchError::InvalidParameter(
                "3D LUT size must be in range 2..=256",
            ));
        }
        let scale = 1. / (size - 1) as f32;
        let mut table = try_vec(size * size * size, [0f32; 3])?;
        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    table[r + size * g + size * size * b] =
                        [r as f32 * scale, g as f32 * scale, b as f32 * scale];
                }
            }
        }
        Ok(Lut3d { size, table })
    }

    /// Reads table from a decoded LUT image in BGRA layout.
    ///
    /// Square HALD image holds `N³` pixels read in row order, a strip image is `N²` wide and `N`
    /// high where `x mod N` is red, `x div N` is blue and `y` is green.
    pub fn from_image<T: Sample>(image: &RetouchImage<T>) -> Result<Lut3d, RetouchError> {
        image.check_layout()?;
        Lut3d::from_pixels(image.width, image.height, |x, y| {
            let px = &image.row(y)[x * CHANNELS..x * CHANNELS + CHANNELS];
            let max = T::MAX as f32;
            let r: u32 = px[2].as_();
            let g: u32 = px[1].as_();
            let b: u32 = px[0].as_();
            [r as f32 / max, g as f32 / max, b as f32 / max]
        })
    }

    /// Reads table from a decoded image of any pixel format.
    #[cfg(feature = "image")]
    #[cfg_attr(docsrs, doc(cfg(feature = "image")))]
    pub fn from_dynamic_image(image: &::image::DynamicImage) -> Result<Lut3d, RetouchError> {
        let rgb = image.to_rgb32f();
        Lut3d::from_pixels(rgb.width(), rgb.height(), |x, y| {
            rgb.get_pixel(x as u32, y as u32).0
        })
    }

    fn from_pixels<F>(width: u32, height: u32, pixel: F) -> Result<Lut3d, RetouchError>
    where
        F: Fn(usize, usize) -> [f32; 3],
    {
        let size = lut_shape(width, height).ok_or(RetouchError::InvalidLutShape { width, height })?;
        let mut table = try_vec(size * size * size, [0f32; 3])?;
        if width == height {
            let side = width as usize;
            for (i, cell) in table.iter_mut().enumerate() {
                *cell = pixel(i % side, i / side);
            }
        } else {
            for y in 0..size {
                for x in 0..size * size {
                    let (r, g, b) = (x % size, y, x / size);
                    table[r + size * g + size * size * b] = pixel(x, y);
                }
            }
        }
        log::debug!("Loaded {size}x{size}x{size} 3D LUT from {width}x{height} image");
        Ok(Lut3d { size, table })
    }

    /// Cells per axis
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn cell(&self, r: usize, g: usize, b: usize) -> [f32; 3] {
        self.table[r + self.size * g + self.size * self.size * b]
    }

    #[inline(always)]
    fn at(&self, r: usize, g: usize, b: usize) -> [f64; 3] {
        let c = self.table[r + self.size * g + self.size * self.size * b];
        [c[0] as f64, c[1] as f64, c[2] as f64]
    }

    /// Maps normalized RGB through the table.
    pub fn lookup(&self, rgb: [f64; 3], interpolation: Lut3dInterpolation) -> [f64; 3] {
        let last = (self.size - 1) as f64;
        let mut lo = [0usize; 3];
        let mut hi = [0usize; 3];
        let mut frac = [0f64; 3];
        for i in 0..3 {
            let f = rgb[i].clamp(0., 1.) * last;
            let floor = f.floor().min(last);
            lo[i] = floor as usize;
            hi[i] = (lo[i] + 1).min(self.size - 1);
            frac[i] = f - floor;
        }
        match interpolation {
            Lut3dInterpolation::Tetrahedral => self.tetrahedral(lo, hi, frac),
            Lut3dInterpolation::Trilinear => self.trilinear(lo, hi, frac),
        }
    }

    fn tetrahedral(&self, lo: [usize; 3], hi: [usize; 3], frac: [f64; 3]) -> [f64; 3] {
        let [dr, dg, db] = frac;
        let c000 = self.at(lo[0], lo[1], lo[2]);
        let c111 = self.at(hi[0], hi[1], hi[2]);
        let blend = |w0: f64, a: [f64; 3], w1: f64, b: [f64; 3], w2: f64, w3: f64| {
            let mut out = [0f64; 3];
            for i in 0..3 {
                out[i] = w0 * c000[i] + w1 * a[i] + w2 * b[i] + w3 * c111[i];
            }
            out
        };
        if dr > dg {
            if dg > db {
                let c100 = self.at(hi[0], lo[1], lo[2]);
                let c110 = self.at(hi[0], hi[1], lo[2]);
                blend(1. - dr, c100, dr - dg, c110, dg - db, db)
            } else if dr > db {
                let c100 = self.at(hi[0], lo[1], lo[2]);
                let c101 = self.at(hi[0], lo[1], hi[2]);
                blend(1. - dr, c100, dr - db, c101, db - dg, dg)
            } else {
                let c001 = self.at(lo[0], lo[1], hi[2]);
                let c101 = self.at(hi[0], lo[1], hi[2]);
                blend(1. - db, c001, db - dr, c101, dr - dg, dg)
            }
        } else if db > dg {
            let c001 = self.at(lo[0], lo[1], hi[2]);
            let c011 = self.at(lo[0], hi[1], hi[2]);
            blend(1. - db, c001, db - dg, c011, dg - dr, dr)
        } else if db > dr {
            let c010 = self.at(lo[0], hi[1], lo[2]);
            let c011 = self.at(lo[0], hi[1], hi[2]);
            blend(1. - dg, c010, dg - db, c011, db - dr, dr)
        } else {
            let c010 = self.at(lo[0], hi[1], lo[2]);
            let c110 = self.at(hi[0], hi[1], lo[2]);
            blend(1. - dg, c010, dg - dr, c110, dr - db, db)
        }
    }

    fn trilinear(&self, lo: [usize; 3], hi: [usize; 3], frac: [f64; 3]) -> [f64; 3] {
        let [dr, dg, db] = frac;
        let lerp = |a: [f64; 3], b: [f64; 3], t: f64| {
            [
                a[0] + (b[0] - a[0]) * t,
                a[1] + (b[1] - a[1]) * t,
                a[2] + (b[2] - a[2]) * t,
            ]
        };
        let c00 = lerp(self.at(lo[0], lo[1], lo[2]), self.at(hi[0], lo[1], lo[2]), dr);
        let c10 = lerp(self.at(lo[0], hi[1], lo[2]), self.at(hi[0], hi[1], lo[2]), dr);
        let c01 = lerp(self.at(lo[0], lo[1], hi[2]), self.at(hi[0], lo[1], hi[2]), dr);
        let c11 = lerp(self.at(lo[0], hi[1], hi[2]), self.at(hi[0], hi[1], hi[2]), dr);
        let c0 = lerp(c00, c10, dg);
        let c1 = lerp(c01, c11, dg);
        lerp(c0, c1, db)
    }
}

/// Maps colours through `lut` and mixes the result with the original by `intensity` percent.
///
/// `out = ((100 - intensity) * orig + intensity * mapped) / 100`, alpha is copied.
pub fn apply_lut3d<T: Sample>(
    src: &RetouchImage<T>,
    dst: &mut RetouchImageMut<T>,
    lut: &Lut3d,
    intensity: u32,
    interpolation: Lut3dInterpolation,
    threading_policy: ThreadingPolicy,
    hook: &ProgressHook,
) -> Result<Status, RetouchError> {
    if intensity > 100 {
        return Err(RetouchError::InvalidParameter(
            "3D LUT intensity must be in range 0..=100",
        ));
    }
    let max = T::MAX as f64;
    process_pixels(src, dst, threading_policy, hook, |_, _, src, dst| {
        let b: f64 = src[0].as_();
        let g: f64 = src[1].as_();
        let r: f64 = src[2].as_();
        let mapped = lut.lookup([r / max, g / max, b / max], interpolation);
        let bgr = [mapped[2], mapped[1], mapped[0]];
        for ((dst, &src), mapped) in dst.iter_mut().zip(src.iter()).zip(bgr) {
            *dst = mix_percent(src, T::from_f64_rounded(mapped * max), intensity);
        }
        dst[3] = src[3];
    })
}
