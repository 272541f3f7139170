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
use crate::curves::ToneCurve;
use crate::{
    BitDepth, ProgressHook, RetouchError, RetouchImage, RetouchImageMut, Sample, Status,
    ThreadingPolicy,
};

/// Scale keeping luminosity of a gain row, `1` when gains cancel out.
fn luminosity_norm(gains: [f64; 3]) -> f64 {
    let sum: f64 = gains.iter().sum();
    if sum == 0. {
        1.
    } else {
        (1. / sum).abs()
    }
}

fn vivid_curve<T: Sample>() -> Result<ToneCurve, RetouchError> {
    match T::BIT_DEPTH {
        BitDepth::Eight => ToneCurve::new::<T>(&[(0, 0), (63, 60), (191, 194), (255, 255)]),
        BitDepth::Sixteen => ToneCurve::new::<T>(&[
            (0, 0),
            (16128, 15360),
            (48896, 49664),
            (65535, 65535),
        ]),
    }
}

/// Boosts saturation with a channel mixer and adds contrast with a soft S curve.
///
/// `level` in `0..=100`, each colour channel gets gain `1 + 2 * level / 100` and the other
/// two channels contribute `-level / 100`. Alpha is copied.
pub fn vivid<T: Sample>(
    src: &RetouchImage<T>,
    dst: &mut RetouchImageMut<T>,
    level: u32,
    threading_policy: ThreadingPolicy,
    hook: &ProgressHook,
) -> Result<Status, RetouchError> {
    if level > 100 {
        return Err(RetouchError::InvalidParameter(
            "vivid level must be in range 0..=100",
        ));
    }
    let amount = level as f64 / 100.;
    let own = 1. + amount + amount;
    let other = -amount;
    let norm = luminosity_norm([own, other, other]);
    let curve = vivid_curve::<T>()?;

    process_pixels(src, dst, threading_policy, hook, |_, _, src, dst| {
        let b: f64 = src[0].as_();
        let g: f64 = src[1].as_();
        let r: f64 = src[2].as_();
        let mixed = [
            (own * b + other * g + other * r) * norm,
            (other * b + own * g + other * r) * norm,
            (other * b + other * g + own * r) * norm,
        ];
        for (dst, value) in dst.iter_mut().zip(mixed) {
            *dst = curve.map(T::from_f64_rounded(value));
        }
        dst[3] = src[3];
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<T: Sample>(data: &[T], level: u32) -> Vec<T> {
        let src = RetouchImage::borrow(data, (data.len() / 4) as u32, 1);
        let mut dst = RetouchImageMut::default();
        let status = vivid(
            &src,
            &mut dst,
            level,
            ThreadingPolicy::Single,
            &ProgressHook::none(),
        )
        .unwrap();
        assert_eq!(status, Status::Completed);
        dst.data.borrow().to_vec()
    }

    #[test]
    fn test_grey_only_gets_curve() {
        let out = run(&[63u8, 63, 63, 9, 191, 191, 191, 9], 80);
        assert_eq!(out, vec![60, 60, 60, 9, 194, 194, 194, 9]);
    }

    #[test]
    fn test_saturation_grows() {
        let out = run(&[60u8, 100, 140, 255], 50);
        // blue = 2 * 60 - 0.5 * 100 - 0.5 * 140 = 0
        assert_eq!(out[0], 0);
        assert!(out[2] > 140);
        assert_eq!(out[3], 255);
        let out16 = run(&[15000u16, 25000, 36000, 65535], 50);
        assert!(out16[2] > 36000);
        assert!(out16[0] < 15000);
    }

    #[test]
    fn test_luminosity_norm() {
        assert_eq!(luminosity_norm([1., 0., 0.]), 1.);
        assert_eq!(luminosity_norm([1., -1., 0.]), 1.);
        assert_eq!(luminosity_norm([0.5, 0.5, 1.]), 0.5);
    }
}
