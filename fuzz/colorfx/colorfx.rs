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

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use libretouch::{
    apply_lut3d, film_grain, neon_edges, solarize, vivid, EdgeEffect, FilmGrainParams, Lut3d,
    Lut3dInterpolation, NeonParams, ProgressHook, RetouchImage, RetouchImageMut, SolarizeMode,
    ThreadingPolicy, CHANNELS,
};

#[derive(Clone, Debug, Arbitrary)]
pub struct SrcImage {
    pub src_width: u8,
    pub src_height: u8,
    pub effect: u8,
    pub level: u8,
    pub intensity: i8,
    pub border_width: i8,
    pub lut_size: u8,
    pub seed: u64,
}

fuzz_target!(|data: SrcImage| {
    if data.src_width == 0 || data.src_height == 0 {
        return;
    }
    let width = data.src_width as u32;
    let height = data.src_height as u32;
    let src: Vec<u8> = (0..width as usize * height as usize * CHANNELS)
        .map(|x| (x as u64 ^ data.seed) as u8)
        .collect();
    let src_image = RetouchImage::borrow(&src, width, height);
    let mut dst_image = RetouchImageMut::default();
    let level = data.level as u32 % 101;
    let hook = ProgressHook::none();
    let policy = ThreadingPolicy::Single;

    match data.effect % 6 {
        0 => {
            solarize(&src_image, &mut dst_image, level, SolarizeMode::Stretch, policy, &hook)
                .unwrap();
        }
        1 => {
            let effect = if data.level % 2 == 0 {
                EdgeEffect::Neon
            } else {
                EdgeEffect::FindEdges
            };
            let params = NeonParams::new(effect, data.intensity as i32, data.border_width as i32);
            neon_edges(&src_image, &mut dst_image, params, policy, &hook).unwrap();
        }
        2 => {
            vivid(&src_image, &mut dst_image, level, policy, &hook).unwrap();
        }
        3 | 4 => {
            let lut = Lut3d::identity(2 + data.lut_size as usize % 33).unwrap();
            let interpolation = if data.effect % 6 == 3 {
                Lut3dInterpolation::Tetrahedral
            } else {
                Lut3dInterpolation::Trilinear
            };
            apply_lut3d(
                &src_image,
                &mut dst_image,
                &lut,
                level,
                interpolation,
                policy,
                &hook,
            )
            .unwrap();
        }
        _ => {
            let params = FilmGrainParams::new(data.level as u32 * 16, data.seed);
            film_grain(&src_image, &mut dst_image, params, policy, &hook).unwrap();
        }
    }
});
