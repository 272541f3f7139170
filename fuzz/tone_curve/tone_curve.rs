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

use libfuzzer_sys::fuzz_target;
use libretouch::{
    apply_tone_curve, ProgressHook, RetouchImage, RetouchImageMut, ThreadingPolicy, ToneCurve,
    CHANNELS, MAX_CURVE_POINTS,
};

fuzz_target!(|data: Vec<(u8, u8)>| {
    if data.is_empty() || data.len() > MAX_CURVE_POINTS {
        return;
    }
    let points = data
        .iter()
        .map(|&(x, y)| (x as u32, y as u32))
        .collect::<Vec<_>>();
    // Duplicate abscissas are rejected.
    let Ok(curve) = ToneCurve::new::<u8>(&points) else {
        return;
    };
    let src: Vec<u8> = (0..16 * 16 * CHANNELS).map(|x| x as u8).collect();
    let src_image = RetouchImage::borrow(&src, 16, 16);
    let mut dst_image = RetouchImageMut::default();
    apply_tone_curve(
        &src_image,
        &mut dst_image,
        &curve,
        ThreadingPolicy::Single,
        &ProgressHook::none(),
    )
    .unwrap();
});
