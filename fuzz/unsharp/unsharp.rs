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
    unsharp_mask, ProgressHook, RetouchImage, RetouchImageMut, ThreadingPolicy, UnsharpParams,
    CHANNELS,
};

fuzz_target!(|data: (u8, u8, u8, u8, u8)| {
    let width = data.0 as u32;
    let height = data.1 as u32;
    if width == 0 || height == 0 {
        return;
    }
    let src: Vec<u16> = (0..width as usize * height as usize * CHANNELS)
        .map(|x| (x * 509 % 65536) as u16)
        .collect();
    let src_image = RetouchImage::borrow(&src, width, height);
    let mut dst_image = RetouchImageMut::default();
    let params = UnsharpParams::new(data.2 as f64 / 16., data.3 as f64 / 32., data.4 as f64 / 255.);
    unsharp_mask(
        &src_image,
        &mut dst_image,
        params,
        ThreadingPolicy::Single,
        &ProgressHook::none(),
    )
    .unwrap();
});
