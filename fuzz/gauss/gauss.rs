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
    gaussian_blur, AlphaMode, ProgressHook, RetouchImage, RetouchImageMut, ThreadingPolicy,
};

fuzz_target!(|data: (u8, u8, u8)| {
    fuzz_8bit(data.0 as usize, data.1 as usize, data.2 as f64 / 8.);
    fuzz_16bit(data.0 as usize, data.1 as usize, data.2 as f64 / 8.);
});

fn fuzz_8bit(width: usize, height: usize, radius: f64) {
    if width == 0 || height == 0 {
        return;
    }
    let src_image = RetouchImage::<u8>::alloc(width as u32, height as u32).unwrap();
    let mut dst_image = RetouchImageMut::default();
    gaussian_blur(
        &src_image,
        &mut dst_image,
        radius,
        AlphaMode::Preserve,
        ThreadingPolicy::Single,
        &ProgressHook::none(),
    )
    .unwrap();
}

fn fuzz_16bit(width: usize, height: usize, radius: f64) {
    if width == 0 || height == 0 {
        return;
    }
    let src_image = RetouchImage::<u16>::alloc(width as u32, height as u32).unwrap();
    let mut dst_image = RetouchImageMut::default();
    gaussian_blur(
        &src_image,
        &mut dst_image,
        radius,
        AlphaMode::Process,
        ThreadingPolicy::Adaptive,
        &ProgressHook::none(),
    )
    .unwrap();
}
