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
    refocus, EdgeMode, ProgressHook, RefocusParams, RetouchImageMut, ThreadingPolicy, CHANNELS,
};

#[derive(Clone, Debug, Arbitrary)]
pub struct SrcImage {
    pub src_width: u8,
    pub src_height: u8,
    pub value: u8,
    pub matrix_radius: u8,
    pub circle_radius: u8,
    pub gauss_radius: u8,
    pub correlation: u8,
    pub noise: u8,
    pub edge_mode: u8,
    pub symmetric: bool,
    pub threading: bool,
}

fuzz_target!(|data: SrcImage| {
    if data.src_width == 0 || data.src_height == 0 {
        return;
    }
    if data.src_width > 64 || data.src_height > 64 {
        return;
    }
    let edge_mode = match data.edge_mode % 3 {
        0 => EdgeMode::Clip,
        1 => EdgeMode::Clamp,
        _ => EdgeMode::Reflect,
    };
    let params = RefocusParams {
        matrix_radius: (data.matrix_radius % 8) as usize,
        circle_radius: data.circle_radius as f64 / 32.,
        gauss_radius: data.gauss_radius as f64 / 32.,
        correlation: data.correlation as f64 / 255.,
        noise: data.noise as f64 / 2550.,
        symmetric: data.symmetric,
        edge_mode,
        ..Default::default()
    };
    let policy = if data.threading {
        ThreadingPolicy::Adaptive
    } else {
        ThreadingPolicy::Single
    };

    let width = data.src_width as u32;
    let height = data.src_height as u32;
    let src = vec![data.value; width as usize * height as usize * CHANNELS];
    let src_image = libretouch::RetouchImage::borrow(&src, width, height);
    let mut dst_image = RetouchImageMut::default();
    // Degenerate systems are reported, never panicked on.
    _ = refocus(
        &src_image,
        &mut dst_image,
        params,
        policy,
        &ProgressHook::none(),
    );
});
