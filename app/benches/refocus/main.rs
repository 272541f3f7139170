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

use criterion::{criterion_group, criterion_main, Criterion};
use libretouch::{
    refocus, ProgressHook, RefocusParams, RetouchImage, RetouchImageMut, ThreadingPolicy, CHANNELS,
};

fn noise_image(width: u32, height: u32) -> Vec<u8> {
    let mut state = 0x2545_f491u32;
    (0..width as usize * height as usize * CHANNELS)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut c = c.benchmark_group("Refocus");
    c.sample_size(10);

    let (width, height) = (1024u32, 768u32);
    let src = noise_image(width, height);
    let src_image = RetouchImage::borrow(&src, width, height);

    for matrix_radius in [3usize, 5, 10] {
        c.bench_function(format!("RGBA refocus matrix radius: {matrix_radius}"), |b| {
            let mut dst_image = RetouchImageMut::alloc(width, height).unwrap();
            let params = RefocusParams {
                matrix_radius,
                ..Default::default()
            };
            b.iter(|| {
                refocus(
                    &src_image,
                    &mut dst_image,
                    params,
                    ThreadingPolicy::Adaptive,
                    &ProgressHook::none(),
                )
                .unwrap();
            })
        });
    }

    c.bench_function("Refocus kernel matrix radius: 10", |b| {
        let params = RefocusParams {
            matrix_radius: 10,
            ..Default::default()
        };
        b.iter(|| libretouch::refocus::refocus_kernel(&params).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
