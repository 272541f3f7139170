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
    apply_lut3d, film_grain, neon_edges, vivid, EdgeEffect, FilmGrainParams, Lut3d,
    Lut3dInterpolation, NeonParams, ProgressHook, RetouchImage, RetouchImageMut, ThreadingPolicy,
    CHANNELS,
};

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut c = c.benchmark_group("ColorFx");
    c.sample_size(10);

    let (width, height) = (1920u32, 1080u32);
    let src: Vec<u8> = (0..width as usize * height as usize * CHANNELS)
        .map(|x| (x * 17 % 253) as u8)
        .collect();
    let src_image = RetouchImage::borrow(&src, width, height);
    let lut = Lut3d::identity(33).unwrap();

    for (name, interpolation) in [
        ("tetrahedral", Lut3dInterpolation::Tetrahedral),
        ("trilinear", Lut3dInterpolation::Trilinear),
    ] {
        c.bench_function(format!("RGBA lut3d 33: {name}"), |b| {
            let mut dst_image = RetouchImageMut::alloc(width, height).unwrap();
            b.iter(|| {
                apply_lut3d(
                    &src_image,
                    &mut dst_image,
                    &lut,
                    100,
                    interpolation,
                    ThreadingPolicy::Adaptive,
                    &ProgressHook::none(),
                )
                .unwrap();
            })
        });
    }

    c.bench_function("RGBA neon", |b| {
        let mut dst_image = RetouchImageMut::alloc(width, height).unwrap();
        b.iter(|| {
            neon_edges(
                &src_image,
                &mut dst_image,
                NeonParams::new(EdgeEffect::Neon, 3, 2),
                ThreadingPolicy::Adaptive,
                &ProgressHook::none(),
            )
            .unwrap();
        })
    });

    c.bench_function("RGBA vivid", |b| {
        let mut dst_image = RetouchImageMut::alloc(width, height).unwrap();
        b.iter(|| {
            vivid(
                &src_image,
                &mut dst_image,
                50,
                ThreadingPolicy::Adaptive,
                &ProgressHook::none(),
            )
            .unwrap();
        })
    });

    c.bench_function("RGBA film grain", |b| {
        let mut dst_image = RetouchImageMut::alloc(width, height).unwrap();
        b.iter(|| {
            film_grain(
                &src_image,
                &mut dst_image,
                FilmGrainParams::new(2400, 7),
                ThreadingPolicy::Adaptive,
                &ProgressHook::none(),
            )
            .unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
