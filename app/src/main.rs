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

use flexi_logger::{Duplicate, Logger};
use image::{DynamicImage, RgbaImage};
use libretouch::{
    apply_lut3d, apply_tone_curve, film_grain, neon_edges, refocus, solarize, unsharp_mask, vivid,
    EdgeEffect, FilmGrainParams, Lut3d, Lut3dInterpolation, NeonParams, ProgressHook,
    RefocusParams, RetouchImage, RetouchImageMut, SolarizeMode, ThreadingPolicy, ToneCurve,
    UnsharpParams, CHANNELS,
};
use std::time::Instant;

fn setup_logging(base_level: &str) {
    Logger::try_with_str(base_level)
        .unwrap_or_else(|e| panic!("Logger initialization failed with {}", e))
        .duplicate_to_stderr(Duplicate::Info)
        .start()
        .unwrap_or_else(|e| panic!("Logger initialization failed with {}", e));
}

/// RGBA <-> BGRA, the swap is its own inverse.
fn swap_red_blue(data: &mut [u8]) {
    for px in data.chunks_exact_mut(CHANNELS) {
        px.swap(0, 2);
    }
}

fn synthesize(width: u32, height: u32) -> Vec<u8> {
    let mut data = vec![0u8; width as usize * height as usize * CHANNELS];
    for (y, row) in data.chunks_exact_mut(width as usize * CHANNELS).enumerate() {
        for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let stripe = if (x / 16 + y / 16) % 2 == 0 { 200 } else { 40 };
            px[0] = (x * 255 / width as usize) as u8;
            px[1] = stripe;
            px[2] = (y * 255 / height as usize) as u8;
            px[3] = 255;
        }
    }
    data
}

fn save(name: &str, image: &RetouchImageMut<u8>) {
    let mut data = image.data.borrow().to_vec();
    swap_red_blue(&mut data);
    match RgbaImage::from_raw(image.width, image.height, data) {
        Some(rgba) => {
            if let Err(e) = DynamicImage::ImageRgba8(rgba).save(name) {
                log::error!("failed to save {name}: {e}");
            }
        }
        None => log::error!("buffer of {name} does not match its size"),
    }
}

fn main() {
    setup_logging("info");

    let (width, height, mut bytes) = match std::env::args().nth(1) {
        Some(path) => {
            let img = image::open(&path)
                .unwrap_or_else(|e| panic!("Can't open {path}: {e}"))
                .to_rgba8();
            let (w, h) = img.dimensions();
            (w, h, img.into_raw())
        }
        None => (512, 384, synthesize(512, 384)),
    };
    swap_red_blue(&mut bytes);
    log::info!("dimensions {}x{}", width, height);

    let src_image = RetouchImage::borrow(&bytes, width, height);
    let progress = |p: u8| log::debug!("progress {p}%");
    let hook = ProgressHook::default().with_callback(&progress);
    let policy = ThreadingPolicy::Adaptive;
    let mut dst_image = RetouchImageMut::default();

    let start = Instant::now();
    refocus(&src_image, &mut dst_image, RefocusParams::default(), policy, &hook).unwrap();
    log::info!("refocus: {:?}", start.elapsed());
    save("refocused.png", &dst_image);

    let start = Instant::now();
    unsharp_mask(
        &src_image,
        &mut dst_image,
        UnsharpParams::new(3., 0.8, 0.02),
        policy,
        &hook,
    )
    .unwrap();
    log::info!("unsharp mask: {:?}", start.elapsed());
    save("sharpened.png", &dst_image);

    let start = Instant::now();
    solarize(&src_image, &mut dst_image, 30, SolarizeMode::Stretch, policy, &hook).unwrap();
    log::info!("solarize: {:?}", start.elapsed());
    save("solarized.png", &dst_image);

    let start = Instant::now();
    neon_edges(
        &src_image,
        &mut dst_image,
        NeonParams::new(EdgeEffect::Neon, 3, 2),
        policy,
        &hook,
    )
    .unwrap();
    log::info!("neon: {:?}", start.elapsed());
    save("neon.png", &dst_image);

    let start = Instant::now();
    vivid(&src_image, &mut dst_image, 60, policy, &hook).unwrap();
    log::info!("vivid: {:?}", start.elapsed());
    save("vivid.png", &dst_image);

    let lut = match std::env::args().nth(2) {
        Some(path) => {
            let lut_image =
                image::open(&path).unwrap_or_else(|e| panic!("Can't open {path}: {e}"));
            Lut3d::from_dynamic_image(&lut_image).unwrap()
        }
        None => Lut3d::identity(33).unwrap(),
    };
    let start = Instant::now();
    apply_lut3d(
        &src_image,
        &mut dst_image,
        &lut,
        100,
        Lut3dInterpolation::Tetrahedral,
        policy,
        &hook,
    )
    .unwrap();
    log::info!("lut3d: {:?}", start.elapsed());
    save("lut.png", &dst_image);

    let curve = ToneCurve::new::<u8>(&[(0, 0), (64, 48), (192, 215), (255, 255)]).unwrap();
    let start = Instant::now();
    apply_tone_curve(&src_image, &mut dst_image, &curve, policy, &hook).unwrap();
    log::info!("tone curve: {:?}", start.elapsed());
    save("curve.png", &dst_image);

    let start = Instant::now();
    film_grain(
        &src_image,
        &mut dst_image,
        FilmGrainParams::new(2400, 42),
        policy,
        &hook,
    )
    .unwrap();
    log::info!("film grain: {:?}", start.elapsed());
    save("grain.png", &dst_image);
}
