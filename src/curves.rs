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
use crate::util::try_vec;
use crate::{
    ProgressHook, RetouchError, RetouchImage, RetouchImageMut, Sample, Status, ThreadingPolicy,
};

/// Most control points a curve accepts.
pub const MAX_CURVE_POINTS: usize = 17;

type CrMatrix = [[f64; 4]; 4];

const CR_BASIS: CrMatrix = [
    [-0.5, 1.5, -1.5, 0.5],
    [1.0, -2.5, 2.0, -0.5],
    [-0.5, 0.0, 0.5, 0.0],
    [0.0, 1.0, 0.0, 0.0],
];

fn compose(a: &CrMatrix, b: &CrMatrix) -> CrMatrix {
    let mut ab = [[0f64; 4]; 4];
    for (i, row) in ab.iter_mut().enumerate() {
        for (j, dst) in row.iter_mut().enumerate() {
            *dst = (0..4).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    ab
}

/// Smooth tone mapping through control points, evaluated into a table of `MAX + 1` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneCurve {
    table: Vec<u16>,
}

impl ToneCurve {
    /// Builds Catmull-Rom curve through `points` given as `(input, output)` pairs.
    ///
    /// Points are ordered by input, outside the first and the last point the curve is flat.
    pub fn new<T: Sample>(points: &[(u32, u32)]) -> Result<ToneCurve, RetouchError> {
        if points.is_empty() || points.len() > MAX_CURVE_POINTS {
            return Err(RetouchError::InvalidParameter(
                "tone curve requires from 1 to 17 points",
            ));
        }
        let max = T::MAX;
        if points.iter().any(|&(x, y)| x > max || y > max) {
            return Err(RetouchError::InvalidParameter(
                "tone curve point exceeds sample range",
            ));
        }
        let mut points = points.to_vec();
        points.sort_by_key(|p| p.0);
        if points.windows(2).any(|w| w[0].0 == w[1].0) {
            return Err(RetouchError::InvalidParameter(
                "tone curve points must have distinct inputs",
            ));
        }

        let levels = max as usize + 1;
        let mut table = try_vec(levels, 0u16)?;
        for (i, dst) in table.iter_mut().enumerate() {
            *dst = i as u16;
        }

        let first = points[0];
        let last = points[points.len() - 1];
        for dst in table[..first.0 as usize].iter_mut() {
            *dst = first.1 as u16;
        }
        for dst in table[last.0 as usize..].iter_mut() {
            *dst = last.1 as u16;
        }

        let n = points.len();
        for i in 0..n.saturating_sub(1) {
            let p1 = if i == 0 { points[i] } else { points[i - 1] };
            let p2 = points[i];
            let p3 = points[i + 1];
            let p4 = if i == n - 2 { points[n - 1] } else { points[i + 2] };
            plot_segment(&mut table, max, [p1, p2, p3, p4]);
        }

        for &(x, y) in points.iter() {
            table[x as usize] = y as u16;
        }

        Ok(ToneCurve { table })
    }

    /// Curve mapping every value onto itself
    pub fn identity<T: Sample>() -> Result<ToneCurve, RetouchError> {
        ToneCurve::new::<T>(&[(0, 0), (T::MAX, T::MAX)])
    }

    #[inline(always)]
    pub fn value(&self, input: usize) -> u32 {
        self.table[input] as u32
    }

    #[inline(always)]
    pub(crate) fn map<T: Sample>(&self, input: T) -> T {
        let index: usize = input.as_();
        T::from_i64_clamped(self.table[index] as i64)
    }

    /// Evaluated table indexed by input value
    pub fn as_slice(&self) -> &[u16] {
        &self.table
    }
}

/// Plots one segment between the middle control points by forward differencing.
fn plot_segment(table: &mut [u16], max: u32, points: [(u32, u32); 4]) {
    let loop_div = max as usize * 3;
    let d = 1. / loop_div as f64;
    let d2 = d * d;
    let d3 = d * d * d;

    let mut geometry = [[0f64; 4]; 4];
    for (row, point) in geometry.iter_mut().zip(points.iter()) {
        row[0] = point.0 as f64;
        row[1] = point.1 as f64;
    }

    let forward: CrMatrix = [
        [0., 0., 0., 1.],
        [d3, d2, d, 0.],
        [6. * d3, 2. * d2, 0., 0.],
        [6. * d3, 0., 0., 0.],
    ];

    let deltas = compose(&forward, &compose(&CR_BASIS, &geometry));

    let (mut x, mut dx, mut dx2, dx3) = (deltas[0][0], deltas[1][0], deltas[2][0], deltas[3][0]);
    let (mut y, mut dy, mut dy2, dy3) = (deltas[0][1], deltas[1][1], deltas[2][1], deltas[3][1]);

    let maxf = max as f64;
    let mut last_x = x.clamp(0., maxf) as usize;
    let mut last_y = y.clamp(0., maxf) as u16;
    table[last_x] = last_y;

    for _ in 0..loop_div {
        x += dx;
        dx += dx2;
        dx2 += dx3;

        y += dy;
        dy += dy2;
        dy2 += dy3;

        let new_x = x.round().clamp(0., maxf) as usize;
        let new_y = y.round().clamp(0., maxf) as u16;

        if last_x != new_x || last_y != new_y {
            table[new_x] = new_y;
        }
        last_x = new_x;
        last_y = new_y;
    }
}

/// Maps the colour channels through `curve`, alpha is copied.
pub fn apply_tone_curve<T: Sample>(
    src: &RetouchImage<T>,
    dst: &mut RetouchImageMut<T>,
    curve: &ToneCurve,
    threading_policy: ThreadingPolicy,
    hook: &ProgressHook,
) -> Result<Status, RetouchError> {
    if curve.table.len() != T::MAX as usize + 1 {
        return Err(RetouchError::InvalidParameter(
            "tone curve was built for another bit depth",
        ));
    }
    process_pixels(src, dst, threading_policy, hook, |_, _, src, dst| {
        for (dst, &src) in dst.iter_mut().zip(src.iter()).take(3) {
            *dst = curve.map(src);
        }
        dst[3] = src[3];
    })
}
