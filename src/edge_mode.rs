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

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Default, Hash)]
/// Declares how a dense kernel treats taps falling outside of the image
pub enum EdgeMode {
    /// Taps outside of the image are omitted and contribute nothing,
    /// the kernel is not renormalized.
    #[default]
    Clip = 0,
    /// Kernel is clipped to an edge and the edge pixel replicated across filter
    Clamp = 1,
    /// Image is mirrored with rule `fedcba|abcdefgh|hgfedcb`
    Reflect = 2,
}

#[inline]
pub(crate) fn reflect_index(i: isize, n: isize) -> usize {
    let period = 2 * n;
    let i = i.rem_euclid(period);
    if i < n {
        i as usize
    } else {
        (period - i - 1) as usize
    }
}

impl EdgeMode {
    /// Maps coordinate `i` into `[0, n)` or returns `None` when the tap must be skipped.
    #[inline(always)]
    pub(crate) fn resolve(&self, i: isize, n: usize) -> Option<usize> {
        if i >= 0 && (i as usize) < n {
            return Some(i as usize);
        }
        match self {
            EdgeMode::Clip => None,
            EdgeMode::Clamp => Some(i.clamp(0, n as isize - 1) as usize),
            EdgeMode::Reflect => Some(reflect_index(i, n as isize)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(EdgeMode::Clip.resolve(-1, 5), None);
        assert_eq!(EdgeMode::Clip.resolve(5, 5), None);
        assert_eq!(EdgeMode::Clip.resolve(2, 5), Some(2));
        assert_eq!(EdgeMode::Clamp.resolve(-3, 5), Some(0));
        assert_eq!(EdgeMode::Clamp.resolve(7, 5), Some(4));
        assert_eq!(EdgeMode::Reflect.resolve(-1, 5), Some(0));
        assert_eq!(EdgeMode::Reflect.resolve(-2, 5), Some(1));
        assert_eq!(EdgeMode::Reflect.resolve(5, 5), Some(4));
        assert_eq!(EdgeMode::Reflect.resolve(6, 5), Some(3));
        assert_eq!(EdgeMode::Reflect.resolve(-12, 1), Some(0));
    }
}
