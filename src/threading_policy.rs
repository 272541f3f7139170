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
use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSliceMut};
use std::{num::NonZeroUsize, thread::available_parallelism};

#[repr(C)]
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Default, Hash)]
/// Set threading policy.
pub enum ThreadingPolicy {
    /// Use only one thread, current is preferred.
    #[default]
    Single,
    /// Compute adaptive thread count between 1..available CPUs.
    Adaptive,
    /// Like `Adaptive`, but reserve given amount of threads (i.e. those will not be
    /// used).
    AdaptiveReserve(NonZeroUsize),
    /// Use specified number of threads.
    Fixed(NonZeroUsize),
}

impl ThreadingPolicy {
    /// Returns the number of threads to use for the given image dimensions under the
    /// selected policy variant.
    ///
    /// Must return at least 1.
    pub fn thread_count(&self, width: u32, height: u32) -> usize {
        let pixels = width as usize * height as usize;
        match self {
            ThreadingPolicy::Single => 1,
            ThreadingPolicy::Adaptive => {
                (pixels / (256 * 256)).clamp(1, Self::available_parallelism(2))
            }
            ThreadingPolicy::AdaptiveReserve(reserve) => {
                let reserve = reserve.get();

                let max_threads = {
                    let max_threads = Self::available_parallelism(1);

                    if max_threads <= reserve {
                        1
                    } else {
                        max_threads
                    }
                };

                (pixels / (256 * 256)).clamp(1, max_threads.saturating_sub(reserve).max(1))
            }
            ThreadingPolicy::Fixed(fixed) => fixed.get(),
        }
    }

    // Make always return at least some minimal amount of threads, if multi-threading were requested
    // At least on single core CPU have 2 threads is beneficial
    fn available_parallelism(min: usize) -> usize {
        available_parallelism()
            .map(|x| x.get())
            .unwrap_or(1)
            .max(min)
    }

    /// Runs `worker(y, row)` for every destination row, rows are independent.
    pub(crate) fn for_each_row<T, F>(
        &self,
        dst: &mut [T],
        stride: usize,
        width: u32,
        height: u32,
        worker: F,
    ) where
        T: Send,
        F: Fn(usize, &mut [T]) + Send + Sync,
    {
        let len = (stride * height as usize).min(dst.len());
        let rows = &mut dst[..len];
        let thread_count = self.thread_count(width, height);
        if thread_count > 1 {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(thread_count)
                .build()
            {
                Ok(pool) => {
                    pool.install(|| {
                        rows.par_chunks_mut(stride)
                            .enumerate()
                            .for_each(|(y, row)| worker(y, row));
                    });
                    return;
                }
                Err(err) => {
                    log::warn!("Thread pool of {thread_count} threads is unavailable: {err}, running on a single thread");
                }
            }
        }
        for (y, row) in rows.chunks_mut(stride).enumerate() {
            worker(y, row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_count_is_positive() {
        assert_eq!(ThreadingPolicy::Single.thread_count(4096, 4096), 1);
        assert!(ThreadingPolicy::Adaptive.thread_count(1, 1) >= 1);
        let fixed = ThreadingPolicy::Fixed(NonZeroUsize::new(3).unwrap());
        assert_eq!(fixed.thread_count(1, 1), 3);
        let reserve = ThreadingPolicy::AdaptiveReserve(NonZeroUsize::new(64).unwrap());
        assert!(reserve.thread_count(8192, 8192) >= 1);
    }

    #[test]
    fn test_rows_are_visited_once() {
        let width = 3u32;
        let height = 5u32;
        let stride = width as usize * 4;
        for policy in [
            ThreadingPolicy::Single,
            ThreadingPolicy::Fixed(NonZeroUsize::new(2).unwrap()),
        ] {
            let mut data = vec![0u16; stride * height as usize];
            policy.for_each_row(&mut data, stride, width, height, |y, row| {
                for v in row.iter_mut() {
                    *v += y as u16 + 1;
                }
            });
            for (y, row) in data.chunks_exact(stride).enumerate() {
                assert!(row.iter().all(|&v| v == y as u16 + 1));
            }
        }
    }

    #[test]
    fn test_trailing_samples_are_not_rows() {
        let stride = 8;
        let mut data = vec![0u8; stride * 2 + 5];
        ThreadingPolicy::Single.for_each_row(&mut data, stride, 2, 2, |_, row| {
            row.fill(7);
        });
        assert!(data[..stride * 2].iter().all(|&v| v == 7));
        assert!(data[stride * 2..].iter().all(|&v| v == 0));
    }
}
