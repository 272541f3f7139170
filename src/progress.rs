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
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};

/// Outcome of an operation that was not rejected.
#[must_use]
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Status {
    Completed,
    /// Stopped early on caller request, destination content is undefined.
    Cancelled,
}

impl Status {
    pub fn is_completed(&self) -> bool {
        *self == Status::Completed
    }
}

/// Caller supplied progress reporting and cooperative cancellation.
///
/// Progress is reported in `0..=100` and only when the value grows.
/// Cancellation flag is polled once per processed row.
#[derive(Default, Copy, Clone)]
pub struct ProgressHook<'a> {
    callback: Option<&'a (dyn Fn(u8) + Send + Sync)>,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> ProgressHook<'a> {
    /// Hook that neither reports nor cancels.
    pub fn none() -> ProgressHook<'static> {
        ProgressHook {
            callback: None,
            cancel: None,
        }
    }

    pub fn with_callback(mut self, callback: &'a (dyn Fn(u8) + Send + Sync)) -> Self {
        self.callback = Some(callback);
        self
    }

    pub fn with_cancel_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|x| x.load(Ordering::Relaxed))
    }

    #[inline]
    pub(crate) fn report(&self, percent: u8) {
        if let Some(callback) = self.callback {
            callback(percent.min(100));
        }
    }

    /// Tracks `total` rows mapped onto the `[from, to]` progress window.
    pub(crate) fn stage(&self, from: u8, to: u8, total: usize) -> StageTracker<'_, 'a> {
        StageTracker {
            hook: self,
            from,
            to,
            total: total.max(1),
            done: AtomicUsize::new(0),
            last: AtomicU8::new(from),
        }
    }
}

pub(crate) struct StageTracker<'h, 'a> {
    hook: &'h ProgressHook<'a>,
    from: u8,
    to: u8,
    total: usize,
    done: AtomicUsize,
    last: AtomicU8,
}

impl StageTracker<'_, '_> {
    #[inline]
    pub(crate) fn is_cancelled(&self) -> bool {
        self.hook.is_cancelled()
    }

    pub(crate) fn row_done(&self) {
        if self.hook.callback.is_none() {
            return;
        }
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        let span = self.to.saturating_sub(self.from) as usize;
        let percent = (self.from as usize + span * done.min(self.total) / self.total) as u8;
        if self.last.fetch_max(percent, Ordering::Relaxed) < percent {
            self.hook.report(percent);
        }
    }

    /// Status after the stage finished or bailed out.
    pub(crate) fn status(&self) -> Status {
        if self.is_cancelled() {
            Status::Cancelled
        } else {
            Status::Completed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_progress_is_monotonic() {
        let seen = Mutex::new(Vec::new());
        let callback = |p: u8| seen.lock().unwrap().push(p);
        let hook = ProgressHook::default().with_callback(&callback);
        let stage = hook.stage(0, 50, 10);
        for _ in 0..10 {
            stage.row_done();
        }
        let stage = hook.stage(50, 100, 3);
        for _ in 0..3 {
            stage.row_done();
        }
        let seen = seen.lock().unwrap();
        assert!(seen.windows(2).all(|w| w[0] < w[1]), "{seen:?}");
        assert_eq!(*seen.last().unwrap(), 100);
    }

    #[test]
    fn test_cancel_flag() {
        let flag = AtomicBool::new(false);
        let hook = ProgressHook::default().with_cancel_flag(&flag);
        assert!(!hook.is_cancelled());
        flag.store(true, Ordering::Relaxed);
        assert!(hook.is_cancelled());
        assert_eq!(hook.stage(0, 100, 1).status(), Status::Cancelled);
        assert!(!ProgressHook::none().is_cancelled());
    }
}
