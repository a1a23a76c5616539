//! Throttled progress reporting for multi-file operations.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Receives `(current, total, name)` after files are processed.
pub type ProgressCallback = Arc<dyn Fn(usize, usize, &str) + Send + Sync>;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Default)]
struct ProgressState {
    current: usize,
    last_emit: Option<Instant>,
    last_reported: Option<usize>,
}

/// Counts processed files and forwards a rate-limited view to a callback.
///
/// The first and the last file are always reported, so a consumer always
/// sees a final call with `current == total`.
pub struct ProgressTracker {
    callback: Option<ProgressCallback>,
    total: usize,
    interval: Duration,
    state: Mutex<ProgressState>,
}

impl ProgressTracker {
    pub fn new(callback: Option<ProgressCallback>, total: usize) -> Self {
        Self::with_interval(callback, total, DEFAULT_INTERVAL)
    }

    pub fn with_interval(callback: Option<ProgressCallback>, total: usize, interval: Duration) -> Self {
        Self {
            callback,
            total,
            interval,
            state: Mutex::new(ProgressState::default()),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Mark one more file as processed.
    pub fn tick(&self, name: &str) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.current = (state.current + 1).min(self.total);

        let due = match state.last_emit {
            None => true,
            Some(at) => at.elapsed() >= self.interval,
        };
        if due || state.current == self.total {
            self.emit(&mut state, name);
        }
    }

    /// Guarantee the final `current == total` report.
    pub fn finish(&self) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.current = self.total;
        if state.last_reported != Some(self.total) {
            self.emit(&mut state, "");
        }
    }

    // Called with the lock held so reports stay monotonic across threads.
    fn emit(&self, state: &mut ProgressState, name: &str) {
        if let Some(callback) = &self.callback {
            callback(state.current, self.total, name);
        }
        state.last_emit = Some(Instant::now());
        state.last_reported = Some(state.current);
    }
}
