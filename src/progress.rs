use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicI64, Ordering},
    },
    time::Duration,
};

/// What a progress callback wants the running algorithm to do next.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Keep stepping and keep reporting.
    #[default]
    Continue,
    /// Run to completion without any further callback invocation.
    Finish,
    /// Abort now and report no result.
    Cancel,
}

/// Wraps an optional progress callback and applies the [`Progress`] protocol.
pub(crate) struct Reporter<F> {
    callback: Option<F>,
}

impl<F> Reporter<F> {
    pub(crate) fn new(callback: Option<F>) -> Self {
        Reporter { callback }
    }

    /// Invokes the callback, if any is still attached.
    /// Returns `false` when the caller asked to cancel.
    pub(crate) fn report(&mut self, invoke: impl FnOnce(&mut F) -> Progress) -> bool {
        let Some(callback) = self.callback.as_mut() else {
            return true;
        };
        match invoke(callback) {
            Progress::Continue => true,
            Progress::Finish => {
                self.callback = None;
                true
            }
            Progress::Cancel => false,
        }
    }
}

struct PacerState {
    /// Delay between steps in milliseconds. Negative means "finish without pacing".
    delay_ms: AtomicI64,
    cancelled: AtomicBool,
}

/// Throttles a running algorithm from another thread.
///
/// Clones share the same state, so one handle can sit inside a progress
/// callback while another one speeds up, skips or cancels the run.
#[derive(Clone)]
pub struct Pacer {
    state: Arc<PacerState>,
}

impl Pacer {
    /// Slowest pace reachable through [`Pacer::slower`].
    pub const MAX_DELAY_MS: i64 = 512;
    /// Pace [`Pacer::slower`] restarts from once the delay reached zero.
    pub const MIN_SLOW_DELAY_MS: i64 = 4;

    pub fn new(delay: Duration) -> Self {
        Pacer {
            state: Arc::new(PacerState {
                delay_ms: AtomicI64::new(delay.as_millis().min(i64::MAX as u128) as i64),
                cancelled: AtomicBool::new(false),
            }),
        }
    }

    /// Current delay between steps, `None` once the pacer is skipping.
    pub fn delay(&self) -> Option<Duration> {
        let ms = self.state.delay_ms.load(Ordering::Relaxed);
        (ms >= 0).then(|| Duration::from_millis(ms as u64))
    }

    /// Halves the delay between steps.
    pub fn faster(&self) {
        let _ = self
            .state
            .delay_ms
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |ms| {
                (ms >= 0).then_some(ms >> 1)
            });
    }

    /// Doubles the delay between steps, up to [`Pacer::MAX_DELAY_MS`].
    pub fn slower(&self) {
        let _ = self
            .state
            .delay_ms
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |ms| match ms {
                ms if ms < 0 => None,
                0 => Some(Pacer::MIN_SLOW_DELAY_MS),
                _ => Some((ms << 1).min(Pacer::MAX_DELAY_MS)),
            });
    }

    /// Lets the run complete without further pacing.
    pub fn skip(&self) {
        self.state.delay_ms.store(-1, Ordering::Relaxed);
    }

    pub fn cancel(&self) {
        self.state.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::Relaxed)
    }

    /// One progress point: sleeps for the current delay and tells the algorithm how to go on.
    pub fn tick(&self) -> Progress {
        if self.is_cancelled() {
            return Progress::Cancel;
        }
        match self.delay() {
            None => Progress::Finish,
            Some(delay) => {
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
                Progress::Continue
            }
        }
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Pacer::new(Duration::from_millis(16))
    }
}
