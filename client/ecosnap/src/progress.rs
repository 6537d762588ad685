//! Cosmetic upload progress.
//!
//! The backend gives no byte-level feedback for `createAction`, so the
//! progress bar is driven by a timer: every tick adds a fixed step until a
//! ceiling short of 100.  The caller jumps to 100 once the request
//! actually succeeds.
//!
//! The ticker is a spawned tokio task bound to a [`CancellationToken`].
//! [`ProgressTicker::stop`] cancels it, and so does dropping the ticker, so
//! it never outlives the submission that started it.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerConfig {
    pub step: u8,
    pub every: Duration,
    pub ceiling: u8,
}

impl Default for TickerConfig {
    /// +10 every 100 ms, holding at 90.
    fn default() -> Self {
        Self {
            step: 10,
            every: Duration::from_millis(100),
            ceiling: 90,
        }
    }
}

pub struct ProgressTicker {
    progress: watch::Receiver<u8>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    /// Start at 0; the first increment lands one period after start.
    pub fn start(config: TickerConfig) -> Self {
        let (tx, rx) = watch::channel(0u8);
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let ceiling = config.ceiling.min(100);

        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + config.every;
            let mut interval = tokio::time::interval_at(start, config.every);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        let next = tx.borrow().saturating_add(config.step).min(ceiling);
                        tx.send_replace(next);
                        if next >= ceiling {
                            break;
                        }
                    }
                }
            }
        });

        Self {
            progress: rx,
            cancel,
            handle,
        }
    }

    pub fn progress(&self) -> u8 {
        *self.progress.borrow()
    }

    /// Receiver that wakes on every increment.  `changed()` errors once
    /// the ticker has stopped.
    pub fn subscribe(&self) -> watch::Receiver<u8> {
        self.progress.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Cancel the timer and return the last value it reached.
    pub fn stop(self) -> u8 {
        self.cancel.cancel();
        self.progress()
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
