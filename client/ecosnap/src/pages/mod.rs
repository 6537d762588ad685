//! Page controllers.
//!
//! Each page owns its own fetched state; nothing is cached across pages.
//! Controllers talk to the backend only through [`AppContext`].

pub mod actions;
pub mod create_action;
pub mod dashboard;
pub mod leaderboard;
pub mod quick_upload;
pub mod register;

use ecosnap_core::{Action, NewAction, UploadStatus};
use tokio::sync::watch;

use crate::context::AppContext;
use crate::errors::{ClientError, Result};
use crate::progress::{ProgressTicker, TickerConfig};

/// User-facing text for a failed request.
pub(crate) fn message_or(err: &ClientError, fallback: &str) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

/// Puts the status back to idle if a submission is abandoned mid-flight
/// (its future dropped), so the form is usable again.
struct InFlight<'a> {
    status: &'a watch::Sender<UploadStatus>,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.status.send_if_modified(|status| {
            if status.is_uploading() {
                *status = UploadStatus::Idle;
                true
            } else {
                false
            }
        });
    }
}

/// Runs the post-success cleanup when dropped, so a submission abandoned
/// during the display delay still leaves a fresh form.
pub(crate) struct Settle<F: FnOnce()>(Option<F>);

impl<F: FnOnce()> Settle<F> {
    pub(crate) fn new(cleanup: F) -> Self {
        Self(Some(cleanup))
    }
}

impl<F: FnOnce()> Drop for Settle<F> {
    fn drop(&mut self) {
        if let Some(cleanup) = self.0.take() {
            cleanup();
        }
    }
}

/// Send one `createAction` while a [`ProgressTicker`] animates `status`.
///
/// Leaves `status` at `uploading` with the last ticker value; the caller
/// settles it to success or error.  The ticker is stopped on every path.
pub(crate) async fn upload_with_progress(
    ctx: &AppContext,
    action: &NewAction,
    status: &watch::Sender<UploadStatus>,
    ticker: TickerConfig,
) -> Result<Action> {
    if status.borrow().is_uploading() {
        return Err(ClientError::SubmissionInFlight);
    }
    status.send_replace(UploadStatus::uploading(0));
    let mut guard = InFlight {
        status,
        armed: true,
    };

    let ticker = ProgressTicker::start(ticker);
    let mut progress = ticker.subscribe();
    let request = ctx.api.create_action(action);
    tokio::pin!(request);

    let result = loop {
        tokio::select! {
            result = &mut request => break result,
            changed = progress.changed() => match changed {
                Ok(()) => {
                    let value = *progress.borrow_and_update();
                    status.send_replace(UploadStatus::uploading(value));
                }
                // Ticker reached its ceiling.
                Err(_) => break (&mut request).await,
            },
        }
    };

    ticker.stop();
    guard.armed = false;
    result
}
