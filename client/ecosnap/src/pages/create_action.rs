//! Create Action page.

use ecosnap_core::{
    Action, ActionForm, MediaLimits, UploadStatus, UploadZone, ZoneEvent, ZoneOutcome,
};
use tokio::sync::watch;
use tracing::info;

use crate::context::AppContext;
use crate::errors::{ClientError, Result};
use crate::pages::{message_or, upload_with_progress, Settle};
use crate::progress::TickerConfig;

pub const MSG_CREATED: &str = "Action created successfully!";
pub const MSG_CREATE_FAILED: &str = "Failed to create action";

pub struct CreateActionPage {
    form: ActionForm,
    zone: UploadZone,
    status: watch::Sender<UploadStatus>,
    ticker: TickerConfig,
}

impl Default for CreateActionPage {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateActionPage {
    pub fn new() -> Self {
        Self {
            form: ActionForm::default(),
            zone: UploadZone::new(MediaLimits::photos()),
            status: watch::channel(UploadStatus::Idle).0,
            ticker: TickerConfig::default(),
        }
    }

    pub fn form(&self) -> &ActionForm {
        &self.form
    }

    pub fn zone(&self) -> &UploadZone {
        &self.zone
    }

    pub fn status(&self) -> UploadStatus {
        self.status.borrow().clone()
    }

    /// Live status updates, e.g. for a progress bar.
    pub fn watch_status(&self) -> watch::Receiver<UploadStatus> {
        self.status.subscribe()
    }

    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        self.form.set_field(name, value)?;
        Ok(())
    }

    /// Feed an upload-zone event.  A picked image counts as done (the
    /// bytes go up with the form); a rejected one is reported.
    pub fn handle_zone(&mut self, event: ZoneEvent, ctx: &AppContext) -> ZoneOutcome {
        let outcome = self.zone.handle(event, &mut self.form);
        match &outcome {
            ZoneOutcome::Selected => {
                self.status.send_replace(UploadStatus::Success);
            }
            ZoneOutcome::Removed => {
                self.status.send_replace(UploadStatus::Idle);
            }
            ZoneOutcome::Rejected(rejection) => ctx.notifications.error(rejection.to_string()),
            ZoneOutcome::Unchanged => {}
        }
        outcome
    }

    /// Validate, send, and settle the status.
    ///
    /// On validation failure nothing is sent.  On request failure the form
    /// keeps its values so the user can retry.  On success the form is
    /// cleared after the configured display delay.
    pub async fn submit(&mut self, ctx: &AppContext) -> Result<Action> {
        let errors = self.form.validate();
        if let Some(first) = errors.first() {
            ctx.notifications.error(first.message.clone());
            return Err(ClientError::Validation(errors));
        }
        let Some(action) = self.form.to_new_action() else {
            return Err(ClientError::Validation(self.form.validate()));
        };

        match upload_with_progress(ctx, &action, &self.status, self.ticker).await {
            Ok(created) => {
                self.status.send_replace(UploadStatus::Success);
                ctx.notifications.success(MSG_CREATED);
                info!(id = %created.id, title = %created.title, "Eco action submitted");

                let settle = Settle::new(|| {
                    self.form.reset();
                    self.status.send_replace(UploadStatus::Idle);
                });
                tokio::time::sleep(ctx.config.reset_delay).await;
                drop(settle);
                Ok(created)
            }
            Err(err) => {
                let message = message_or(&err, MSG_CREATE_FAILED);
                self.status.send_replace(UploadStatus::error(message.clone()));
                ctx.notifications.error(message);
                Err(err)
            }
        }
    }
}
