//! Floating quick-upload bubble.
//!
//! A one-step shortcut from the dashboard: pick a photo or video, give it
//! a title (and optionally a location), and it is filed as an `Other`
//! action.

use ecosnap_core::{
    Action, MediaKind, MediaLimits, QuickUploadForm, UploadStatus, UploadZone, ZoneEvent,
    ZoneOutcome,
};
use tokio::sync::watch;
use tracing::info;

use crate::context::AppContext;
use crate::errors::{ClientError, Result};
use crate::pages::{message_or, upload_with_progress, Settle};
use crate::progress::TickerConfig;

pub const MSG_UPLOAD_FAILED: &str = "Upload failed";

pub fn uploaded_message(title: &str, location: Option<&str>) -> String {
    match location {
        Some(location) => format!(
            "\"{title}\" uploaded successfully! Location: {location} Check your actions to see it!"
        ),
        None => format!("\"{title}\" uploaded successfully! Check your actions to see it!"),
    }
}

pub struct QuickUploadBubble {
    open: bool,
    form: QuickUploadForm,
    zone: UploadZone,
    status: watch::Sender<UploadStatus>,
    ticker: TickerConfig,
}

impl Default for QuickUploadBubble {
    fn default() -> Self {
        Self::new()
    }
}

impl QuickUploadBubble {
    pub fn new() -> Self {
        Self {
            open: false,
            form: QuickUploadForm::default(),
            zone: UploadZone::new(MediaLimits::photos()),
            status: watch::channel(UploadStatus::Idle).0,
            ticker: TickerConfig::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close and discard whatever was entered.
    pub fn close(&mut self) {
        self.open = false;
        self.clear();
    }

    pub fn form(&self) -> &QuickUploadForm {
        &self.form
    }

    pub fn zone(&self) -> &UploadZone {
        &self.zone
    }

    pub fn status(&self) -> UploadStatus {
        self.status.borrow().clone()
    }

    pub fn watch_status(&self) -> watch::Receiver<UploadStatus> {
        self.status.subscribe()
    }

    /// Switch between photo and video; the zone's limits follow.
    pub fn set_kind(&mut self, kind: MediaKind) {
        self.form.kind = kind;
        self.zone.set_limits(MediaLimits::for_kind(kind));
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.form.location = location.into();
    }

    pub fn can_submit(&self) -> bool {
        self.form.can_submit() && !self.status.borrow().is_uploading()
    }

    pub fn handle_zone(&mut self, event: ZoneEvent, ctx: &AppContext) -> ZoneOutcome {
        let outcome = self.zone.handle(event, &mut self.form);
        match &outcome {
            ZoneOutcome::Selected => {
                // The chosen file decides photo vs video.
                self.zone.set_limits(MediaLimits::for_kind(self.form.kind));
                self.status.send_replace(UploadStatus::Idle);
            }
            ZoneOutcome::Removed => {
                self.status.send_replace(UploadStatus::Idle);
            }
            ZoneOutcome::Rejected(rejection) => ctx.notifications.error(rejection.to_string()),
            ZoneOutcome::Unchanged => {}
        }
        outcome
    }

    /// Validate and upload.  On success the bubble clears and closes after
    /// the display delay; on failure everything entered is kept.
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
                ctx.notifications
                    .success(uploaded_message(&action.title, action.location.as_deref()));
                info!(id = %created.id, kind = self.form.kind.as_str(), "Quick upload stored");

                let settle = Settle::new(|| self.close());
                tokio::time::sleep(ctx.config.reset_delay).await;
                drop(settle);
                Ok(created)
            }
            Err(err) => {
                let message = message_or(&err, MSG_UPLOAD_FAILED);
                self.status.send_replace(UploadStatus::error(message.clone()));
                ctx.notifications.error(message);
                Err(err)
            }
        }
    }

    fn clear(&mut self) {
        self.form.reset();
        self.zone.set_limits(MediaLimits::photos());
        self.status.send_replace(UploadStatus::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    use ecosnap_core::form::{MSG_FILE_REQUIRED, MSG_LOCATION_LENGTH};
    use ecosnap_core::{ActionCategory, FileRejection, UploadCandidate};

    use crate::testing;

    fn media(name: &str, mime: &str, size: u64) -> UploadCandidate {
        UploadCandidate {
            file_name: name.to_string(),
            mime_type: mime.to_string(),
            size_bytes: size,
            path: PathBuf::from(name),
        }
    }

    #[test]
    fn success_message_variants() {
        assert_eq!(
            uploaded_message("Bike ride", Some("Lisbon")),
            "\"Bike ride\" uploaded successfully! Location: Lisbon Check your actions to see it!"
        );
        assert_eq!(
            uploaded_message("Bike ride", None),
            "\"Bike ride\" uploaded successfully! Check your actions to see it!"
        );
    }

    #[tokio::test]
    async fn video_file_switches_kind_and_limits() {
        let (ctx, _api) = testing::context();
        let mut bubble = QuickUploadBubble::new();
        bubble.open();

        let outcome = bubble.handle_zone(
            ZoneEvent::Drop(vec![media("clip.mp4", "video/mp4", 40 * 1024 * 1024)]),
            &ctx,
        );
        // 40 MB is over the photo limit the zone started with.
        assert_eq!(outcome, ZoneOutcome::Rejected(FileRejection::TooLarge { max_mb: 10 }));

        bubble.set_kind(MediaKind::Video);
        let outcome = bubble.handle_zone(
            ZoneEvent::Drop(vec![media("clip.mp4", "video/mp4", 40 * 1024 * 1024)]),
            &ctx,
        );
        assert_eq!(outcome, ZoneOutcome::Selected);
        assert_eq!(bubble.form().kind, MediaKind::Video);
        assert_eq!(bubble.zone().limits().max_size_mb, 100);
    }

    #[tokio::test]
    async fn photo_selection_sets_photo_kind() {
        let (ctx, _api) = testing::context();
        let mut bubble = QuickUploadBubble::new();
        bubble.set_kind(MediaKind::Video);
        bubble.set_kind(MediaKind::Photo);
        bubble.handle_zone(ZoneEvent::Pick(vec![media("a.png", "image/png", 10)]), &ctx);
        assert_eq!(bubble.form().kind, MediaKind::Photo);
        assert_eq!(bubble.status(), UploadStatus::Idle);
    }

    #[tokio::test]
    async fn requires_a_file() {
        let (ctx, api) = testing::context();
        let mut bubble = QuickUploadBubble::new();
        bubble.set_title("Bike ride");
        assert!(!bubble.can_submit());

        let err = bubble.submit(&ctx).await.unwrap_err();
        assert_eq!(err.to_string(), MSG_FILE_REQUIRED);
        assert_eq!(api.total_calls(), 0);
    }

    #[tokio::test]
    async fn long_location_is_rejected() {
        let (ctx, api) = testing::context();
        let mut bubble = QuickUploadBubble::new();
        bubble.handle_zone(ZoneEvent::Pick(vec![media("a.jpg", "image/jpeg", 10)]), &ctx);
        bubble.set_title("Bike ride");
        bubble.set_location("x".repeat(201));

        let err = bubble.submit(&ctx).await.unwrap_err();
        assert_eq!(err.to_string(), MSG_LOCATION_LENGTH);
        assert_eq!(api.total_calls(), 0);
    }

    #[tokio::test]
    async fn success_files_other_action_and_closes() {
        let (ctx, api) = testing::context();
        let mut bubble = QuickUploadBubble::new();
        bubble.open();
        bubble.handle_zone(ZoneEvent::Pick(vec![media("ride.mp4", "video/mp4", 10)]), &ctx);
        bubble.set_title("Bike ride");
        bubble.set_location("Lisbon");
        assert!(bubble.can_submit());

        bubble.submit(&ctx).await.unwrap();

        let sent = api.created.lock().unwrap()[0].clone();
        assert_eq!(sent.category, ActionCategory::Other);
        assert_eq!(
            sent.description,
            "Uploaded video: Bike ride. This action was created using the quick upload feature."
        );
        assert_eq!(sent.location.as_deref(), Some("Lisbon"));
        assert!(sent.proof.is_some());

        assert!(!bubble.is_open());
        assert_eq!(bubble.form(), &QuickUploadForm::default());
        assert_eq!(bubble.status(), UploadStatus::Idle);
        assert_eq!(
            ctx.notifications.drain()[0].message,
            uploaded_message("Bike ride", Some("Lisbon"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn abandoning_during_reset_delay_still_closes() {
        let (mut ctx, api) = testing::context();
        ctx.config.reset_delay = Duration::from_millis(1500);
        let mut bubble = QuickUploadBubble::new();
        bubble.open();
        bubble.handle_zone(ZoneEvent::Pick(vec![media("a.jpg", "image/jpeg", 10)]), &ctx);
        bubble.set_title("Compost bin");

        let cut_short = tokio::time::timeout(Duration::from_millis(500), bubble.submit(&ctx)).await;
        assert!(cut_short.is_err());
        assert_eq!(api.calls("create_action"), 1);
        assert!(!bubble.is_open());
        assert_eq!(bubble.form(), &QuickUploadForm::default());
        assert_eq!(bubble.status(), UploadStatus::Idle);
    }

    #[tokio::test]
    async fn failure_keeps_entry() {
        let (ctx, api) = testing::context();
        api.fail_with(413, "File too large for server");
        let mut bubble = QuickUploadBubble::new();
        bubble.open();
        bubble.handle_zone(ZoneEvent::Pick(vec![media("a.jpg", "image/jpeg", 10)]), &ctx);
        bubble.set_title("Compost bin");

        bubble.submit(&ctx).await.unwrap_err();
        assert!(bubble.is_open());
        assert_eq!(bubble.form().title, "Compost bin");
        assert!(bubble.form().file.is_some());
        assert_eq!(bubble.status(), UploadStatus::error("File too large for server"));
    }

    #[tokio::test]
    async fn close_discards_entry() {
        let (ctx, _api) = testing::context();
        let mut bubble = QuickUploadBubble::new();
        bubble.open();
        bubble.set_kind(MediaKind::Video);
        bubble.handle_zone(ZoneEvent::Pick(vec![media("a.mp4", "video/mp4", 10)]), &ctx);
        bubble.set_title("Tram");

        bubble.close();
        assert!(!bubble.is_open());
        assert_eq!(bubble.form(), &QuickUploadForm::default());
        assert_eq!(bubble.zone().limits(), &MediaLimits::photos());
    }
}
