//! # Upload Zone
//!
//! The drop/browse surface for proof media.  The zone keeps only
//! presentation state (the drag-over flag); the selected file itself lives
//! with the owner, which the zone reaches through [`ZoneOwner`].
//!
//! ```text
//! Empty ──dragenter/over──► Dragging ──dragleave──► Empty
//!   │                          │
//!   └──drop/pick (valid)───────┴──► HasFile ──remove──► Empty
//! ```
//!
//! An invalid drop or pick leaves the owner untouched; the zone only
//! returns the [`FileRejection`] so the caller can alert the user.

use crate::types::{UploadCandidate, UploadStatus};
use crate::validator::{format_file_size, FileRejection, MediaLimits};

/// Whoever holds the selected file (a form controller).
pub trait ZoneOwner {
    fn selected_file(&self) -> Option<&UploadCandidate>;
    fn on_file_selected(&mut self, file: UploadCandidate);
    fn on_file_removed(&mut self);
}

/// Input events the zone reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneEvent {
    DragEnter,
    DragOver,
    DragLeave,
    /// Files dropped onto the zone; only the first is considered.
    Drop(Vec<UploadCandidate>),
    /// Files chosen through the file picker; only the first is considered.
    Pick(Vec<UploadCandidate>),
    Remove,
}

/// What a [`ZoneEvent`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneOutcome {
    Selected,
    Removed,
    Rejected(FileRejection),
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneState {
    Empty,
    Dragging,
    HasFile,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadZone {
    limits: MediaLimits,
    drag_over: bool,
}

impl UploadZone {
    pub fn new(limits: MediaLimits) -> Self {
        Self {
            limits,
            drag_over: false,
        }
    }

    pub fn limits(&self) -> &MediaLimits {
        &self.limits
    }

    /// Switch limits, e.g. when the user flips between photo and video.
    /// An already selected file is kept.
    pub fn set_limits(&mut self, limits: MediaLimits) {
        self.limits = limits;
    }

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    pub fn state<O: ZoneOwner + ?Sized>(&self, owner: &O) -> ZoneState {
        if owner.selected_file().is_some() {
            ZoneState::HasFile
        } else if self.drag_over {
            ZoneState::Dragging
        } else {
            ZoneState::Empty
        }
    }

    pub fn handle<O: ZoneOwner + ?Sized>(&mut self, event: ZoneEvent, owner: &mut O) -> ZoneOutcome {
        let has_file = owner.selected_file().is_some();

        match event {
            // The drop surface is only shown while nothing is selected.
            ZoneEvent::DragEnter | ZoneEvent::DragOver if !has_file => {
                self.drag_over = true;
                ZoneOutcome::Unchanged
            }
            ZoneEvent::DragLeave => {
                self.drag_over = false;
                ZoneOutcome::Unchanged
            }
            ZoneEvent::Drop(files) | ZoneEvent::Pick(files) if !has_file => {
                self.drag_over = false;
                let Some(file) = files.into_iter().next() else {
                    return ZoneOutcome::Unchanged;
                };
                match self.limits.validate(&file) {
                    Ok(()) => {
                        owner.on_file_selected(file);
                        ZoneOutcome::Selected
                    }
                    Err(rejection) => ZoneOutcome::Rejected(rejection),
                }
            }
            ZoneEvent::Remove if has_file => {
                owner.on_file_removed();
                ZoneOutcome::Removed
            }
            _ => ZoneOutcome::Unchanged,
        }
    }

    /// Headline shown on the empty drop surface.
    pub fn prompt(&self) -> &'static str {
        if self.drag_over {
            "Drop your file here"
        } else {
            "Upload Proof Image"
        }
    }

    /// Chip text under the prompt, e.g. `Max 10MB`.
    pub fn size_hint(&self) -> String {
        format!("Max {}MB", self.limits.max_size_mb)
    }

    /// One-line summary of the selected file: name, size and status.
    pub fn describe(file: &UploadCandidate, status: &UploadStatus) -> String {
        let mut line = format!("{} ({})", file.file_name, format_file_size(file.size_bytes));
        match status {
            UploadStatus::Uploading { progress } => {
                line.push_str(&format!(", {progress}% uploaded"));
            }
            UploadStatus::Error { message } => {
                line.push_str(&format!(": {message}"));
            }
            UploadStatus::Success | UploadStatus::Idle => {}
        }
        line
    }
}

/// Border/icon colour for a selected file's status.
pub fn status_color(status: &UploadStatus) -> &'static str {
    match status {
        UploadStatus::Success => "#00ff88",
        UploadStatus::Error { .. } => "#ff6b6b",
        UploadStatus::Uploading { .. } => "#00ccff",
        UploadStatus::Idle => "rgba(255, 255, 255, 0.6)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[derive(Default)]
    struct Owner {
        file: Option<UploadCandidate>,
        selected: usize,
        removed: usize,
    }

    impl ZoneOwner for Owner {
        fn selected_file(&self) -> Option<&UploadCandidate> {
            self.file.as_ref()
        }
        fn on_file_selected(&mut self, file: UploadCandidate) {
            self.selected += 1;
            self.file = Some(file);
        }
        fn on_file_removed(&mut self) {
            self.removed += 1;
            self.file = None;
        }
    }

    fn file(name: &str, mime: &str, size: u64) -> UploadCandidate {
        UploadCandidate {
            file_name: name.to_string(),
            mime_type: mime.to_string(),
            size_bytes: size,
            path: PathBuf::from(name),
        }
    }

    #[test]
    fn drag_enter_then_leave() {
        let mut zone = UploadZone::new(MediaLimits::photos());
        let mut owner = Owner::default();

        zone.handle(ZoneEvent::DragEnter, &mut owner);
        assert_eq!(zone.state(&owner), ZoneState::Dragging);
        assert_eq!(zone.prompt(), "Drop your file here");

        zone.handle(ZoneEvent::DragLeave, &mut owner);
        assert_eq!(zone.state(&owner), ZoneState::Empty);
        assert_eq!(zone.prompt(), "Upload Proof Image");
    }

    #[test]
    fn drop_takes_first_file_only() {
        let mut zone = UploadZone::new(MediaLimits::photos());
        let mut owner = Owner::default();

        zone.handle(ZoneEvent::DragOver, &mut owner);
        let outcome = zone.handle(
            ZoneEvent::Drop(vec![
                file("a.jpg", "image/jpeg", 10),
                file("b.jpg", "image/jpeg", 10),
            ]),
            &mut owner,
        );

        assert_eq!(outcome, ZoneOutcome::Selected);
        assert_eq!(owner.selected, 1);
        assert_eq!(owner.file.as_ref().unwrap().file_name, "a.jpg");
        assert!(!zone.is_drag_over());
        assert_eq!(zone.state(&owner), ZoneState::HasFile);
    }

    #[test]
    fn invalid_drop_keeps_prior_state() {
        let mut zone = UploadZone::new(MediaLimits::photos());
        let mut owner = Owner::default();

        let outcome = zone.handle(ZoneEvent::Pick(vec![file("a.pdf", "application/pdf", 10)]), &mut owner);

        assert_eq!(outcome, ZoneOutcome::Rejected(FileRejection::WrongType));
        assert_eq!(owner.selected, 0);
        assert_eq!(zone.state(&owner), ZoneState::Empty);
    }

    #[test]
    fn empty_drop_is_ignored() {
        let mut zone = UploadZone::new(MediaLimits::photos());
        let mut owner = Owner::default();
        assert_eq!(zone.handle(ZoneEvent::Drop(vec![]), &mut owner), ZoneOutcome::Unchanged);
    }

    #[test]
    fn remove_clears_and_notifies() {
        let mut zone = UploadZone::new(MediaLimits::photos());
        let mut owner = Owner::default();
        zone.handle(ZoneEvent::Pick(vec![file("a.png", "image/png", 10)]), &mut owner);

        assert_eq!(zone.handle(ZoneEvent::Remove, &mut owner), ZoneOutcome::Removed);
        assert_eq!(owner.removed, 1);
        assert_eq!(zone.state(&owner), ZoneState::Empty);

        // Nothing left to remove.
        assert_eq!(zone.handle(ZoneEvent::Remove, &mut owner), ZoneOutcome::Unchanged);
        assert_eq!(owner.removed, 1);
    }

    #[test]
    fn drops_ignored_while_a_file_is_selected() {
        let mut zone = UploadZone::new(MediaLimits::photos());
        let mut owner = Owner::default();
        zone.handle(ZoneEvent::Pick(vec![file("a.png", "image/png", 10)]), &mut owner);

        zone.handle(ZoneEvent::DragEnter, &mut owner);
        assert!(!zone.is_drag_over());
        let outcome = zone.handle(ZoneEvent::Drop(vec![file("b.png", "image/png", 10)]), &mut owner);
        assert_eq!(outcome, ZoneOutcome::Unchanged);
        assert_eq!(owner.file.as_ref().unwrap().file_name, "a.png");
    }

    #[test]
    fn video_limits_allow_large_videos() {
        let mut zone = UploadZone::new(MediaLimits::videos());
        let mut owner = Owner::default();
        let outcome = zone.handle(
            ZoneEvent::Pick(vec![file("clip.mp4", "video/mp4", 50 * 1024 * 1024)]),
            &mut owner,
        );
        assert_eq!(outcome, ZoneOutcome::Selected);
        assert_eq!(zone.size_hint(), "Max 100MB");
    }

    #[test]
    fn describe_includes_progress_and_error() {
        let f = file("a.png", "image/png", 2048);
        assert_eq!(
            UploadZone::describe(&f, &UploadStatus::uploading(40)),
            "a.png (2 KB), 40% uploaded"
        );
        assert_eq!(
            UploadZone::describe(&f, &UploadStatus::error("boom")),
            "a.png (2 KB): boom"
        );
    }

    #[test]
    fn status_colors() {
        assert_eq!(status_color(&UploadStatus::Success), "#00ff88");
        assert_eq!(status_color(&UploadStatus::error("x")), "#ff6b6b");
        assert_eq!(status_color(&UploadStatus::uploading(5)), "#00ccff");
        assert_eq!(status_color(&UploadStatus::Idle), "rgba(255, 255, 255, 0.6)");
    }
}
