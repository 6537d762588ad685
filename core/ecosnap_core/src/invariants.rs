#![allow(dead_code)]

use crate::stats::DashboardSnapshot;
use crate::types::UploadStatus;

/// Uploading implies a progress value within 0..=100.
pub fn assert_progress_in_range(status: &UploadStatus) {
    if let UploadStatus::Uploading { progress } = status {
        assert!(*progress <= 100, "progress {progress} exceeds 100");
    }
}

/// An error status always carries something to show the user.
pub fn assert_error_has_message(status: &UploadStatus) {
    if let UploadStatus::Error { message } = status {
        assert!(!message.trim().is_empty(), "error status with empty message");
    }
}

pub fn assert_status_valid(status: &UploadStatus) {
    assert_progress_in_range(status);
    assert_error_has_message(status);
}

/// Streak never exceeds a week and never exceeds the number of days in the
/// weekly chart that have activity.
pub fn assert_streak_consistent(snapshot: &DashboardSnapshot) {
    assert!(snapshot.streak <= 7, "streak {} above cap", snapshot.streak);
    let active_days = snapshot.weekly.iter().filter(|d| d.actions > 0).count() as u32;
    assert!(
        snapshot.streak <= active_days,
        "streak {} but only {} active days this week",
        snapshot.streak,
        active_days
    );
}

/// Impact figures are rounded to one decimal place.
pub fn assert_impact_rounded(snapshot: &DashboardSnapshot) {
    for value in [
        snapshot.impact.co2_saved,
        snapshot.impact.water_saved,
        snapshot.impact.energy_saved,
    ] {
        let scaled = value * 10.0;
        assert!(
            (scaled - scaled.round()).abs() < 1e-6,
            "{value} not rounded to one decimal"
        );
    }
}
