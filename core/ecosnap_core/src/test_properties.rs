//! Behaviour that spans several modules: a file travelling from the drop
//! zone into a form payload, and the dashboard/leaderboard figures users
//! see.

use std::path::PathBuf;

use chrono::{Duration, NaiveDate, Utc};

use crate::filter::matches_search;
use crate::form::{ActionForm, QuickUploadForm, MSG_REQUIRED_TITLE_CATEGORY, MSG_TITLE_LENGTH};
use crate::invariants::{assert_impact_rounded, assert_status_valid, assert_streak_consistent};
use crate::stats::{eco_impact, milestone_badge, DashboardSnapshot};
use crate::types::{Action, ActionCategory, MediaKind, UploadCandidate, UploadStatus, UserStats};
use crate::upload_zone::{UploadZone, ZoneEvent, ZoneOutcome};
use crate::validator::{validate_file, AcceptPattern, FileRejection, MediaLimits};

const MB: u64 = 1024 * 1024;

fn candidate(name: &str, mime: &str, size: u64) -> UploadCandidate {
    UploadCandidate {
        file_name: name.to_string(),
        mime_type: mime.to_string(),
        size_bytes: size,
        path: PathBuf::from(name),
    }
}

fn action_on(day: NaiveDate) -> Action {
    Action {
        id: day.to_string(),
        title: "Compost".to_string(),
        description: String::new(),
        category: "Waste Reduction".to_string(),
        location: None,
        points: 20,
        status: Default::default(),
        proof_image: None,
        created_at: day.and_hms_opt(12, 0, 0).unwrap().and_utc(),
    }
}

#[test]
fn oversized_files_rejected_for_every_type() {
    for max_mb in [1, 10, 100] {
        for mime in ["image/png", "video/mp4", "text/plain", ""] {
            for accept in [AcceptPattern::images(), AcceptPattern::videos()] {
                let file = candidate("f", mime, max_mb * MB + 1);
                assert_eq!(
                    validate_file(&file, max_mb, &accept),
                    Err(FileRejection::TooLarge { max_mb })
                );
            }
        }
    }
}

#[test]
fn mismatched_types_rejected_for_every_size() {
    let accept = AcceptPattern::images();
    for size in [0, 1, MB, 10 * MB] {
        for mime in ["video/mp4", "application/pdf", "text/html", ""] {
            assert_eq!(
                validate_file(&candidate("f", mime, size), 10, &accept),
                Err(FileRejection::WrongType)
            );
        }
    }
}

#[test]
fn titles_within_bounds_validate_cleanly() {
    let mut form = ActionForm::default();
    form.set_field("category", "Education").unwrap();
    for len in 3..=100 {
        form.set_field("title", &"t".repeat(len)).unwrap();
        assert!(form.validate().is_empty(), "title of length {len} rejected");
    }
    for len in [2, 101] {
        form.set_field("title", &"t".repeat(len)).unwrap();
        let errors = form.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
        assert_eq!(errors[0].message, MSG_TITLE_LENGTH);
    }
}

#[test]
fn empty_category_always_requires_fields() {
    for title in ["", "ab", "Planted trees", "t".repeat(150).as_str()] {
        let mut form = ActionForm::default();
        form.set_field("title", title).unwrap();
        let errors = form.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, MSG_REQUIRED_TITLE_CATEGORY);
        assert!(form.to_new_action().is_none());
    }
}

#[test]
fn dropped_photo_lands_in_create_payload() {
    let mut form = ActionForm::default();
    let mut zone = UploadZone::new(MediaLimits::photos());

    form.set_field("title", "Fixed a leaking tap").unwrap();
    form.set_field("category", "Water Conservation").unwrap();
    form.set_field("location", "Central Park").unwrap();

    zone.handle(ZoneEvent::DragEnter, &mut form);
    let outcome = zone.handle(
        ZoneEvent::Drop(vec![candidate("tap.jpg", "image/jpeg", 3 * MB)]),
        &mut form,
    );
    assert_eq!(outcome, ZoneOutcome::Selected);

    let payload = form.to_new_action().unwrap();
    assert_eq!(payload.category, ActionCategory::WaterConservation);
    assert_eq!(payload.location.as_deref(), Some("Central Park"));
    assert_eq!(payload.proof.unwrap().file_name, "tap.jpg");
}

#[test]
fn quick_upload_video_needs_video_limits() {
    let mut form = QuickUploadForm {
        title: "River cleanup".to_string(),
        ..Default::default()
    };
    let clip = candidate("river.mp4", "video/mp4", 40 * MB);

    // The photo zone turns a 40 MB video away on size...
    let mut zone = UploadZone::new(MediaLimits::for_kind(form.kind));
    assert_eq!(
        zone.handle(ZoneEvent::Pick(vec![clip.clone()]), &mut form),
        ZoneOutcome::Rejected(FileRejection::TooLarge { max_mb: 10 })
    );

    // ...switching to video accepts it.
    form.kind = MediaKind::Video;
    zone.set_limits(MediaLimits::for_kind(form.kind));
    assert_eq!(zone.handle(ZoneEvent::Pick(vec![clip]), &mut form), ZoneOutcome::Selected);
    assert!(form.can_submit());
    assert!(form.to_new_action().unwrap().description.starts_with("Uploaded video:"));
}

#[test]
fn impact_for_1250_points() {
    let impact = eco_impact(1250);
    assert_eq!(
        (impact.co2_saved, impact.water_saved, impact.energy_saved),
        (125.0, 625.0, 250.0)
    );
}

#[test]
fn streak_with_gap_is_three() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let weekly: Vec<_> = [0, 1, 2, 4]
        .into_iter()
        .map(|back| action_on(today - Duration::days(back)))
        .collect();
    let profile = UserStats {
        total_points: Some(80),
        ..Default::default()
    };

    let snap = DashboardSnapshot::compute(&profile, None, &weekly[..3], &weekly, today, &Utc);
    assert_eq!(snap.streak, 3);
    assert_streak_consistent(&snap);
    assert_impact_rounded(&snap);
}

#[test]
fn snapshot_invariants_hold_across_point_totals() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let weekly: Vec<_> = (0..12).map(|back| action_on(today - Duration::days(back))).collect();
    for points in [0, 1, 3, 99, 100, 333, 1001, 98_765] {
        let profile = UserStats {
            total_points: Some(points),
            ..Default::default()
        };
        let snap = DashboardSnapshot::compute(&profile, None, &[], &weekly, today, &Utc);
        assert_streak_consistent(&snap);
        assert_impact_rounded(&snap);
    }
}

#[test]
fn badge_boundaries() {
    assert_eq!(milestone_badge(1000).name, "Eco Champion");
    assert_eq!(milestone_badge(999).name, "Green Warrior");
    assert_eq!(milestone_badge(0).name, "Eco Beginner");
}

#[test]
fn search_hits_location_only() {
    let mut action = action_on(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    action.title = "Litter pick".to_string();
    action.description = "Two bags collected".to_string();
    action.location = Some("Central Park, New York".to_string());
    assert!(matches_search(&action, "park"));
}

#[test]
fn status_constructors_satisfy_invariants() {
    for status in [
        UploadStatus::Idle,
        UploadStatus::uploading(0),
        UploadStatus::uploading(90),
        UploadStatus::uploading(u8::MAX),
        UploadStatus::Success,
        UploadStatus::error(""),
        UploadStatus::error("   "),
        UploadStatus::error("Network down"),
    ] {
        assert_status_valid(&status);
    }
}
