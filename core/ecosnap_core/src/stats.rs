//! Dashboard statistics derived from fetched data.
//!
//! Everything here is a pure function of its inputs.  Callers pass the
//! current date and the time zone used to bucket actions into calendar
//! days, so results are reproducible in tests.

use chrono::{Duration, NaiveDate, TimeZone};
use serde::Serialize;

use crate::types::{Action, UserStats};

/// kg CO₂ per point.
const CO2_PER_POINT: f64 = 0.1;
/// Litres of water per point.
const WATER_PER_POINT: f64 = 0.5;
/// kWh per point.
const ENERGY_PER_POINT: f64 = 0.2;

const STREAK_CAP: u32 = 7;
const WEEK_DAYS: i64 = 7;
const DEFAULT_LEVEL: &str = "Eco-Beginner";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EcoImpact {
    pub co2_saved: f64,
    pub water_saved: f64,
    pub energy_saved: f64,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn eco_impact(total_points: u64) -> EcoImpact {
    let p = total_points as f64;
    EcoImpact {
        co2_saved: round1(p * CO2_PER_POINT),
        water_saved: round1(p * WATER_PER_POINT),
        energy_saved: round1(p * ENERGY_PER_POINT),
    }
}

fn local_day<Tz: TimeZone>(action: &Action, tz: &Tz) -> NaiveDate {
    action.created_at.with_timezone(tz).date_naive()
}

/// Consecutive days with at least one action, counting back from `today`
/// and stopping at the first empty day.  Capped at a week.
pub fn streak<Tz: TimeZone>(actions: &[Action], today: NaiveDate, tz: &Tz) -> u32 {
    let days: Vec<NaiveDate> = actions.iter().map(|a| local_day(a, tz)).collect();

    let mut count = 0;
    let mut day = today;
    while count < STREAK_CAP && days.contains(&day) {
        count += 1;
        day -= Duration::days(1);
    }
    count
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayActivity {
    /// Short weekday name, e.g. `Mon`.
    pub day: String,
    pub date: NaiveDate,
    pub actions: usize,
}

/// Actions per day over the last seven days, oldest first.
pub fn weekly_activity<Tz: TimeZone>(
    actions: &[Action],
    today: NaiveDate,
    tz: &Tz,
) -> Vec<DayActivity> {
    (0..WEEK_DAYS)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            DayActivity {
                day: date.format("%a").to_string(),
                date,
                actions: actions.iter().filter(|a| local_day(a, tz) == date).count(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MilestoneBadge {
    pub name: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

const BADGES: [(u64, MilestoneBadge); 4] = [
    (
        1000,
        MilestoneBadge {
            name: "Eco Champion",
            color: "#ffd700",
            icon: "🏆",
        },
    ),
    (
        500,
        MilestoneBadge {
            name: "Green Warrior",
            color: "#c0c0c0",
            icon: "🥈",
        },
    ),
    (
        250,
        MilestoneBadge {
            name: "Eco Pioneer",
            color: "#cd7f32",
            icon: "🥉",
        },
    ),
    (
        100,
        MilestoneBadge {
            name: "Eco Enthusiast",
            color: "#4ecdc4",
            icon: "🌱",
        },
    ),
];

const BEGINNER: MilestoneBadge = MilestoneBadge {
    name: "Eco Beginner",
    color: "#45b7d1",
    icon: "🌿",
};

pub fn milestone_badge(total_points: u64) -> MilestoneBadge {
    BADGES
        .iter()
        .find(|(threshold, _)| total_points >= *threshold)
        .map(|(_, badge)| *badge)
        .unwrap_or(BEGINNER)
}

/// Everything the dashboard shows, computed from one set of fetches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub total_points: u64,
    pub level: String,
    pub actions_this_month: usize,
    pub impact: EcoImpact,
    pub streak: u32,
    pub weekly: Vec<DayActivity>,
    pub badge: MilestoneBadge,
}

impl DashboardSnapshot {
    /// `session_points` is used when the profile reports no points.
    pub fn compute<Tz: TimeZone>(
        profile: &UserStats,
        session_points: Option<u64>,
        recent: &[Action],
        weekly: &[Action],
        today: NaiveDate,
        tz: &Tz,
    ) -> Self {
        let total_points = profile
            .total_points
            .filter(|p| *p > 0)
            .or(session_points)
            .unwrap_or(0);

        Self {
            total_points,
            level: profile
                .level
                .clone()
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| DEFAULT_LEVEL.to_string()),
            actions_this_month: recent.len(),
            impact: eco_impact(total_points),
            streak: streak(weekly, today, tz),
            weekly: weekly_activity(weekly, today, tz),
            badge: milestone_badge(total_points),
        }
    }
}
