//! Leaderboard scopes, rank colours and the static fallback list shown
//! when the leaderboard cannot be fetched.

use std::fmt;

use crate::types::LeaderboardEntry;

/// Tabs on the leaderboard page.  Only [`LeaderboardScope::Global`] has a
/// backend query; the others show the global ranking too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeaderboardScope {
    #[default]
    Global,
    Regional,
    Monthly,
    AllTime,
}

impl LeaderboardScope {
    pub const ALL: [LeaderboardScope; 4] =
        [Self::Global, Self::Regional, Self::Monthly, Self::AllTime];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::Regional => "Regional",
            Self::Monthly => "Monthly",
            Self::AllTime => "All Time",
        }
    }
}

impl fmt::Display for LeaderboardScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Gold, silver and bronze for the podium; translucent white below it.
pub fn rank_color(rank: u32) -> &'static str {
    match rank {
        1 => "#ffd700",
        2 => "#c0c0c0",
        3 => "#cd7f32",
        _ => "rgba(255, 255, 255, 0.3)",
    }
}

const FALLBACK: [(&str, u64, u32, &str, &str); 7] = [
    ("Sahebjot Singh", 2840, 45, "Mumbai, Maharashtra", "Eco Champion"),
    ("Amish Patel", 2650, 38, "Delhi, Delhi", "Green Warrior"),
    ("Krish Sharma", 2420, 42, "Bangalore, Karnataka", "Eco Pioneer"),
    ("Afreen Khan", 2180, 35, "Chennai, Tamil Nadu", "Sustainability Hero"),
    ("Kishan Gupta", 1950, 28, "Kolkata, West Bengal", "Eco Advocate"),
    ("Abhinav Verma", 1750, 32, "Pune, Maharashtra", "Eco Enthusiast"),
    ("Raj Kumar", 1650, 25, "Hyderabad, Telangana", "Green Supporter"),
];

/// Constant demo data, ranked 1..=7.  Not a cache of earlier results.
pub fn fallback_leaderboard() -> Vec<LeaderboardEntry> {
    FALLBACK
        .iter()
        .zip(1u32..)
        .map(|(&(name, points, actions, location, badge), rank)| LeaderboardEntry {
            id: rank.to_string(),
            rank,
            name: name.to_string(),
            points,
            actions,
            location: Some(location.to_string()),
            badge: Some(badge.to_string()),
            verified: true,
        })
        .collect()
}
