//! # Types
//!
//! Shared data structures used across all modules of the EcoSnap client.
//!
//! ## Design decisions
//!
//! ### Server projections vs. client state
//!
//! [`Action`], [`UserStats`] and [`LeaderboardEntry`] are read-only
//! projections of backend data.  They deserialize leniently (missing
//! optional fields default) because the wire contract belongs to the
//! backend.  [`UploadCandidate`] and [`UploadStatus`] are purely
//! client-side and never leave the process.
//!
//! ### Upload status invariants
//!
//! ```text
//! Idle ──► Uploading{progress} ──► Success ──► Idle
//!                     └──────────► Error{message}
//! ```
//!
//! A status built through [`UploadStatus::uploading`] carries a progress
//! value in `0..=100`, and one built through [`UploadStatus::error`] carries
//! a non-empty message.  The variant fields stay public for matching, so
//! the constructors are the only way statuses are built in this workspace.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Points attached to every newly created action.  The backend recalculates
/// the real value from the action type.
pub const DEFAULT_POINTS: u32 = 50;

/// Fallback message used when an error arrives without any text.
pub const DEFAULT_UPLOAD_ERROR: &str = "Upload failed";

// ─────────────────────────────────────────────────────────
// Actions
// ─────────────────────────────────────────────────────────

/// Verification state of an action.  Only the server changes it.
///
/// States this client does not know about decode as `Unknown` instead of
/// failing the whole list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    #[default]
    Pending,
    Verified,
    #[serde(other)]
    Unknown,
}

impl ActionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Unknown => "unknown",
        }
    }
}

/// The fixed category list offered by the Create Action page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionCategory {
    Recycling,
    Transportation,
    #[serde(rename = "Energy Conservation")]
    EnergyConservation,
    #[serde(rename = "Water Conservation")]
    WaterConservation,
    #[serde(rename = "Waste Reduction")]
    WasteReduction,
    #[serde(rename = "Tree Planting")]
    TreePlanting,
    #[serde(rename = "Community Cleanup")]
    CommunityCleanup,
    Education,
    Other,
}

impl ActionCategory {
    pub const ALL: [ActionCategory; 9] = [
        Self::Recycling,
        Self::Transportation,
        Self::EnergyConservation,
        Self::WaterConservation,
        Self::WasteReduction,
        Self::TreePlanting,
        Self::CommunityCleanup,
        Self::Education,
        Self::Other,
    ];

    /// Display name, which is also the value sent as the action `type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recycling => "Recycling",
            Self::Transportation => "Transportation",
            Self::EnergyConservation => "Energy Conservation",
            Self::WaterConservation => "Water Conservation",
            Self::WasteReduction => "Waste Reduction",
            Self::TreePlanting => "Tree Planting",
            Self::CommunityCleanup => "Community Cleanup",
            Self::Education => "Education",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names none of the known categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ActionCategory {
    type Err = UnknownCategory;

    /// Case-insensitive; accepts the display name with spaces, dashes or
    /// underscores between words (`tree planting`, `tree_planting`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().replace(' ', "").to_lowercase() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// An eco action as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(alias = "_id", deserialize_with = "id_from_any")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Category as stored by the server (`type` on the wire).
    #[serde(rename = "type", default)]
    pub category: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub status: ActionStatus,
    /// Server-relative path of the proof media, if any.
    #[serde(default)]
    pub proof_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for `createAction`.  Built by the form controllers; sent as a
/// multipart request so the proof file can ride along.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAction {
    pub category: ActionCategory,
    pub title: String,
    pub description: String,
    pub points: u32,
    pub location: Option<String>,
    pub proof: Option<UploadCandidate>,
    pub tags: Vec<String>,
}

/// Sort direction for action listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Query parameters for `getUserActions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionQuery {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ActionQuery {
    pub fn limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Newest first, optionally narrowed to one action type.
    pub fn newest_first(action_type: Option<String>) -> Self {
        Self {
            action_type,
            sort_by: Some("date".to_string()),
            sort_order: Some(SortOrder::Desc),
            limit: None,
        }
    }
}

/// `{ actions: [...] }` envelope returned by `getUserActions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionsResponse {
    #[serde(default)]
    pub actions: Vec<Action>,
}

// ─────────────────────────────────────────────────────────
// Uploads
// ─────────────────────────────────────────────────────────

/// Kind of proof media being attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Photo,
    Video,
}

impl MediaKind {
    /// `video/*` types are videos; everything else is treated as a photo.
    pub fn from_mime(mime: &str) -> Self {
        if mime.to_ascii_lowercase().starts_with("video/") {
            Self::Video
        } else {
            Self::Photo
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Video => "video",
        }
    }
}

/// A file the user picked or dropped, before it is sent anywhere.
///
/// The MIME type is whatever the picker declared; nothing sniffs the
/// content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    /// Where the bytes live until submission.
    pub path: PathBuf,
}

/// Upload progress shown next to a selected file.
///
/// Build `Uploading` and `Error` through [`UploadStatus::uploading`] and
/// [`UploadStatus::error`]; a literal variant skips the clamping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading {
        progress: u8,
    },
    Success,
    Error {
        message: String,
    },
}

impl UploadStatus {
    /// Progress is clamped to `0..=100`.
    pub fn uploading(progress: u8) -> Self {
        Self::Uploading {
            progress: progress.min(100),
        }
    }

    /// An empty message is replaced with [`DEFAULT_UPLOAD_ERROR`].
    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            DEFAULT_UPLOAD_ERROR.to_string()
        } else {
            message
        };
        Self::Error { message }
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self, Self::Uploading { .. })
    }

    /// Progress bar value for the current state.
    pub fn progress(&self) -> u8 {
        match self {
            Self::Idle | Self::Error { .. } => 0,
            Self::Uploading { progress } => *progress,
            Self::Success => 100,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Uploading { .. } => "uploading",
            Self::Success => "success",
            Self::Error { .. } => "error",
        }
    }
}

// ─────────────────────────────────────────────────────────
// Users and leaderboard
// ─────────────────────────────────────────────────────────

/// Profile returned by `getMe`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    #[serde(default, alias = "_id", deserialize_with = "opt_id_from_any")]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub total_points: Option<u64>,
    #[serde(default)]
    pub level: Option<String>,
}

/// One row of the ranked leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(alias = "_id", deserialize_with = "id_from_any")]
    pub id: String,
    pub rank: u32,
    pub name: String,
    #[serde(default)]
    pub points: u64,
    #[serde(default)]
    pub actions: u32,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

/// `{ leaderboard: [...] }` envelope returned by `getGlobalLeaderboard`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
}

// ─────────────────────────────────────────────────────────
// Serde helpers
// ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum AnyId {
    Text(String),
    Number(i64),
}

impl From<AnyId> for String {
    fn from(id: AnyId) -> Self {
        match id {
            AnyId::Text(s) => s,
            AnyId::Number(n) => n.to_string(),
        }
    }
}

/// Backends disagree on whether ids are numbers or strings; accept both.
fn id_from_any<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    AnyId::deserialize(de).map(String::from)
}

fn opt_id_from_any<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<AnyId>::deserialize(de)?.map(String::from))
}
