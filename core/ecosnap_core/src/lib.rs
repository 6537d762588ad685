//! # EcoSnap Core
//!
//! Domain logic of the **EcoSnap** client: users log environmentally
//! friendly actions, attach photo or video proof, and climb a points
//! leaderboard.  This crate holds everything that does not touch the
//! network, grouped by the page that needs it:
//!
//! | Concern            | Module(s)                                   |
//! |--------------------|---------------------------------------------|
//! | Data model         | [`types`]                                   |
//! | File acceptance    | [`validator`]                               |
//! | Drop/browse target | [`upload_zone`]                             |
//! | Data entry         | [`form`] (create, quick upload, register)   |
//! | Actions page       | [`filter`]                                  |
//! | Dashboard          | [`stats`]                                   |
//! | Leaderboard        | [`leaderboard`]                             |
//!
//! ## Architecture
//!
//! Requests, timers and notifications live in the `ecosnap` client crate.
//! Here every operation is synchronous and deterministic; the dashboard
//! functions take "today" and a time zone as arguments instead of reading
//! the clock.

pub mod filter;
pub mod form;
pub mod leaderboard;
pub mod stats;
pub mod types;
pub mod upload_zone;
pub mod validator;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_properties;

pub use filter::{ActionList, TypeFilter};
pub use form::{ActionForm, FieldError, FormError, QuickUploadForm, RegisterForm};
pub use types::{
    Action, ActionCategory, ActionQuery, ActionStatus, ActionsResponse, LeaderboardResponse,
    LeaderboardEntry, MediaKind, NewAction, UploadCandidate, UploadStatus, UserStats,
};
pub use upload_zone::{UploadZone, ZoneEvent, ZoneOutcome, ZoneOwner, ZoneState};
pub use validator::{AcceptPattern, FileRejection, MediaLimits};
