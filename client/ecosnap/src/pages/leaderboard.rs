//! Leaderboard page.  Never empty: a failed fetch shows the built-in
//! demo ranking instead.

use ecosnap_core::leaderboard::{fallback_leaderboard, LeaderboardScope};
use ecosnap_core::LeaderboardEntry;
use tracing::{info, warn};

use crate::context::AppContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Server,
    Fallback,
}

#[derive(Debug)]
pub struct LeaderboardPage {
    scope: LeaderboardScope,
    entries: Vec<LeaderboardEntry>,
    source: Source,
}

impl Default for LeaderboardPage {
    fn default() -> Self {
        Self {
            scope: LeaderboardScope::Global,
            entries: Vec::new(),
            source: Source::Server,
        }
    }
}

impl LeaderboardPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(&self) -> LeaderboardScope {
        self.scope
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub async fn load(&mut self, ctx: &AppContext) {
        match ctx.api.get_global_leaderboard().await {
            Ok(response) => {
                info!(entries = response.leaderboard.len(), "Leaderboard loaded");
                self.entries = response.leaderboard;
                self.source = Source::Server;
            }
            Err(err) => {
                warn!("Leaderboard unavailable, showing fallback ranking: {err}");
                self.entries = fallback_leaderboard();
                self.source = Source::Fallback;
            }
        }
    }

    /// Every tab re-runs the global query; only Global has a backend.
    pub async fn select_scope(&mut self, scope: LeaderboardScope, ctx: &AppContext) {
        self.scope = scope;
        self.load(ctx).await;
    }
}
