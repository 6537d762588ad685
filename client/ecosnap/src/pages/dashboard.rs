//! Dashboard: profile, recent actions and the statistics derived from
//! them, plus the quick-upload bubble.

use chrono::{Local, NaiveDate, TimeZone};
use ecosnap_core::stats::DashboardSnapshot;
use ecosnap_core::{Action, ActionQuery, UserStats};
use tracing::{info, warn};

use crate::context::AppContext;
use crate::errors::{ClientError, Result};
use crate::pages::quick_upload::QuickUploadBubble;

pub const MSG_LOAD_FAILED: &str = "Failed to load dashboard data";

const RECENT_LIMIT: u32 = 3;
const WEEKLY_LIMIT: u32 = 50;

#[derive(Default)]
pub struct DashboardPage {
    profile: UserStats,
    recent: Vec<Action>,
    weekly: Vec<Action>,
    bubble: QuickUploadBubble,
}

impl DashboardPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(&self) -> &UserStats {
        &self.profile
    }

    pub fn recent(&self) -> &[Action] {
        &self.recent
    }

    pub fn bubble(&self) -> &QuickUploadBubble {
        &self.bubble
    }

    pub fn bubble_mut(&mut self) -> &mut QuickUploadBubble {
        &mut self.bubble
    }

    /// Profile, the three most recent actions, and up to fifty for the
    /// weekly chart.
    pub async fn load(&mut self, ctx: &AppContext) -> Result<()> {
        let fetched = async {
            let profile = ctx.api.get_me().await?;
            let recent = ctx.api.get_user_actions(&ActionQuery::limit(RECENT_LIMIT)).await?;
            let weekly = ctx.api.get_user_actions(&ActionQuery::limit(WEEKLY_LIMIT)).await?;
            Ok::<_, ClientError>((profile, recent.actions, weekly.actions))
        }
        .await;

        match fetched {
            Ok((profile, recent, weekly)) => {
                info!(recent = recent.len(), weekly = weekly.len(), "Dashboard loaded");
                self.profile = profile;
                self.recent = recent;
                self.weekly = weekly;
                Ok(())
            }
            Err(err) => {
                ctx.notifications.error(MSG_LOAD_FAILED);
                Err(err)
            }
        }
    }

    pub fn snapshot<Tz: TimeZone>(
        &self,
        session_points: Option<u64>,
        today: NaiveDate,
        tz: &Tz,
    ) -> DashboardSnapshot {
        DashboardSnapshot::compute(
            &self.profile,
            session_points,
            &self.recent,
            &self.weekly,
            today,
            tz,
        )
    }

    /// Snapshot for the local calendar day.
    pub async fn snapshot_now(&self, ctx: &AppContext) -> DashboardSnapshot {
        let session_points = ctx.session.user().await.and_then(|u| u.total_points);
        self.snapshot(session_points, Local::now().date_naive(), &Local)
    }

    /// Submit the bubble, then refresh so the new points show up.
    pub async fn submit_quick_upload(&mut self, ctx: &AppContext) -> Result<Action> {
        let created = self.bubble.submit(ctx).await?;
        if let Err(err) = self.load(ctx).await {
            warn!("Dashboard refresh after upload failed: {err}");
        }
        Ok(created)
    }
}
