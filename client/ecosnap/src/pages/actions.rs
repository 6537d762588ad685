//! Actions page: the user's actions, newest first, with search, type
//! filter and a detail view.

use chrono::{DateTime, Utc};
use ecosnap_core::{Action, ActionList, ActionStatus, TypeFilter};
use tracing::info;

use crate::context::AppContext;
use crate::errors::Result;

pub const MSG_LOAD_FAILED: &str = "Failed to load actions";

/// Everything the detail view shows for one action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDetail {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: ActionStatus,
    pub points: u32,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Absolute URL of the proof media, if any was attached.
    pub proof_url: Option<String>,
}

impl ActionDetail {
    pub fn new(action: &Action, ctx: &AppContext) -> Self {
        Self {
            id: action.id.clone(),
            title: action.title.clone(),
            description: action.description.clone(),
            category: action.category.clone(),
            status: action.status,
            points: action.points,
            location: action.location.clone(),
            created_at: action.created_at,
            proof_url: action
                .proof_image
                .as_deref()
                .filter(|p| !p.is_empty())
                .map(|p| ctx.config.asset(p)),
        }
    }
}

#[derive(Debug, Default)]
pub struct ActionsPage {
    list: ActionList,
}

impl ActionsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &ActionList {
        &self.list
    }

    /// Fetch with the current type filter.
    pub async fn load(&mut self, ctx: &AppContext) -> Result<()> {
        let query = self.list.type_filter().query();
        match ctx.api.get_user_actions(&query).await {
            Ok(response) => {
                let mut actions = response.actions;
                actions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                info!(count = actions.len(), filter = ?self.list.type_filter(), "Actions loaded");
                self.list.set_actions(actions);
                Ok(())
            }
            Err(err) => {
                ctx.notifications.error(MSG_LOAD_FAILED);
                Err(err)
            }
        }
    }

    /// Change the type filter; the list is fetched again only when it
    /// actually changed.
    pub async fn set_type_filter(&mut self, filter: TypeFilter, ctx: &AppContext) -> Result<()> {
        if self.list.set_type_filter(filter) {
            self.load(ctx).await?;
        }
        Ok(())
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.list.set_search(term);
    }

    pub fn visible(&self) -> Vec<&Action> {
        self.list.visible()
    }

    pub fn open_detail(&mut self, id: &str, ctx: &AppContext) -> Option<ActionDetail> {
        self.list.select(id).map(|action| ActionDetail::new(action, ctx))
    }

    pub fn close_detail(&mut self) {
        self.list.close_detail();
    }
}
