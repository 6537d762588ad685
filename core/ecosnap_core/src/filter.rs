//! Action list view-model: search filtering, type filter and the
//! detail-view selection.

use crate::types::{Action, ActionCategory, ActionQuery};

/// Case-insensitive substring match against title, description or
/// location.  A hit in any one of them is enough.  An empty term matches
/// everything.
pub fn matches_search(action: &Action, term: &str) -> bool {
    let needle = term.to_lowercase();
    action.title.to_lowercase().contains(&needle)
        || action.description.to_lowercase().contains(&needle)
        || action
            .location
            .as_deref()
            .is_some_and(|loc| loc.to_lowercase().contains(&needle))
}

pub fn filter_actions<'a>(actions: &'a [Action], term: &str) -> Vec<&'a Action> {
    actions.iter().filter(|a| matches_search(a, term)).collect()
}

/// Server-side type filter selected on the Actions page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Category(ActionCategory),
}

impl TypeFilter {
    /// Query used to (re)load the list: newest first, narrowed by type.
    pub fn query(&self) -> ActionQuery {
        let action_type = match self {
            Self::All => None,
            Self::Category(c) => Some(c.as_str().to_string()),
        };
        ActionQuery::newest_first(action_type)
    }
}

/// State behind the Actions page.
#[derive(Debug, Clone, Default)]
pub struct ActionList {
    actions: Vec<Action>,
    search: String,
    type_filter: TypeFilter,
    selected: Option<Action>,
}

impl ActionList {
    /// Replace the loaded actions.  An open detail view keeps showing the
    /// record it was opened with.
    pub fn set_actions(&mut self, actions: Vec<Action>) {
        self.actions = actions;
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Returns `true` when the filter changed and the list must be fetched
    /// again.
    pub fn set_type_filter(&mut self, filter: TypeFilter) -> bool {
        let changed = self.type_filter != filter;
        self.type_filter = filter;
        changed
    }

    pub fn type_filter(&self) -> TypeFilter {
        self.type_filter
    }

    /// Actions matching the current search term, in load order.
    pub fn visible(&self) -> Vec<&Action> {
        filter_actions(&self.actions, &self.search)
    }

    /// Open the detail view for `id`.
    pub fn select(&mut self, id: &str) -> Option<&Action> {
        self.selected = self.actions.iter().find(|a| a.id == id).cloned();
        self.selected.as_ref()
    }

    pub fn selected(&self) -> Option<&Action> {
        self.selected.as_ref()
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }
}
