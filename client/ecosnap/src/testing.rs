//! In-memory [`EcoApi`] used by the controller tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ecosnap_core::{
    Action, ActionQuery, ActionStatus, ActionsResponse, LeaderboardEntry, LeaderboardResponse,
    NewAction, RegisterForm, UserStats,
};

use crate::api::{AuthResponse, EcoApi};
use crate::config::Config;
use crate::context::AppContext;
use crate::errors::{ClientError, Result};
use crate::session::Session;

pub fn action(id: &str, title: &str, created_at: DateTime<Utc>) -> Action {
    Action {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        category: "Other".to_string(),
        location: None,
        points: 50,
        status: ActionStatus::Pending,
        proof_image: None,
        created_at,
    }
}

#[derive(Default)]
pub struct FakeApi {
    pub actions: Mutex<Vec<Action>>,
    pub me: Mutex<UserStats>,
    pub leaderboard: Mutex<Vec<LeaderboardEntry>>,
    pub created: Mutex<Vec<NewAction>>,
    pub queries: Mutex<Vec<ActionQuery>>,
    calls: Mutex<Vec<&'static str>>,
    failures: Mutex<HashMap<&'static str, (u16, String)>>,
    delay: Mutex<Option<Duration>>,
}

impl FakeApi {
    /// Every method fails with this server error.
    pub fn fail_with(&self, status: u16, message: &str) {
        self.fail_on("*", status, message);
    }

    pub fn fail_on(&self, method: &'static str, status: u16, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(method, (status, message.to_string()));
    }

    pub fn clear_failures(&self) {
        self.failures.lock().unwrap().clear();
    }

    /// Delay every call, so tests can observe in-flight state.
    pub fn delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|m| **m == method)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn enter(&self, method: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(method);
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let failures = self.failures.lock().unwrap();
        match failures.get(method).or_else(|| failures.get("*")) {
            Some((status, message)) => Err(ClientError::Server {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EcoApi for FakeApi {
    async fn get_user_actions(&self, query: &ActionQuery) -> Result<ActionsResponse> {
        self.queries.lock().unwrap().push(query.clone());
        self.enter("get_user_actions").await?;
        let mut actions = self.actions.lock().unwrap().clone();
        if let Some(limit) = query.limit {
            actions.truncate(limit as usize);
        }
        Ok(ActionsResponse { actions })
    }

    async fn create_action(&self, action: &NewAction) -> Result<Action> {
        self.enter("create_action").await?;
        let mut created = self.created.lock().unwrap();
        created.push(action.clone());
        Ok(Action {
            id: format!("new-{}", created.len()),
            title: action.title.clone(),
            description: action.description.clone(),
            category: action.category.as_str().to_string(),
            location: action.location.clone(),
            points: action.points,
            status: ActionStatus::Pending,
            proof_image: action
                .proof
                .as_ref()
                .map(|p| format!("/uploads/{}", p.file_name)),
            created_at: Utc::now(),
        })
    }

    async fn get_me(&self) -> Result<UserStats> {
        self.enter("get_me").await?;
        Ok(self.me.lock().unwrap().clone())
    }

    async fn get_global_leaderboard(&self) -> Result<LeaderboardResponse> {
        self.enter("get_global_leaderboard").await?;
        Ok(LeaderboardResponse {
            leaderboard: self.leaderboard.lock().unwrap().clone(),
        })
    }

    async fn login(&self, _email: &str, _password: &str) -> Result<AuthResponse> {
        self.enter("login").await?;
        Ok(AuthResponse {
            token: "fake-token".to_string(),
            user: UserStats {
                username: Some("ana".to_string()),
                ..UserStats::default()
            },
        })
    }

    async fn register(&self, form: &RegisterForm) -> Result<AuthResponse> {
        self.enter("register").await?;
        Ok(AuthResponse {
            token: "fake-token".to_string(),
            user: UserStats {
                username: Some(form.username.clone()),
                first_name: Some(form.first_name.clone()),
                last_name: Some(form.last_name.clone()),
                ..UserStats::default()
            },
        })
    }
}

/// Context over a fresh [`FakeApi`] with no post-success delay.
pub fn context() -> (AppContext, Arc<FakeApi>) {
    let api = Arc::new(FakeApi::default());
    let config = Config {
        reset_delay: Duration::ZERO,
        ..Config::default()
    };
    let ctx = AppContext::new(config, api.clone(), Arc::new(Session::with_token("fake-token")));
    (ctx, api)
}
