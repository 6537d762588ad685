//! Authentication context.
//!
//! One [`Session`] is created at start-up and shared by reference (behind an
//! `Arc`) with the API client and the pages.  `login`/`register` initialise
//! it, `logout` tears it down.

use ecosnap_core::{RegisterForm, UserStats};
use tokio::sync::RwLock;
use tracing::info;

use crate::api::{AuthResponse, EcoApi};
use crate::errors::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub token: String,
    pub user: UserStats,
}

#[derive(Debug, Default)]
pub struct Session {
    state: RwLock<Option<AuthState>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session for a token obtained elsewhere; the user profile is unknown
    /// until fetched.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(Some(AuthState {
                token: token.into(),
                user: UserStats::default(),
            })),
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.as_ref().map(|s| s.token.clone())
    }

    pub async fn user(&self) -> Option<UserStats> {
        self.state.read().await.as_ref().map(|s| s.user.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_some()
    }

    pub async fn login(&self, api: &dyn EcoApi, email: &str, password: &str) -> Result<UserStats> {
        let auth = api.login(email, password).await?;
        Ok(self.establish(auth).await)
    }

    pub async fn register(&self, api: &dyn EcoApi, form: &RegisterForm) -> Result<UserStats> {
        let auth = api.register(form).await?;
        Ok(self.establish(auth).await)
    }

    /// Forget the token and user.  Also called when the backend rejects
    /// the token.
    pub async fn logout(&self) {
        if self.state.write().await.take().is_some() {
            info!("Session closed");
        }
    }

    async fn establish(&self, auth: AuthResponse) -> UserStats {
        let user = auth.user.clone();
        info!(username = ?user.username, "Session established");
        *self.state.write().await = Some(AuthState {
            token: auth.token,
            user: auth.user,
        });
        user
    }
}
