//! Shared application state handed to every page.

use std::sync::Arc;

use crate::api::{EcoApi, HttpApi};
use crate::config::Config;
use crate::errors::Result;
use crate::notify::Notifications;
use crate::session::Session;

pub struct AppContext {
    pub config: Config,
    pub api: Arc<dyn EcoApi>,
    pub session: Arc<Session>,
    pub notifications: Notifications,
}

impl AppContext {
    pub fn new(config: Config, api: Arc<dyn EcoApi>, session: Arc<Session>) -> Self {
        Self {
            config,
            api,
            session,
            notifications: Notifications::default(),
        }
    }

    /// Production wiring: HTTP client over a session seeded from the
    /// configured token, if any.
    pub fn connect(config: Config) -> Result<Self> {
        let session = Arc::new(match &config.token {
            Some(token) => Session::with_token(token.clone()),
            None => Session::new(),
        });
        let api = Arc::new(HttpApi::new(&config, session.clone())?);
        Ok(Self::new(config, api, session))
    }
}
