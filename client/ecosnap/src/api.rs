//! EcoSnap REST client.
//!
//! [`EcoApi`] is the seam between the page controllers and the backend;
//! [`HttpApi`] is the production implementation over `reqwest`.
//!
//! ## Wire notes
//!
//! * Every request carries `Authorization: Bearer <token>` when the session
//!   holds one.
//! * `createAction` is a multipart form: scalar fields as text parts, `tags`
//!   as a JSON array string and the proof media as a `proofImage` file part.
//! * Some endpoints wrap their payload (`{ "user": {...} }`,
//!   `{ "action": {...} }`); both wrapped and bare bodies are accepted.
//! * Non-2xx responses become [`ClientError::Server`] carrying the
//!   backend's `message` (or `error`) field when it sent one.  A 401 also
//!   ends the session, since the token is no longer accepted.

use std::sync::Arc;

use async_trait::async_trait;
use ecosnap_core::{
    Action, ActionQuery, ActionsResponse, LeaderboardResponse, NewAction, RegisterForm, UserStats,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::errors::{ClientError, Result};
use crate::session::Session;

/// Token plus profile returned by `login` and `register`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub user: UserStats,
}

#[async_trait]
pub trait EcoApi: Send + Sync {
    async fn get_user_actions(&self, query: &ActionQuery) -> Result<ActionsResponse>;
    async fn create_action(&self, action: &NewAction) -> Result<Action>;
    async fn get_me(&self) -> Result<UserStats>;
    async fn get_global_leaderboard(&self) -> Result<LeaderboardResponse>;
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse>;
    async fn register(&self, form: &RegisterForm) -> Result<AuthResponse>;
}

pub struct HttpApi {
    http: Client,
    base_url: String,
    session: Arc<Session>,
}

impl HttpApi {
    pub fn new(config: &Config, session: Arc<Session>) -> Result<Self> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, what: &str, request: RequestBuilder) -> Result<Value> {
        let response = self.authorize(request).await.send().await.map_err(|e| {
            error!("{what} request failed: {e}");
            ClientError::from(e)
        })?;
        let body = match read_body(response).await {
            Ok(body) => body,
            Err(err) => {
                error!("{what} rejected: {err}");
                if matches!(err, ClientError::Server { status: 401, .. }) {
                    self.session.logout().await;
                }
                return Err(err);
            }
        };
        debug!("{what} succeeded");
        Ok(body)
    }
}

#[async_trait]
impl EcoApi for HttpApi {
    async fn get_user_actions(&self, query: &ActionQuery) -> Result<ActionsResponse> {
        let request = self.http.get(self.url("/actions")).query(query);
        let body = self.send("getUserActions", request).await?;
        let actions: ActionsResponse = serde_json::from_value(body)?;
        info!("Fetched {} actions", actions.actions.len());
        Ok(actions)
    }

    async fn create_action(&self, action: &NewAction) -> Result<Action> {
        let form = multipart_for(action).await?;
        let request = self.http.post(self.url("/actions")).multipart(form);
        let body = self.send("createAction", request).await?;
        let created: Action = unwrap_envelope(body, &["action", "data"])?;
        info!(id = %created.id, "Action created");
        Ok(created)
    }

    async fn get_me(&self) -> Result<UserStats> {
        let request = self.http.get(self.url("/auth/me"));
        let body = self.send("getMe", request).await?;
        unwrap_envelope(body, &["user", "data"])
    }

    async fn get_global_leaderboard(&self) -> Result<LeaderboardResponse> {
        let request = self.http.get(self.url("/leaderboard/global"));
        let body = self.send("getGlobalLeaderboard", request).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let request = self
            .http
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }));
        let body = self.send("login", request).await?;
        unwrap_envelope(body, &["data"])
    }

    async fn register(&self, form: &RegisterForm) -> Result<AuthResponse> {
        let request = self.http.post(self.url("/auth/register")).json(form);
        let body = self.send("register", request).await?;
        unwrap_envelope(body, &["data"])
    }
}

async fn multipart_for(action: &NewAction) -> Result<Form> {
    let mut form = Form::new()
        .text("type", action.category.as_str())
        .text("title", action.title.clone())
        .text("description", action.description.clone())
        .text("points", action.points.to_string())
        .text("tags", serde_json::to_string(&action.tags)?);

    if let Some(location) = &action.location {
        form = form.text("location", location.clone());
    }

    if let Some(proof) = &action.proof {
        let bytes = tokio::fs::read(&proof.path).await?;
        let part = Part::bytes(bytes)
            .file_name(proof.file_name.clone())
            .mime_str(&proof.mime_type)?;
        form = form.part("proofImage", part);
    }

    Ok(form)
}

/// Parse the body of a response, turning non-2xx statuses into
/// [`ClientError::Server`].
async fn read_body(response: Response) -> Result<Value> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(ClientError::Server {
            status: status.as_u16(),
            message: server_message(&text).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            }),
        });
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

fn server_message(body: &str) -> Option<String> {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        ["message", "error"]
            .iter()
            .find_map(|key| v.get(*key).and_then(Value::as_str).map(str::to_string))
    });
    from_json
        .or_else(|| Some(body.trim().to_string()))
        .filter(|m| !m.is_empty())
}

/// Deserialize `body[key]` for the first wrapper key present, or the body
/// itself when it is not wrapped.
fn unwrap_envelope<T: DeserializeOwned>(body: Value, keys: &[&str]) -> Result<T> {
    let inner = match body {
        Value::Object(mut map) => {
            let wrapper = keys
                .iter()
                .find(|k| map.get(**k).is_some_and(Value::is_object));
            match wrapper {
                Some(key) => map.remove(*key).unwrap_or(Value::Null),
                None => Value::Object(map),
            }
        }
        other => other,
    };
    Ok(serde_json::from_value(inner)?)
}
