//! Register page.

use std::collections::BTreeMap;

use ecosnap_core::{RegisterForm, UserStats};

use crate::context::AppContext;
use crate::errors::{ClientError, Result};

pub const MSG_REGISTERED: &str = "Registration successful! Welcome to EcoSnap!";
pub const MSG_REGISTER_FAILED: &str = "Registration failed. Please try again.";

#[derive(Debug, Default)]
pub struct RegisterPage {
    form: RegisterForm,
    errors: BTreeMap<&'static str, String>,
}

impl RegisterPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &RegisterForm {
        &self.form
    }

    /// Inline errors keyed by field (`username`, `location.city`, ...).
    pub fn errors(&self) -> &BTreeMap<&'static str, String> {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Editing a field clears its error.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        let key = self.form.set_field(name, value)?;
        self.errors.remove(key);
        Ok(())
    }

    fn validate(&mut self) -> bool {
        self.errors = self
            .form
            .validate()
            .into_iter()
            .map(|e| (e.field, e.message))
            .collect();
        self.errors.is_empty()
    }

    /// Validate, register and open the session.
    pub async fn submit(&mut self, ctx: &AppContext) -> Result<UserStats> {
        if !self.validate() {
            return Err(ClientError::Validation(self.form.validate()));
        }

        match ctx.session.register(ctx.api.as_ref(), &self.form).await {
            Ok(user) => {
                ctx.notifications.success(MSG_REGISTERED);
                Ok(user)
            }
            Err(err) => {
                let message = match &err {
                    ClientError::Server { message, .. } if !message.trim().is_empty() => {
                        message.clone()
                    }
                    _ => MSG_REGISTER_FAILED.to_string(),
                };
                ctx.notifications.error(message);
                Err(err)
            }
        }
    }
}
