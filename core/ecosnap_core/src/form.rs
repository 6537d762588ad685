//! Form state for the three data-entry surfaces: the Create Action page,
//! the quick-upload bubble and the registration page.
//!
//! Each form knows how to validate itself and how to turn itself into a
//! request payload.  None of them talk to the network.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::types::{
    ActionCategory, MediaKind, NewAction, UnknownCategory, UploadCandidate, DEFAULT_POINTS,
};
use crate::upload_zone::ZoneOwner;

pub const MSG_REQUIRED_TITLE_CATEGORY: &str = "Please fill in title and category";
pub const MSG_TITLE_LENGTH: &str = "Title must be between 3 and 100 characters";
pub const MSG_DESCRIPTION_LENGTH: &str = "Description must be between 10 and 500 characters";
pub const MSG_LOCATION_LENGTH: &str = "Location must be less than 200 characters";
pub const MSG_FILE_REQUIRED: &str = "Please choose a photo or video to upload";
pub const MSG_TITLE_REQUIRED: &str = "Title is required";

const TITLE_LEN: (usize, usize) = (3, 100);
const DESCRIPTION_LEN: (usize, usize) = (10, 500);
const LOCATION_MAX: usize = 200;
const USERNAME_LEN: (usize, usize) = (3, 30);
const PASSWORD_MIN: usize = 6;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("static email pattern"));

/// A single validation failure, keyed by the field it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),
}

/// Lengths are counted in characters, not bytes.
fn len_within(value: &str, (min, max): (usize, usize)) -> bool {
    let n = value.chars().count();
    n >= min && n <= max
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ─────────────────────────────────────────────────────────
// Create Action
// ─────────────────────────────────────────────────────────

/// Fields of the Create Action page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionForm {
    pub title: String,
    pub description: String,
    pub category: Option<ActionCategory>,
    pub location: String,
    /// Free-form date as typed (`YYYY-MM-DD`); not sent to the backend.
    pub date: String,
    pub image: Option<UploadCandidate>,
}

impl ActionForm {
    /// Set a text field by name.  `category` must name a known category;
    /// an empty value clears it.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        match name {
            "title" => self.title = value.to_string(),
            "description" => self.description = value.to_string(),
            "location" => self.location = value.to_string(),
            "date" => self.date = value.to_string(),
            "category" => {
                self.category = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                };
            }
            other => return Err(FormError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    /// Required fields first; when they are missing nothing else is
    /// reported.  Otherwise every length violation is listed.
    pub fn validate(&self) -> Vec<FieldError> {
        if self.title.is_empty() {
            return vec![FieldError::new("title", MSG_REQUIRED_TITLE_CATEGORY)];
        }
        if self.category.is_none() {
            return vec![FieldError::new("category", MSG_REQUIRED_TITLE_CATEGORY)];
        }

        let mut errors = Vec::new();
        if !len_within(&self.title, TITLE_LEN) {
            errors.push(FieldError::new("title", MSG_TITLE_LENGTH));
        }
        if !self.description.is_empty() && !len_within(&self.description, DESCRIPTION_LEN) {
            errors.push(FieldError::new("description", MSG_DESCRIPTION_LENGTH));
        }
        errors
    }

    /// Build the create payload.  `None` until a category is chosen.
    pub fn to_new_action(&self) -> Option<NewAction> {
        let category = self.category?;
        let description = if self.description.is_empty() {
            format!("Eco action: {}", self.title)
        } else {
            self.description.clone()
        };
        Some(NewAction {
            category,
            title: self.title.clone(),
            description,
            points: DEFAULT_POINTS,
            location: non_empty(&self.location),
            proof: self.image.clone(),
            tags: Vec::new(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl ZoneOwner for ActionForm {
    fn selected_file(&self) -> Option<&UploadCandidate> {
        self.image.as_ref()
    }

    fn on_file_selected(&mut self, file: UploadCandidate) {
        self.image = Some(file);
    }

    fn on_file_removed(&mut self) {
        self.image = None;
    }
}

// ─────────────────────────────────────────────────────────
// Quick upload
// ─────────────────────────────────────────────────────────

/// Fields of the floating quick-upload bubble.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuickUploadForm {
    pub kind: MediaKind,
    pub title: String,
    pub location: String,
    pub file: Option<UploadCandidate>,
}

impl QuickUploadForm {
    /// Mirrors the submit button: a file and a non-blank title.
    pub fn can_submit(&self) -> bool {
        self.file.is_some() && !self.title.trim().is_empty()
    }

    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.file.is_none() {
            errors.push(FieldError::new("file", MSG_FILE_REQUIRED));
        }
        if self.title.trim().is_empty() {
            errors.push(FieldError::new("title", MSG_TITLE_REQUIRED));
        } else if !len_within(&self.title, TITLE_LEN) {
            errors.push(FieldError::new("title", MSG_TITLE_LENGTH));
        }
        if self.location.chars().count() > LOCATION_MAX {
            errors.push(FieldError::new("location", MSG_LOCATION_LENGTH));
        }
        errors
    }

    pub fn to_new_action(&self) -> Option<NewAction> {
        let file = self.file.clone()?;
        Some(NewAction {
            category: ActionCategory::Other,
            title: self.title.clone(),
            description: format!(
                "Uploaded {}: {}. This action was created using the quick upload feature.",
                self.kind.as_str(),
                self.title
            ),
            points: DEFAULT_POINTS,
            location: non_empty(&self.location),
            proof: Some(file),
            tags: Vec::new(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl ZoneOwner for QuickUploadForm {
    fn selected_file(&self) -> Option<&UploadCandidate> {
        self.file.as_ref()
    }

    fn on_file_selected(&mut self, file: UploadCandidate) {
        self.kind = MediaKind::from_mime(&file.mime_type);
        self.file = Some(file);
    }

    fn on_file_removed(&mut self) {
        self.file = None;
    }
}

// ─────────────────────────────────────────────────────────
// Registration
// ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegisterLocation {
    pub country: String,
    pub city: String,
}

/// Registration data; serializes to the backend's register payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub location: RegisterLocation,
}

impl RegisterForm {
    /// Set a field by name and return the key its errors are reported
    /// under.  `location.country` and `location.city` merge into the nested
    /// location without touching its other half.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<&'static str, FormError> {
        let value = value.to_string();
        let key = match name {
            "username" => {
                self.username = value;
                "username"
            }
            "email" => {
                self.email = value;
                "email"
            }
            "password" => {
                self.password = value;
                "password"
            }
            "confirmPassword" | "confirm_password" => {
                self.confirm_password = value;
                "confirmPassword"
            }
            "firstName" | "first_name" => {
                self.first_name = value;
                "firstName"
            }
            "lastName" | "last_name" => {
                self.last_name = value;
                "lastName"
            }
            "location.country" => {
                self.location.country = value;
                "location.country"
            }
            "location.city" => {
                self.location.city = value;
                "location.city"
            }
            other => return Err(FormError::UnknownField(other.to_string())),
        };
        Ok(key)
    }

    /// At most one error per field: the first rule it breaks.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let username = &self.username;
        if username.is_empty() {
            errors.push(FieldError::new("username", "Username is required"));
        } else if username.chars().count() < USERNAME_LEN.0 {
            errors.push(FieldError::new("username", "Username must be at least 3 characters"));
        } else if username.chars().count() > USERNAME_LEN.1 {
            errors.push(FieldError::new("username", "Username must be less than 30 characters"));
        } else if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
            errors.push(FieldError::new(
                "username",
                "Username can only contain letters and numbers",
            ));
        }

        if self.email.is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        } else if !EMAIL.is_match(&self.email) {
            errors.push(FieldError::new("email", "Email is invalid"));
        }

        let password = &self.password;
        if password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        } else if password.chars().count() < PASSWORD_MIN {
            errors.push(FieldError::new("password", "Password must be at least 6 characters"));
        } else if !(password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| c.is_ascii_digit()))
        {
            errors.push(FieldError::new(
                "password",
                "Password must contain at least one uppercase letter, one lowercase letter, and one number",
            ));
        }

        if self.confirm_password.is_empty() {
            errors.push(FieldError::new("confirmPassword", "Please confirm your password"));
        } else if self.confirm_password != self.password {
            errors.push(FieldError::new("confirmPassword", "Passwords do not match"));
        }

        if self.first_name.is_empty() {
            errors.push(FieldError::new("firstName", "First name is required"));
        }
        if self.last_name.is_empty() {
            errors.push(FieldError::new("lastName", "Last name is required"));
        }

        errors
    }
}
