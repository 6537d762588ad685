//! EcoSnap client library.
//!
//! Page controllers for the EcoSnap eco-action tracker and the REST client
//! they share.  The `ecosnap` binary is a thin command-line presenter over
//! these; any other front end can drive the same controllers.
//!
//! ```text
//! pages::*  ──▶  AppContext { Config, EcoApi, Session, Notifications }
//!                  │
//!                  └─▶ HttpApi (reqwest) ──▶ EcoSnap REST API
//! ```

pub mod api;
pub mod config;
pub mod context;
pub mod errors;
pub mod media;
pub mod notify;
pub mod pages;
pub mod progress;
pub mod session;

#[cfg(test)]
mod testing;

pub use context::AppContext;
pub use errors::{ClientError, Result};
