//! # API Module
//!
//! HTTP endpoints served by the local server while a user authorizes the
//! application:
//!
//! - [`callback`] - receives `?code=…&state=…` from the authorization page,
//!   checks `state` against the pending request and exchanges the code for a
//!   credential.
//! - [`health`] - liveness probe returning name and version.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spotufy::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
