//! # API Module
//!
//! HTTP endpoints of the local callback listener that can stand in for manual
//! paste-back during login.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the redirect from Spotify's authorization server,
//!   checks the `state` parameter and hands the authorization code to the
//!   waiting login flow.
//! - [`health`] - Returns application status and version information.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use spotmag::api::{CallbackState, callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback).layer(Extension(state)))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::CallbackState;
pub use callback::callback;
pub use health::health;
