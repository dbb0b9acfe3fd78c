//! # API Module
//!
//! HTTP endpoints for the local web server that backs the OAuth flow.
//!
//! - [`callback`] - Handles the OAuth callback request from Spotify's
//!   authorization server and completes the PKCE token exchange.
//! - [`health`] - Health check endpoint returning application status and
//!   version.
//!
//! The endpoints are plain [axum](https://docs.rs/axum) handlers wired up by
//! [`crate::server::start_api_server`]. Temporary authentication state is
//! shared with the CLI through an `Arc<Mutex<Option<PkceToken>>>` extension.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
