//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by the
//! playlist color sorter: authentication, playlist and track retrieval, and
//! the write-back of the sorted track order. It abstracts away HTTP
//! requests, the OAuth flow, and API quirks behind a small Rust interface
//! for the CLI layer.
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow: code verifier/challenge generation,
//!   local callback handling, token exchange and refresh. No client secret
//!   is stored or transmitted.
//! - [`user`] - Current-user profile lookup, used to filter playlists down
//!   to the ones the user owns (only those can be reordered).
//! - [`playlists`] - Playlist listing, paginated track retrieval, and the
//!   chunked replacement of a playlist's track order.
//!
//! ## Error Handling
//!
//! All request paths handle Spotify's operational quirks the same way:
//!
//! - **429 Too Many Requests**: the `Retry-After` header is honored for
//!   delays up to 120 seconds; longer delays produce a warning instead of a
//!   silent multi-minute stall.
//! - **502 Bad Gateway**: transient; retried after a 10 second pause.
//! - Everything else is propagated as `reqwest::Error` for the caller to
//!   report.
//!
//! ## API Coverage
//!
//! - `GET /me` - current user profile
//! - `GET /me/playlists` - user's playlists with pagination
//! - `GET /playlists/{id}/tracks` - playlist items with pagination
//! - `PUT/POST /playlists/{id}/tracks` - replace/append the track order
//! - `POST /api/token` - token exchange and refresh

pub mod auth;
pub mod playlists;
pub mod user;
