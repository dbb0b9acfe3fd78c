//! # CLI Module
//!
//! This module provides the command-line interface layer for huesort, a
//! Spotify client that reorders playlist tracks by the visual similarity of
//! their album-art colors. It implements the user-facing commands and
//! coordinates between the Spotify API layer, token management, and the
//! color pipeline.
//!
//! ## Commands
//!
//! - [`auth`] - Initiates the Spotify OAuth authentication flow with PKCE
//!   security
//! - [`playlists`] - Lists the playlists owned by the current user, with
//!   optional search filtering
//! - [`sort`] - Sorts a playlist's tracks by album-art color and writes the
//!   new order back to Spotify
//!
//! ## Architecture Design
//!
//! Each command follows the same layered flow:
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Color Pipeline (pure, per-sort computation)
//!     ↓
//! API Layer (Spotify Integration)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! The CLI owns user interaction: parameter validation up front, progress
//! bars for long operations via `indicatif`, tables via `tabled`, and
//! colored status output through the crate's logging macros. Fatal problems
//! (missing token, invalid parameters, empty playlists) terminate with a
//! clear message; per-track problems during a sort are reported as warnings
//! and handled by the configured error policy.

mod auth;
mod playlists;
mod sort;

pub use auth::auth;
pub use playlists::playlists;
pub use sort::sort;
