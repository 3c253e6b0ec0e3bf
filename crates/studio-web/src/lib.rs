//! studio-web: single-page UI and JSON API for the agent pipeline
//!
//! Collects the user's query, invokes the manager, keeps the session
//! history, and renders results. The session context (history, run
//! guard, credential status) is explicit state, not framework globals.

pub mod api;
pub mod error;
pub mod server;

pub use api::{AppState, create_router};
pub use error::{Result, WebError};
pub use server::StudioServer;
