//! Session-scoped run history
//!
//! In-memory only; cleared by explicit user action or process restart.

pub mod history;

pub use history::{RunRecord, SessionHistory};
