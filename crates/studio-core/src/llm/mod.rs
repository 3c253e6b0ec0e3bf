//! Completion service client and wire types
//!
//! Supports OpenAI-compatible chat completion APIs and the Claude
//! messages API.

pub mod client;
pub mod types;

pub use client::{Completion, CompletionClient};
pub use types::{Message, TokenUsage};
