//! studio-core: Multi-Agent Studio Core Library
//!
//! Role-labeled worker agents, the manager pipeline, the completion
//! service client, the search capability seam, and in-memory session
//! history.

pub mod agents;
pub mod capability;
pub mod config;
pub mod error;
pub mod llm;
pub mod session;

pub use agents::{AgentRole, CompletionWorker, Manager, Worker, WorkerKind, default_team};
pub use capability::SearchProvider;
pub use config::{Config, LlmConfig, LlmProvider, SearchConfig, WebConfig};
pub use error::{Error, Result};
pub use llm::{Completion, CompletionClient, Message, TokenUsage};
pub use session::{RunRecord, SessionHistory};
