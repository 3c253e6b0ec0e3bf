//! Role-labeled worker agents and the manager pipeline
//!
//! - `AgentRole`: immutable role description + behavioral instructions
//! - `Worker` trait: interface for pipeline stages
//! - `CompletionWorker`: worker backed by the completion service
//! - `Manager`: dispatches a query through the fixed four-stage pipeline

pub mod manager;
pub mod roles;
pub mod types;
pub mod worker;

pub use manager::Manager;
pub use roles::default_team;
pub use types::{AgentRole, Worker, WorkerKind};
pub use worker::CompletionWorker;
