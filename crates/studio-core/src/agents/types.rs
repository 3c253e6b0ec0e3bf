//! Worker agent types and trait definitions
//!
//! Defines the core types for the pipeline architecture:
//! - AgentRole: immutable role description and instructions
//! - WorkerKind: the fixed pipeline stages as a sum type
//! - Worker trait: interface for pipeline stage execution

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Result;

/// Immutable role configuration for a worker agent
///
/// Created once at process start; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRole {
    /// Display name, e.g. "Research Agent"
    pub name: String,
    /// One-line responsibility statement
    pub responsibility: String,
    /// Ordered natural-language behavioral instructions
    pub instructions: Vec<String>,
    /// Whether output should be markdown-formatted
    pub markdown: bool,
}

impl AgentRole {
    pub fn new(name: impl Into<String>, responsibility: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            responsibility: responsibility.into(),
            instructions: vec![],
            markdown: true,
        }
    }

    pub fn with_instructions<I, S>(mut self, instructions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.instructions = instructions.into_iter().map(Into::into).collect();
        self
    }

    /// Render the role as a system prompt for the completion service.
    pub fn system_prompt(&self) -> String {
        let mut prompt = format!("You are the {}. {}", self.name, self.responsibility);

        if !self.instructions.is_empty() {
            prompt.push_str("\n\nFollow these instructions:");
            for (i, instruction) in self.instructions.iter().enumerate() {
                prompt.push_str(&format!("\n{}. {}", i + 1, instruction));
            }
        }

        if self.markdown {
            prompt.push_str("\n\nRespond in well-structured markdown.");
        }

        prompt
    }
}

/// The fixed pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerKind {
    Researcher,
    Analyst,
    Writer,
    Reviewer,
}

impl WorkerKind {
    /// Pipeline order: each stage's full output is the next stage's
    /// input.
    pub const PIPELINE: [WorkerKind; 4] = [
        WorkerKind::Researcher,
        WorkerKind::Analyst,
        WorkerKind::Writer,
        WorkerKind::Reviewer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Researcher => "researcher",
            Self::Analyst => "analyst",
            Self::Writer => "writer",
            Self::Reviewer => "reviewer",
        }
    }
}

impl fmt::Display for WorkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Worker trait for pipeline stage execution
///
/// Each worker wraps a role and produces markdown text from a text
/// prompt via the completion service.
#[async_trait]
pub trait Worker: Send + Sync {
    /// Which pipeline stage this worker fills
    fn kind(&self) -> WorkerKind;

    /// The worker's role configuration
    fn role(&self) -> &AgentRole;

    /// Execute the worker against a text prompt
    async fn invoke(&self, prompt: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_order() {
        assert_eq!(
            WorkerKind::PIPELINE,
            [
                WorkerKind::Researcher,
                WorkerKind::Analyst,
                WorkerKind::Writer,
                WorkerKind::Reviewer,
            ]
        );
    }

    #[test]
    fn test_system_prompt_rendering() {
        let role = AgentRole::new("Test Agent", "Does test things.")
            .with_instructions(["Be accurate", "Be brief"]);

        let prompt = role.system_prompt();
        assert!(prompt.starts_with("You are the Test Agent."));
        assert!(prompt.contains("1. Be accurate"));
        assert!(prompt.contains("2. Be brief"));
        assert!(prompt.contains("markdown"));
    }

    #[test]
    fn test_system_prompt_without_markdown() {
        let mut role = AgentRole::new("Plain Agent", "Plain output.");
        role.markdown = false;
        assert!(!role.system_prompt().contains("markdown"));
    }
}
