//! Built-in role definitions
//!
//! The four pipeline roles and the manager's coordination instructions.
//! Roles are constructed once at process start and never mutated.

use std::sync::Arc;

use super::types::{AgentRole, Worker, WorkerKind};
use super::worker::CompletionWorker;
use crate::capability::SearchProvider;
use crate::llm::CompletionClient;

/// The role configuration for a pipeline stage.
pub fn role_for(kind: WorkerKind) -> AgentRole {
    match kind {
        WorkerKind::Researcher => {
            AgentRole::new("Research Agent", "Searches the web and gathers information.")
                .with_instructions([
                    "Search for accurate information",
                    "Provide factual data",
                    "Include statistics if available",
                ])
        }
        WorkerKind::Analyst => AgentRole::new("Analysis Agent", "Analyzes research data.")
            .with_instructions([
                "Analyze the research",
                "Identify key insights",
                "Summarize findings clearly",
            ]),
        WorkerKind::Writer => AgentRole::new("Writer Agent", "Writes structured content.")
            .with_instructions([
                "Write detailed explanation",
                "Use headings",
                "Make content easy to understand",
            ]),
        WorkerKind::Reviewer => {
            AgentRole::new("Reviewer Agent", "Reviews and improves content.").with_instructions([
                "Fix grammar",
                "Improve clarity",
                "Ensure professional tone",
            ])
        }
    }
}

/// Coordination instructions held by the manager.
pub fn manager_instructions() -> Vec<String> {
    [
        "Coordinate all agents",
        "Ensure proper workflow",
        "Return final refined output",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Build the four workers in pipeline order.
///
/// Only the researcher receives the search capability; the other stages
/// are pure text-to-text transformations.
pub fn default_team(
    client: &CompletionClient,
    search: Option<Arc<dyn SearchProvider>>,
    search_max_results: usize,
) -> Vec<Arc<dyn Worker>> {
    WorkerKind::PIPELINE
        .iter()
        .map(|kind| {
            let mut worker = CompletionWorker::new(*kind, role_for(*kind), client.clone());
            if *kind == WorkerKind::Researcher {
                if let Some(provider) = &search {
                    worker = worker.with_search(provider.clone(), search_max_results);
                }
            }
            Arc::new(worker) as Arc<dyn Worker>
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_roles_are_markdown_flagged() {
        for kind in WorkerKind::PIPELINE {
            let role = role_for(kind);
            assert!(role.markdown, "{kind} must produce markdown");
            assert_eq!(role.instructions.len(), 3);
        }
    }

    #[test]
    fn test_default_team_order() {
        let mut config = Config::default();
        config.llm.api_key = "sk-test".to_string();
        let client = CompletionClient::new(&config).unwrap();

        let team = default_team(&client, None, 5);
        let kinds: Vec<_> = team.iter().map(|w| w.kind()).collect();
        assert_eq!(kinds, WorkerKind::PIPELINE);
    }
}
