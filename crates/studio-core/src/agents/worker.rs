//! Completion-service-backed worker implementation

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::types::{AgentRole, Worker, WorkerKind};
use crate::capability::SearchProvider;
use crate::llm::CompletionClient;
use crate::Result;

/// Default worker implementation using the completion service.
///
/// A worker holds an immutable role and, optionally, a search capability.
/// Only the researcher is built with one; a capability failure is
/// absorbed locally and never propagated to the manager.
pub struct CompletionWorker {
    kind: WorkerKind,
    role: AgentRole,
    client: CompletionClient,
    search: Option<Arc<dyn SearchProvider>>,
    search_max_results: usize,
}

impl CompletionWorker {
    pub fn new(kind: WorkerKind, role: AgentRole, client: CompletionClient) -> Self {
        Self {
            kind,
            role,
            client,
            search: None,
            search_max_results: 5,
        }
    }

    /// Inject a search capability (explicit dependency, substitutable in
    /// tests).
    pub fn with_search(mut self, provider: Arc<dyn SearchProvider>, max_results: usize) -> Self {
        self.search = Some(provider);
        self.search_max_results = max_results;
        self
    }

    /// Run the search capability, degrading to no snippets on failure or
    /// empty provider response.
    async fn gather_snippets(&self, query: &str) -> Option<String> {
        let provider = self.search.as_ref()?;

        match provider.search(query, self.search_max_results).await {
            Ok(snippets) if !snippets.trim().is_empty() => Some(snippets),
            Ok(_) => {
                debug!(worker = %self.kind, "search returned no snippets");
                None
            }
            Err(e) => {
                warn!(
                    worker = %self.kind,
                    error = %e,
                    "search capability failed, answering from model knowledge"
                );
                None
            }
        }
    }
}

#[async_trait]
impl Worker for CompletionWorker {
    fn kind(&self) -> WorkerKind {
        self.kind
    }

    fn role(&self) -> &AgentRole {
        &self.role
    }

    async fn invoke(&self, prompt: &str) -> Result<String> {
        let system = self.role.system_prompt();

        let user_prompt = match self.gather_snippets(prompt).await {
            Some(snippets) => format!(
                "{}\n\nWeb search snippets (provider-ranked):\n{}",
                prompt, snippets
            ),
            None => prompt.to_string(),
        };

        let completion = self.client.complete(&system, &user_prompt).await?;

        info!(
            worker = %self.kind,
            tokens = completion.usage.total(),
            "worker stage completed"
        );

        Ok(completion.text)
    }
}
