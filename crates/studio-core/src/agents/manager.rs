//! Manager agent
//!
//! Holds the ordered team of workers and dispatches a user query through
//! the fixed pipeline: researcher -> analyst -> writer -> reviewer. Each
//! stage's full output is the next stage's input; the first stage error
//! aborts the run and propagates to the caller. No retries.

use std::sync::Arc;
use tracing::{debug, info};

use super::roles;
use super::types::{Worker, WorkerKind};
use crate::error::{Error, Result};

/// Manager holding the ordered worker team
pub struct Manager {
    /// Workers in pipeline order (insertion order is execution order)
    team: Vec<Arc<dyn Worker>>,
    /// Coordination instructions
    instructions: Vec<String>,
}

impl Manager {
    /// Create a manager over a team; insertion order defines the
    /// pipeline.
    pub fn new(team: Vec<Arc<dyn Worker>>) -> Self {
        Self {
            team,
            instructions: roles::manager_instructions(),
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

    pub fn team(&self) -> &[Arc<dyn Worker>] {
        &self.team
    }

    pub fn instructions(&self) -> &[String] {
        &self.instructions
    }

    /// Role names of the team, in pipeline order.
    pub fn team_names(&self) -> Vec<String> {
        self.team.iter().map(|w| w.role().name.clone()).collect()
    }

    /// Run the full pipeline for one query and return the final refined
    /// text.
    ///
    /// Blank input is rejected with `Error::EmptyQuery` before any
    /// worker is dispatched. A stage failure propagates as-is; the
    /// caller may re-invoke `run` to retry.
    pub async fn run(&self, query: &str) -> Result<String> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::EmptyQuery);
        }

        info!(stages = self.team.len(), "starting pipeline run");

        let mut current = query.to_string();
        for worker in &self.team {
            debug!(stage = %worker.kind(), "dispatching stage");
            current = worker.invoke(&current).await?;
        }

        info!(chars = current.len(), "pipeline run completed");
        Ok(current)
    }
}
