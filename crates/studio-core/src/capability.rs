//! Search capability seam
//!
//! The search capability is passed into workers as an explicit
//! dependency so it can be substituted with a test double.

use async_trait::async_trait;

use crate::Result;

/// Web search capability
///
/// Returns at most `max_results` snippet bodies joined with newlines, in
/// provider-ranked order. An empty result set is an empty string, not an
/// error; provider failures surface as `Error::SearchUnavailable` and are
/// absorbed by the calling worker.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<String>;
}
