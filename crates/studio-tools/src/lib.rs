//! studio-tools: concrete capabilities for worker agents
//!
//! Currently a single capability: web search via the DuckDuckGo Instant
//! Answer API.

pub mod search;

pub use search::DuckDuckGoSearch;

use std::sync::Arc;
use studio_core::SearchProvider;

/// Build the default search capability.
pub fn default_search_provider() -> Arc<dyn SearchProvider> {
    Arc::new(DuckDuckGoSearch::new())
}
