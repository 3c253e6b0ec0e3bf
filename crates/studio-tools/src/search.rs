//! Web search via the DuckDuckGo Instant Answer API

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use studio_core::{Error, Result, SearchProvider};

const DEFAULT_BASE_URL: &str = "https://api.duckduckgo.com";

/// Search provider backed by DuckDuckGo's Instant Answer API
///
/// No authentication. Returns snippet bodies joined with newlines, in
/// provider-ranked order; an empty provider result yields an empty
/// string. Transport and decode failures surface as
/// `Error::SearchUnavailable`, which the researcher worker absorbs.
pub struct DuckDuckGoSearch {
    client: Client,
    base_url: String,
}

/// Instant Answer API response
#[derive(Debug, Deserialize)]
struct InstantAnswerResponse {
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<RelatedTopic>,
}

#[derive(Debug, Deserialize)]
struct RelatedTopic {
    #[serde(rename = "Text")]
    text: Option<String>,
    /// Category groupings nest their topics one level deeper.
    #[serde(rename = "Topics", default)]
    topics: Vec<RelatedTopic>,
}

impl DuckDuckGoSearch {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point at a different endpoint (for testing).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn collect_snippets(response: InstantAnswerResponse, max_results: usize) -> Vec<String> {
        let mut snippets = Vec::new();

        if !response.abstract_text.is_empty() {
            snippets.push(response.abstract_text);
        }

        let mut stack: Vec<RelatedTopic> = response.related_topics;
        stack.reverse();
        while let Some(topic) = stack.pop() {
            if snippets.len() >= max_results {
                break;
            }
            if let Some(text) = topic.text {
                if !text.is_empty() {
                    snippets.push(text);
                }
            }
            for nested in topic.topics.into_iter().rev() {
                stack.push(nested);
            }
        }

        snippets.truncate(max_results);
        snippets
    }
}

impl Default for DuckDuckGoSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<String> {
        let url = format!(
            "{}/?q={}&format=json&no_html=1&skip_disambig=1",
            self.base_url,
            urlencoding::encode(query)
        );

        debug!(query = %query, max_results, "querying DuckDuckGo");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::SearchUnavailable(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::SearchUnavailable(format!(
                "provider returned {}",
                response.status()
            )));
        }

        let parsed: InstantAnswerResponse = response
            .json()
            .await
            .map_err(|e| Error::SearchUnavailable(format!("failed to parse response: {}", e)))?;

        let snippets = Self::collect_snippets(parsed, max_results);
        debug!(count = snippets.len(), "search snippets collected");

        Ok(snippets.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> InstantAnswerResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_abstract_comes_first() {
        let response = parse(
            r#"{
                "AbstractText": "Rust is a systems programming language.",
                "RelatedTopics": [
                    {"Text": "Rust (video game) - survival game."},
                    {"Text": "Rust Belt - region of the United States."}
                ]
            }"#,
        );

        let snippets = DuckDuckGoSearch::collect_snippets(response, 5);
        assert_eq!(snippets.len(), 3);
        assert_eq!(snippets[0], "Rust is a systems programming language.");
    }

    #[test]
    fn test_max_results_truncates() {
        let response = parse(
            r#"{
                "AbstractText": "a",
                "RelatedTopics": [
                    {"Text": "b"}, {"Text": "c"}, {"Text": "d"}
                ]
            }"#,
        );

        let snippets = DuckDuckGoSearch::collect_snippets(response, 2);
        assert_eq!(snippets, vec!["a", "b"]);
    }

    #[test]
    fn test_nested_category_topics_are_flattened() {
        let response = parse(
            r#"{
                "RelatedTopics": [
                    {"Text": "top-level"},
                    {"Topics": [{"Text": "nested-1"}, {"Text": "nested-2"}]}
                ]
            }"#,
        );

        let snippets = DuckDuckGoSearch::collect_snippets(response, 5);
        assert_eq!(snippets, vec!["top-level", "nested-1", "nested-2"]);
    }

    #[test]
    fn test_empty_response_yields_no_snippets() {
        let response = parse(r#"{"AbstractText": "", "RelatedTopics": []}"#);
        let snippets = DuckDuckGoSearch::collect_snippets(response, 5);
        assert!(snippets.is_empty());
        assert_eq!(snippets.join("\n"), "");
    }

    #[tokio::test]
    async fn test_unreachable_provider_signals_unavailable() {
        // Reserved TLD, DNS resolution fails fast.
        let search = DuckDuckGoSearch::new().with_base_url("http://search.invalid");
        let err = search.search("anything", 5).await.unwrap_err();
        assert!(matches!(err, Error::SearchUnavailable(_)));
    }
}
