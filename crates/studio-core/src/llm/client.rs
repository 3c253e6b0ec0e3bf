//! Completion service HTTP client
//!
//! Supports OpenAI-compatible APIs and the Claude API.

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::{Config, LlmProvider};
use crate::error::{Error, Result};

use super::types::*;

const DEFAULT_MAX_TOKENS: u64 = 4096;

/// One completed single-turn exchange
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub usage: TokenUsage,
}

/// Completion service client
#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    provider: LlmProvider,
}

impl CompletionClient {
    /// Create a new completion client
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(Error::Http)?;

        let base_url = match &config.llm.base_url {
            Some(url) => url.clone(),
            None => match config.llm.provider {
                LlmProvider::OpenAi => "https://api.openai.com/v1".to_string(),
                LlmProvider::Claude => "https://api.anthropic.com/v1".to_string(),
            },
        };

        Ok(Self {
            client,
            api_key: config.llm.api_key.clone(),
            model: config.llm.model.clone(),
            base_url,
            provider: config.llm.provider.clone(),
        })
    }

    /// Create with custom base URL (for testing or custom endpoints)
    pub fn with_base_url(config: &Config, base_url: impl Into<String>) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.base_url = base_url.into();
        Ok(client)
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the provider type
    pub fn provider(&self) -> &LlmProvider {
        &self.provider
    }

    /// Whether a non-empty API key is configured
    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Run one single-turn completion: system prompt + user prompt in,
    /// text out.
    ///
    /// Fails with `Error::MissingCredential` before any request is built
    /// when no API key is configured.
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<Completion> {
        if !self.has_credential() {
            return Err(Error::MissingCredential);
        }

        match self.provider {
            LlmProvider::OpenAi => self.complete_openai(system, prompt).await,
            LlmProvider::Claude => self.complete_claude(system, prompt).await,
        }
    }

    async fn complete_openai(&self, system: &str, prompt: &str) -> Result<Completion> {
        let url = format!("{}/chat/completions", self.base_url);

        debug!("Sending request to OpenAI-compatible API: {}", url);

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::system(system), Message::user(prompt)],
            max_tokens: Some(DEFAULT_MAX_TOKENS),
            temperature: None,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Http)?;

        if !status.is_success() {
            warn!("Completion API error: {} - {}", status, body);
            return Err(Error::Completion(format!("{}: {}", status, body)));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Completion(format!("failed to parse response: {} - {}", e, body)))?;

        let usage = parsed.token_usage();
        info!(
            "Completion response: {} in / {} out tokens",
            usage.input_tokens, usage.output_tokens
        );

        Ok(Completion {
            text: parsed.text(),
            usage,
        })
    }

    async fn complete_claude(&self, system: &str, prompt: &str) -> Result<Completion> {
        let url = format!("{}/messages", self.base_url);

        debug!("Sending request to Claude API: {}", url);

        let request = ClaudeMessagesRequest::from_messages(
            self.model.clone(),
            vec![Message::system(system), Message::user(prompt)],
            DEFAULT_MAX_TOKENS,
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Http)?;

        if !status.is_success() {
            warn!("Claude API error: {} - {}", status, body);
            return Err(Error::Completion(format!("{}: {}", status, body)));
        }

        let parsed: ClaudeMessagesResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Completion(format!("failed to parse response: {} - {}", e, body)))?;

        let usage = parsed.token_usage();
        info!(
            "Completion response: {} in / {} out tokens",
            usage.input_tokens, usage.output_tokens
        );

        Ok(Completion {
            text: parsed.text(),
            usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: &str) -> Config {
        let mut config = Config::default();
        config.llm.api_key = key.to_string();
        config
    }

    #[test]
    fn test_default_base_url_by_provider() {
        let config = config_with_key("sk-test");
        let client = CompletionClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://api.openai.com/v1");

        let mut claude = config_with_key("sk-test");
        claude.llm.provider = LlmProvider::Claude;
        let client = CompletionClient::new(&claude).unwrap();
        assert_eq!(client.base_url, "https://api.anthropic.com/v1");
    }

    #[test]
    fn test_with_base_url() {
        let config = config_with_key("sk-test");
        let client = CompletionClient::with_base_url(&config, "http://localhost:9999/v1").unwrap();
        assert_eq!(client.base_url, "http://localhost:9999/v1");
    }

    #[tokio::test]
    async fn test_missing_credential_blocks_before_network() {
        // Unroutable base URL: if the key check did not short-circuit,
        // this would fail with a connection error instead.
        let config = config_with_key("   ");
        let client =
            CompletionClient::with_base_url(&config, "http://192.0.2.1:1/v1").unwrap();

        let err = client.complete("system", "prompt").await.unwrap_err();
        assert!(matches!(err, Error::MissingCredential));
    }
}
