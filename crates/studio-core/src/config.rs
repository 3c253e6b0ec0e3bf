//! Configuration management
//!
//! Settings are resolved in the following priority order:
//! 1. Environment variables
//! 2. agent-studio.toml configuration file
//! 3. Default values
//!
//! Inside a configuration file, `${VAR_NAME}` is expanded from the
//! environment.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// LLM provider type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI-compatible chat completions API
    #[default]
    OpenAi,
    /// Anthropic Claude messages API
    Claude,
}

/// LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key for the completion service. May be empty; an empty key
    /// blocks runs with a missing-credential error before any network
    /// call is attempted.
    #[serde(default)]
    pub api_key: String,

    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// API provider
    #[serde(default)]
    pub provider: LlmProvider,

    /// Base URL (optional, for custom endpoints)
    pub base_url: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            provider: LlmProvider::OpenAi,
            base_url: None,
        }
    }
}

impl LlmConfig {
    /// Whether a non-empty API key is configured.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

/// Web UI server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// Server host
    #[serde(default = "default_web_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_web_port")]
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
        }
    }
}

fn default_web_host() -> String {
    "127.0.0.1".to_string()
}

fn default_web_port() -> u16 {
    3000
}

/// Search capability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of snippets requested per search
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

fn default_max_results() -> usize {
    5
}

/// Main configuration for agent-studio
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Web UI configuration
    #[serde(default)]
    pub web: WebConfig,

    /// Search capability configuration
    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// Load configuration from environment variables only.
    ///
    /// A missing API key is not an error here; the run path reports
    /// `Error::MissingCredential` before any network call instead, so the
    /// UI can start and display the credential status.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration from a TOML file, expanding `${VAR_NAME}`
    /// references, then apply environment overrides on top.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Config(format!("failed to read config file: {}", e)))?;

        let expanded = Self::expand_env_vars(&content);

        let mut config: Config = toml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("failed to parse TOML: {}", e)))?;

        config.apply_env_overrides();
        Ok(config)
    }

    /// Expand `${VAR_NAME}` references from the environment.
    ///
    /// Unset variables expand to the empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next(); // consume '{'

                let mut var_name = String::new();
                while let Some(&c) = chars.peek() {
                    if c == '}' {
                        chars.next(); // consume '}'
                        break;
                    }
                    var_name.push(chars.next().unwrap());
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Overwrite with existing environment variables (env wins).
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                self.llm.api_key = key;
            }
        }
        if let Ok(key) = std::env::var("LLM_API_KEY") {
            if !key.is_empty() {
                self.llm.api_key = key;
            }
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            if !model.is_empty() {
                self.llm.model = model;
            }
        }
        if let Ok(provider) = std::env::var("LLM_PROVIDER") {
            match provider.to_lowercase().as_str() {
                "openai" => self.llm.provider = LlmProvider::OpenAi,
                "claude" => self.llm.provider = LlmProvider::Claude,
                _ => {}
            }
        }
        if let Ok(url) = std::env::var("LLM_BASE_URL") {
            if !url.is_empty() {
                self.llm.base_url = Some(url);
            }
        }
        if let Ok(host) = std::env::var("WEB_HOST") {
            if !host.is_empty() {
                self.web.host = host;
            }
        }
        if let Ok(port) = std::env::var("WEB_PORT") {
            if let Ok(port) = port.parse() {
                self.web.port = port;
            }
        }
        if let Ok(max) = std::env::var("SEARCH_MAX_RESULTS") {
            if let Ok(max) = max.parse() {
                self.search.max_results = max;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.llm.provider, LlmProvider::OpenAi);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.web.port, 3000);
        assert_eq!(config.search.max_results, 5);
        assert!(!config.llm.has_api_key());
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test-local variable name, no concurrent reader cares.
        unsafe { std::env::set_var("STUDIO_TEST_EXPAND", "sk-test") };
        let expanded = Config::expand_env_vars("api_key = \"${STUDIO_TEST_EXPAND}\"");
        assert_eq!(expanded, "api_key = \"sk-test\"");

        let missing = Config::expand_env_vars("key = \"${STUDIO_TEST_UNSET_VAR}\"");
        assert_eq!(missing, "key = \"\"");
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[llm]
api_key = "sk-from-file"
model = "gpt-4o"
provider = "openai"

[web]
port = 8080
"#
        )
        .unwrap();

        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.web.port, 8080);
        assert!(config.llm.has_api_key());
        // search section omitted, defaults apply
        assert_eq!(config.search.max_results, 5);
    }

    #[test]
    fn test_provider_parse() {
        let config: Config = toml::from_str("[llm]\nprovider = \"claude\"\n").unwrap();
        assert_eq!(config.llm.provider, LlmProvider::Claude);
    }
}
