//! Completion API wire types

use serde::{Deserialize, Serialize};

/// Message in a single-turn completion conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    /// Create a system message
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: text.into(),
        }
    }

    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: text.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: text.into(),
        }
    }
}

/// Token usage accumulated over completion calls
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }

    pub fn add(&mut self, other: TokenUsage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }
}

// ============================================================================
// OpenAI chat completions wire format
// ============================================================================

/// Request body for `POST {base_url}/chat/completions`
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
    pub usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
}

impl ChatCompletionResponse {
    /// Extract the response text from all choices.
    pub fn text(&self) -> String {
        self.choices
            .iter()
            .filter_map(|c| c.message.content.clone())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn token_usage(&self) -> TokenUsage {
        self.usage
            .as_ref()
            .map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default()
    }
}

// ============================================================================
// Claude messages wire format
// ============================================================================

/// Request body for `POST {base_url}/messages`
#[derive(Debug, Clone, Serialize)]
pub struct ClaudeMessagesRequest {
    pub model: String,
    pub max_tokens: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<Message>,
}

impl ClaudeMessagesRequest {
    /// Build a Claude request from a chat-style message list.
    ///
    /// Claude takes the system prompt as a top-level field, so any
    /// system-role messages are extracted and joined there.
    pub fn from_messages(model: impl Into<String>, messages: Vec<Message>, max_tokens: u64) -> Self {
        let (system_msgs, rest): (Vec<_>, Vec<_>) =
            messages.into_iter().partition(|m| m.role == "system");

        let system = if system_msgs.is_empty() {
            None
        } else {
            Some(
                system_msgs
                    .into_iter()
                    .map(|m| m.content)
                    .collect::<Vec<_>>()
                    .join("\n"),
            )
        };

        Self {
            model: model.into(),
            max_tokens,
            system,
            messages: rest,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ClaudeMessagesResponse {
    pub content: Vec<ClaudeContentBlock>,
    pub usage: Option<ClaudeUsage>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClaudeContentBlock {
    Text { text: String },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
pub struct ClaudeUsage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
}

impl ClaudeMessagesResponse {
    /// Extract text from all text content blocks.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| {
                if let ClaudeContentBlock::Text { text } = c {
                    Some(text.clone())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn token_usage(&self) -> TokenUsage {
        self.usage
            .as_ref()
            .map(|u| TokenUsage {
                input_tokens: u.input_tokens,
                output_tokens: u.output_tokens,
            })
            .unwrap_or_default()
    }
}
