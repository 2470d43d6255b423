use serde::{Deserialize, Serialize};

pub const MCP_VERSION: &str = "1.0";
pub const AGENT_OLLAMA: &str = "ollama";
pub const AGENT_OLLAMA_RAG: &str = "ollama-rag";

/// Inbound body shared by all gateway endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PromptInput {
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Outbound body for the backend's chat endpoint. Always a single user turn.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn single_turn(model: &str, prompt: impl Into<String>) -> Self {
        ChatRequest {
            model: model.to_string(),
            messages: vec![ChatMessage::user(prompt)],
        }
    }
}

/// Partial message carried by one JSONL line of a chat response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MessageFragment {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// One JSONL line as emitted by the backend. Fields other than `message`
/// (model, created_at, done, eval counts...) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponseLine {
    #[serde(default)]
    pub message: Option<MessageFragment>,
}

/// Normalized response wrapper returned by the buffered endpoints.
///
/// `output` is always populated: it holds either the aggregated answer or a
/// human readable backend error.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResponseEnvelope {
    pub mcp_version: String,
    pub agent: String,
    pub input: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub output: String,
}

impl ResponseEnvelope {
    pub fn new(agent: &str, input: impl Into<String>, output: impl Into<String>) -> Self {
        ResponseEnvelope {
            mcp_version: MCP_VERSION.to_string(),
            agent: agent.to_string(),
            input: input.into(),
            context: None,
            output: output.into(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}
