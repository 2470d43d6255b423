/// Default Ollama chat endpoint.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:11434/api/chat";
pub const DEFAULT_MODEL: &str = "llama3.2";
pub const DEFAULT_LOCATION: &str = "Lisbon";
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 4 * 1024 * 1024;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Full URL of the chat endpoint, e.g. `http://localhost:11434/api/chat`.
    pub backend_url: String,
    pub model: String,
    /// Named location the RAG context claims the local clock is in.
    pub location: String,
    /// `None` keeps the HTTP client's default (no overall timeout).
    pub request_timeout_secs: Option<u64>,
    pub max_payload_size: usize,
    pub log_level: log::LevelFilter,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            request_timeout_secs: None,
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
            log_level: log::LevelFilter::Info,
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(invalid("port", "0", "must be non-zero"));
        }
        if self.model.trim().is_empty() {
            return Err(invalid("model", &self.model, "must not be empty"));
        }
        if !(self.backend_url.starts_with("http://") || self.backend_url.starts_with("https://")) {
            return Err(invalid(
                "backend_url",
                &self.backend_url,
                "must start with http:// or https://",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
