use crate::aggregate::aggregate_body;
use crate::backend::BackendClient;
use crate::config::GatewayConfig;
use crate::context::{Clock, LocalClock, RAG_INSTRUCTION, build_prompt, time_context};
use crate::error::GatewayError;
use crate::io_struct::{AGENT_OLLAMA, AGENT_OLLAMA_RAG, ResponseEnvelope};
use crate::relay::relay_backend_body;
use actix_web::HttpResponse;
use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use std::sync::Arc;

pub const JSONL_CONTENT_TYPE: &str = "application/jsonl";

/// Shared by all workers. Holds no per-request data: each request gets its own
/// backend response and buffers.
#[derive(Debug, Clone)]
pub struct GatewayState {
    pub backend: BackendClient,
    pub clock: Arc<dyn Clock>,
    pub location: String,
}

impl GatewayState {
    pub fn new(config: &GatewayConfig) -> anyhow::Result<Self> {
        let backend = BackendClient::new(config)?;
        Ok(Self::with_backend(
            backend,
            Arc::new(LocalClock),
            &config.location,
        ))
    }

    pub fn with_backend(backend: BackendClient, clock: Arc<dyn Clock>, location: &str) -> Self {
        GatewayState {
            backend,
            clock,
            location: location.to_string(),
        }
    }

    /// Send `prompt` and return either the aggregated answer or the backend
    /// error text. Never fails.
    async fn complete(&self, prompt: &str) -> String {
        match self.backend.send_buffered(prompt).await {
            Ok(body) => aggregate_body(&body),
            Err(e) => {
                log::warn!("Chat request failed: {}", e);
                e.to_string()
            }
        }
    }

    pub async fn buffered_chat(&self, prompt: String) -> ResponseEnvelope {
        let output = self.complete(&prompt).await;
        ResponseEnvelope::new(AGENT_OLLAMA, prompt, output)
    }

    pub async fn rag_chat(&self, prompt: String) -> ResponseEnvelope {
        let context = time_context(self.clock.now(), &self.location);
        let augmented = build_prompt(&prompt, &context, RAG_INSTRUCTION);
        let output = self.complete(&augmented).await;
        ResponseEnvelope::new(AGENT_OLLAMA_RAG, prompt, output).with_context(context)
    }

    /// Re-stream the backend's JSONL body. Headers disabling caching and proxy
    /// buffering are set before any line is written.
    pub async fn stream_chat(&self, prompt: String) -> Result<HttpResponse, GatewayError> {
        let body = self.backend.send_streaming(&prompt).await.map_err(|e| {
            log::warn!("Streaming chat request failed: {}", e);
            e
        })?;
        Ok(HttpResponse::Ok()
            .insert_header((CONTENT_TYPE, JSONL_CONTENT_TYPE))
            .insert_header((CACHE_CONTROL, "no-cache"))
            .insert_header(("X-Accel-Buffering", "no"))
            .streaming(relay_backend_body(
                body,
                self.backend.url().to_string(),
            )))
    }
}
