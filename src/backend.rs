use crate::config::GatewayConfig;
use crate::error::BackendError;
use crate::io_struct::ChatRequest;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

/// Issues single-turn chat requests against one backend URL.
///
/// Clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl BackendClient {
    pub fn new(config: &GatewayConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build()?;
        Ok(Self::with_client(client, &config.backend_url, &config.model))
    }

    pub fn with_client(client: reqwest::Client, url: &str, model: &str) -> Self {
        BackendClient {
            client,
            url: url.to_string(),
            model: model.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// POST `prompt` as a one-message conversation.
    ///
    /// A non-success status is returned as [`BackendError::Status`] without
    /// touching the body.
    async fn post(&self, prompt: &str) -> Result<reqwest::Response, BackendError> {
        let request = ChatRequest::single_turn(&self.model, prompt);
        let resp = self.client.post(&self.url).json(&request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }
        Ok(resp)
    }

    /// Buffered mode: the whole body, read into memory.
    pub async fn send_buffered(&self, prompt: &str) -> Result<Bytes, BackendError> {
        let resp = self.post(prompt).await?;
        Ok(resp.bytes().await?)
    }

    /// Streaming mode: the live body, not yet consumed. Dropping it releases
    /// the backend connection.
    pub async fn send_streaming(&self, prompt: &str) -> Result<ByteStream, BackendError> {
        let resp = self.post(prompt).await?;
        Ok(Box::pin(resp.bytes_stream()))
    }
}
