use clap::Parser;
use ollama_mcp_gateway::Gateway;
use ollama_mcp_gateway::config::{
    DEFAULT_BACKEND_URL, DEFAULT_LOCATION, DEFAULT_MAX_PAYLOAD_SIZE, DEFAULT_MODEL, GatewayConfig,
};

/// HTTP gateway in front of a local Ollama chat endpoint.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[arg(long, env = "OLLAMA_GATEWAY_HOST", default_value = "127.0.0.1")]
    host: String,

    #[arg(long, env = "OLLAMA_GATEWAY_PORT", default_value_t = 5000)]
    port: u16,

    /// Chat endpoint of the backend.
    #[arg(long, env = "OLLAMA_GATEWAY_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,

    #[arg(long, env = "OLLAMA_GATEWAY_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Location named in the RAG time context.
    #[arg(long, env = "OLLAMA_GATEWAY_LOCATION", default_value = DEFAULT_LOCATION)]
    location: String,

    /// Overall backend request timeout. Unset means no timeout.
    #[arg(long, env = "OLLAMA_GATEWAY_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[arg(long, env = "OLLAMA_GATEWAY_MAX_PAYLOAD", default_value_t = DEFAULT_MAX_PAYLOAD_SIZE)]
    max_payload_size: usize,

    #[arg(long, env = "OLLAMA_GATEWAY_LOG_LEVEL", default_value = "info")]
    log_level: log::LevelFilter,
}

impl From<Cli> for GatewayConfig {
    fn from(cli: Cli) -> Self {
        GatewayConfig {
            host: cli.host,
            port: cli.port,
            backend_url: cli.backend_url,
            model: cli.model,
            location: cli.location,
            request_timeout_secs: cli.timeout_secs,
            max_payload_size: cli.max_payload_size,
            log_level: cli.log_level,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let gateway = Gateway::new(Cli::parse().into())?;
    gateway.start()
}
