pub mod mock_backend;

use chrono::{NaiveDate, NaiveDateTime};
use ollama_mcp_gateway::backend::BackendClient;
use ollama_mcp_gateway::context::Clock;
use ollama_mcp_gateway::gateway_state::GatewayState;
use std::sync::Arc;

#[derive(Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(14, 30, 5)
        .unwrap()
}

pub fn test_state(backend_url: &str) -> GatewayState {
    let backend = BackendClient::with_client(reqwest::Client::new(), backend_url, "llama3.2");
    GatewayState::with_backend(backend, Arc::new(FixedClock(fixed_time())), "Lisbon")
}
