pub mod aggregate;
pub mod backend;
pub mod config;
pub mod context;
pub mod error;
pub mod fragment;
pub mod gateway_state;
pub mod io_struct;
pub mod logging;
pub mod relay;
pub mod server;
pub mod weather;

use anyhow::Context;
use config::GatewayConfig;
use gateway_state::GatewayState;
use server::startup;
use tokio::signal;

pub struct Gateway {
    config: GatewayConfig,
}

impl Gateway {
    pub fn new(config: GatewayConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Gateway { config })
    }

    /// Run the HTTP server until it fails or Ctrl+C is received.
    pub fn start(&self) -> anyhow::Result<()> {
        logging::init_logging(self.config.log_level);

        let state = GatewayState::new(&self.config).context("Failed to build gateway")?;
        let config = self.config.clone();

        actix_web::rt::System::new().block_on(async move {
            tokio::select! {
                res = startup(config, state) => {
                    res.map_err(anyhow::Error::from)
                }
                _ = signal::ctrl_c() => {
                    log::info!("Received Ctrl+C, shutting down");
                    Ok(())
                }
            }
        })
    }
}
