//! irclogd - a silent IRC channel logger.
//!
//! Connects to one server, joins the configured channels and writes one
//! append-only log per channel, answering only PING, CTCP queries and
//! password-gated control messages.

mod config;
mod error;
mod network;
mod session;
mod telemetry;

use crate::config::Config;
use crate::network::Endpoint;
use crate::session::sink::{FileSinkOpener, open_meta};
use crate::session::{Session, SessionParams};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "irclogd.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!(
            "{} configuration error(s) in {config_path}",
            errors.len()
        );
    }

    let (host, port) = config.server.endpoint()?;
    info!(
        host = %host,
        port,
        channels = config.channels.len(),
        "Starting irclogd"
    );

    let meta = open_meta(config.logging.meta.as_deref()).map_err(|e| {
        error!(error = %e, "Failed to open session log");
        e
    })?;
    let opener = FileSinkOpener::new(&config.logging.directory);
    let session = Session::new(
        SessionParams::from_config(&config, &host, port),
        meta,
        Box::new(opener),
    );

    let endpoint = Endpoint {
        host,
        port,
        encoding: config.server.encoding.clone(),
    };
    network::run(&endpoint, session).await?;

    info!("Shutdown complete");
    Ok(())
}
