//! `kms-envelope-fn` — function binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Build the KMS crypto client bound to the configured endpoint and
//!    credentials mode.
//! 4. Assemble the [`EnvelopeDecryptor`] and shared state.
//! 5. Build the Axum router and start serving invocations.

mod config;
mod crypto;
mod function;
mod kms;
mod protocol;
mod server;
mod telemetry;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use config::Config;
use function::EnvelopeDecryptor;
use kms::{CredentialsMode, KmsKeyClient};
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_port = cfg.listen_port,
        "kms-envelope-fn starting"
    );

    // -----------------------------------------------------------------------
    // 3. KMS crypto client
    // -----------------------------------------------------------------------
    let mode = CredentialsMode::from_flag(cfg.use_resource_principal);
    info!(
        resource_principal = cfg.use_resource_principal,
        "credentials mode selected"
    );
    let kms = KmsKeyClient::init(
        &cfg.endpoint,
        &mode,
        Duration::from_secs(cfg.kms_timeout_secs),
    )
    .await;

    // -----------------------------------------------------------------------
    // 4. Function state
    // -----------------------------------------------------------------------
    let decryptor = EnvelopeDecryptor::new(cfg.clone(), Arc::new(kms));
    let state = AppState::new(decryptor);

    // -----------------------------------------------------------------------
    // 5. HTTP trigger
    // -----------------------------------------------------------------------
    let router = server::router::build(state);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
