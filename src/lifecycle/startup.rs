//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the backend channel from configuration
//! - Bind the API listener
//!
//! Any error here is fatal to the process.

use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::backend::{Backend, GrpcTransport};
use crate::config::GatewayConfig;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid backend endpoint: {0}")]
    Backend(#[from] tonic::transport::Error),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Backend adapter over a lazily connected gRPC channel.
pub fn connect_backend(config: &GatewayConfig) -> Result<Backend, StartupError> {
    let transport = GrpcTransport::connect_lazy(
        &config.backend.hostname,
        config.backend.port,
        config.backend.connect_timeout(),
        config.backend.request_timeout(),
    )?;

    tracing::info!(
        host = %config.backend.hostname,
        port = config.backend.port,
        "Backend channel configured"
    );
    Ok(Backend::new(Arc::new(transport)))
}

/// Bind the API listener.
pub async fn bind_listener(config: &GatewayConfig) -> Result<TcpListener, StartupError> {
    let address = config.api.bind_address();
    TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })
}
