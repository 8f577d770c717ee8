//! todo-gateway binary.
//!
//! Startup order: config → logging → metrics → backend channel → listener.
//! Runs until SIGINT/SIGTERM, then drains for the configured grace period.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use todo_gateway::config::load_config;
use todo_gateway::lifecycle::shutdown::drain;
use todo_gateway::lifecycle::{signals, startup, DrainOutcome, Shutdown};
use todo_gateway::observability::{logging, metrics};
use todo_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "todo-gateway")]
#[command(about = "HTTP gateway for the todo gRPC backend", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. A missing file means defaults.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    logging::init(config.env_mode, &config.observability.log_filter);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        env_mode = %config.env_mode,
        api = %config.api.bind_address(),
        backend = %format!("{}:{}", config.backend.hostname, config.backend.port),
        "todo-gateway starting"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let backend = startup::connect_backend(&config)?;
    let listener = startup::bind_listener(&config).await?;
    let grace = Duration::from_secs(config.timeouts.shutdown_grace_secs);

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, backend);
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        joined = &mut server_task => {
            // The server only returns on its own when serving failed.
            joined??;
            return Ok(());
        }
        _ = signals::shutdown_signal() => {}
    }

    let listeners = shutdown.trigger();
    tracing::info!(listeners, "Shutdown Server ...");

    let outcome = drain(&mut server_task, grace).await;
    match outcome {
        DrainOutcome::Completed(joined) => joined??,
        DrainOutcome::TimedOut => {
            tracing::warn!("Forcing exit with requests still in flight");
            server_task.abort();
        }
    }

    tracing::info!("Server exiting");
    Ok(())
}
