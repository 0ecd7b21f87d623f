use clap::Parser;
use std::{env, path::PathBuf};
use tracing::{info, Level};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use error_common::{log_error, NurseOsError, Result};
use nurseos_server::{create_app, NurseOsServer, ServerConfig};

/// NurseOS Events/Handover HTTP Server
#[derive(Parser, Debug)]
#[command(name = "nurseos-server")]
#[command(about = "Audit trail API for nurse shift handover")]
struct Args {
    /// Server bind address (overrides the config file)
    #[arg(long)]
    host: Option<String>,

    /// Server port (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Configuration file path
    #[arg(short, long, default_value = "nurseos-server.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit structured JSON logs
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing(args.verbose, args.json_logs);

    let mut config = ServerConfig::load(Some(&args.config))?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting NurseOS events server");

    let server = NurseOsServer::new(config)
        .await
        .inspect_err(|e| log_error("Failed to initialize server", e))?;
    let settings = server.get_config().server.clone();
    let app = create_app(server);

    let listener = tokio::net::TcpListener::bind((settings.host.as_str(), settings.port))
        .await
        .map_err(|e| {
            NurseOsError::NetworkError(format!(
                "Failed to bind to {}:{}: {}",
                settings.host, settings.port, e
            ))
        })?;

    info!(
        address = %format!("http://{}:{}", settings.host, settings.port),
        "NurseOS events server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| NurseOsError::ServerError(format!("HTTP server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

fn init_tracing(verbose: bool, json_logs: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let production = env::var("NURSEOS_ENV").is_ok_and(|value| value == "production");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "nurseos_server={level},audit_engine={level},database_layer={level},tower_http=info,sqlx=warn"
        )
        .into()
    });

    if json_logs || production {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .json(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_level(true),
            )
            .init();
    }
}
