//! riak-exporter
//!
//! Polls a Riak node's HTTP API (`/ping`, `/stats`) on every scrape and
//! re-exposes the numeric stats in Prometheus text format.

use riak_exporter_core::error::{ExporterError, Result};
use tracing_subscriber::{fmt, EnvFilter};

use riak_exporter::cli::Command;
use riak_exporter::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = match Command::parse(&args) {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::ShowHelp) => {
            print!("{}", Command::help());
            return;
        }
        Ok(Command::ShowVersion) => {
            println!("riak-exporter {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Err(e) => {
            eprintln!("{e}\n\n{}", Command::help());
            std::process::exit(1);
        }
    };

    if let Err(e) = run(opts).await {
        tracing::error!(kind = e.kind().as_str(), error = %e, "riak-exporter terminated");
        std::process::exit(1);
    }
}

async fn run(opts: riak_exporter::cli::CliOptions) -> Result<()> {
    let cfg = config::resolve(&opts)?;
    let listen = cfg.web.socket_addr()?;

    tracing::info!(
        %listen,
        telemetry_path = %cfg.web.telemetry_path,
        riak_uri = %cfg.riak.uri,
        version = env!("CARGO_PKG_VERSION"),
        "riak-exporter starting"
    );

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| ExporterError::Bind(format!("{listen}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ExporterError::Internal(format!("server failed: {e}")))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
