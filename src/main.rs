// =============================================================================
// Librarion Book Recommendation Browser - Main Entry Point
// =============================================================================
//
// Project: Librarion - High Performance Book Recommendation Browser
// Author: arkSong (arksong2018@gmail.com)
// License: Apache 2.0 / MIT
//
// Description:
//   Main entry point for the Librarion server: a browsing interface over
//   precomputed book-recommendation artifacts. The similarity matrix,
//   book metadata and popularity ranking are produced offline; this
//   process loads them once at startup and serves the two-tab interface.
//
// Architecture:
//   • Tokio runtime with Axum web framework
//   • Read-only artifacts shared across sessions, no locking on reads
//   • Per-session browsing state behind an in-memory session store
//   • Structured logging with tracing
//   • Configuration via TOML + environment variables
//
// Runtime Requirements:
//   • Artifact directory containing books.json, similarity.json and
//     top_books.json (see --config / LIBRARION_CONFIG)
//
// =============================================================================

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use librarion_api::{create_router, AppState};
use librarion_catalog::artifacts::load_catalog;
use librarion_core::Config;
use librarion_recommend::{load_matrix, Recommender};
use librarion_session::SessionManager;

mod clap;

#[tokio::main]
async fn main() {
    let start_time = Instant::now();

    // Parse CLI arguments
    let args = clap::parse();

    // Determine config file path; absent means defaults + environment.
    let config_path = args
        .config
        .clone()
        .or_else(|| std::env::var("LIBRARION_CONFIG").ok().map(PathBuf::from));

    // Initialize config
    let mut config = match Config::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("It looks like your config is invalid. The following error occurred: {e}");
            std::process::exit(1);
        }
    };

    if let Some(log_level) = &args.log_level {
        config.log = log_level.clone();
    }
    if args.verbose {
        config.log = "debug".to_owned();
    }

    let filter = EnvFilter::try_new(&config.log).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🚀 Starting Librarion v{}", clap::version());

    match args.command {
        clap::Commands::Start { address, port } => {
            // Override config with CLI arguments if provided
            if let Some(address_str) = address {
                match address_str.parse() {
                    Ok(addr) => {
                        config.address = addr;
                        info!("📡 Address override from CLI: {}", config.address);
                    }
                    Err(_) => {
                        error!("❌ Invalid address format: {}", address_str);
                        std::process::exit(1);
                    }
                }
            }

            if let Some(port_val) = port {
                config.port = port_val;
                info!("🔌 Port override from CLI: {}", config.port);
            }

            if let Err(e) = run_server(config, start_time).await {
                error!("❌ Server failed: {e}");
                std::process::exit(1);
            }
        }
    }
}

async fn run_server(
    config: Config,
    start_time: Instant,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "📁 Loading artifacts from {}",
        config.artifact_dir.display()
    );

    let catalog = load_catalog(&config)?;
    let matrix = load_matrix(&config)?;
    let state = AppState::new(
        catalog,
        Recommender::new(matrix),
        SessionManager::new(Duration::from_secs(config.session_idle_timeout_s)),
    )?;

    state
        .sessions
        .start_sweep_task(Duration::from_secs(config.session_sweep_interval_s));

    let app = create_router(state);
    let addr = SocketAddr::new(config.address, config.port);
    let listener = TcpListener::bind(addr).await?;

    info!("✅ Startup completed in {:?}", start_time.elapsed());
    info!("📡 Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Librarion shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
