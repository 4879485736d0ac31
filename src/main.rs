//! Tiwhanawhana orchestrator service.
//!
//! This is the application entry point. It loads the optional environment
//! file, initializes tracing, reads settings from the environment, sets up
//! the Axum router, and starts the HTTP server.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tiwhanawhana::config::{Settings, DEFAULT_LOG_FILTER};
use tiwhanawhana::http::start_server;
use tiwhanawhana::routes::create_router;
use tiwhanawhana::state::AppState;

/// Tiwhanawhana orchestrator service
#[derive(Parser, Debug)]
#[command(name = "tiwhanawhana", version, about)]
struct Args {
    /// Path to an environment file (without this flag, `.env` is loaded
    /// best-effort)
    #[arg(short, long)]
    env_file: Option<String>,

    /// Log level filter (e.g., "tiwhanawhana=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Load the environment file before anything reads the environment.
    // An explicitly named file must exist; the default `.env` need not.
    match &args.env_file {
        Some(path) => {
            dotenvy::from_filename(path)?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Settings are read once here and passed down explicitly
    let settings = Settings::from_env()?;
    tracing::info!(
        project = %settings.project_name,
        host = %settings.host,
        port = settings.port,
        debug = settings.debug,
        "Loaded settings"
    );

    // Create application state and router
    let state = AppState::new(settings.clone());
    let app = create_router(state);

    // Start server
    start_server(app, &settings).await?;

    Ok(())
}
