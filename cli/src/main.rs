//! CLI entrypoint for sentiment-console
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::Result;
use clap::Parser;
use sentiment_application::{RemoteActorClient, spawn_session};
use sentiment_infrastructure::{ConfigLoader, HttpRemoteActor, OfflineRemoteActor};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod console;

#[derive(Parser, Debug)]
#[command(
    name = "sentiment-console",
    about = "Interactive console for a sentiment-analysis session",
    version
)]
struct Cli {
    /// Path to a config file (highest priority)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Skip config files and use built-in defaults
    #[arg(long)]
    no_config: bool,

    /// Base URL of the remote actor (overrides config)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Use the in-process offline actor instead of an HTTP backend
    #[arg(long)]
    offline: bool,

    /// Increase log verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting sentiment-console");

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    // CLI flags override file configuration
    if let Some(base_url) = cli.base_url {
        config.remote.base_url = base_url;
    }
    if cli.offline {
        config.console.offline = true;
    }
    config.validate()?;

    // === Dependency Injection ===
    // Create the remote actor adapter and hand it to the session runtime
    let client: Arc<dyn RemoteActorClient> = if config.console.offline {
        info!("Using the offline in-process actor");
        Arc::new(OfflineRemoteActor::new())
    } else {
        info!("Using the HTTP actor at {}", config.remote.base_url);
        Arc::new(HttpRemoteActor::new(
            &config.remote.base_url,
            config.request_timeout(),
        )?)
    };

    let (session, snapshots, task) = spawn_session();
    session.actor_ready(client);

    console::run(&session, snapshots, config.console.show_status_lines).await?;

    session.shutdown();
    let _ = task.await;

    Ok(())
}
