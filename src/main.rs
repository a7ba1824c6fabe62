//! revio command line.
//!
//! ```text
//! revio --config revio.toml check               validate and summarize config
//! revio --config revio.toml resolve HOST [PATH] resolve one request, print JSON
//! revio --config revio.toml serve               admin API + hot reload until Ctrl+C
//! ```
//!
//! The binary has no host-supplied resolvers, so `kind = "named"` entries in
//! the config are rejected; embed the library to provide them.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use revio::admin::{self, AppState};
use revio::config::{load_config, ConfigWatcher, ProxyConfig};
use revio::lifecycle::signals;
use revio::observability::{logging, metrics};
use revio::routing::ResolverCatalog;
use revio::{Runtime, Shutdown};

#[derive(Parser)]
#[command(name = "revio")]
#[command(about = "Resolver-chain routing engine for reverse proxies", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "revio.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and print a summary
    Check,
    /// Resolve a single hostname and path
    Resolve {
        host: String,
        #[arg(default_value = "/")]
        path: String,
    },
    /// Run the admin API and reload the config on change
    Serve,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    logging::init(&config.observability)?;

    tracing::debug!(path = ?cli.config, "Configuration loaded");

    match cli.command {
        Commands::Check => {
            let runtime = Runtime::start(&config, ResolverCatalog::new())?;
            let summary = serde_json::json!({
                "routes": config.routes.len(),
                "resolvers": runtime
                    .engine()
                    .resolvers()
                    .iter()
                    .map(|e| serde_json::json!({ "name": e.handle.name(), "priority": e.priority }))
                    .collect::<Vec<_>>(),
                "tls_domains": config.tls_domains(),
                "balancing": config.balancing.strategy,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Resolve { host, path } => {
            let runtime = Runtime::start(&config, ResolverCatalog::new())?;
            match runtime.engine().resolve(&host, &path) {
                Some(route) => {
                    println!("{}", serde_json::to_string_pretty(&*route)?);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("no route for {host}{path}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Serve => {
            serve(cli.config, config).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn serve(path: PathBuf, config: ProxyConfig) -> Result<(), Box<dyn Error>> {
    tracing::info!("revio v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let runtime = Arc::new(Runtime::start(&config, ResolverCatalog::new())?);
    let shutdown = Shutdown::new();

    let admin_task = if config.admin.enabled {
        let listener = TcpListener::bind(&config.admin.bind_address).await?;
        let state = AppState::new(runtime.clone(), &config.admin.api_key);
        Some(tokio::spawn(admin::serve(
            listener,
            state,
            shutdown.subscribe(),
        )))
    } else {
        None
    };

    // Dropping the watcher stops it, so keep it alive for the whole run.
    let (watcher, mut updates) = ConfigWatcher::new(&path);
    let _watcher = watcher.run()?;

    let reload_runtime = runtime.clone();
    let mut shutdown_rx = shutdown.subscribe();
    let reload_task = tokio::spawn(async move {
        loop {
            tokio::select! {
                Some(new_config) = updates.recv() => {
                    if let Err(e) = reload_runtime.reload(&new_config) {
                        tracing::error!(error = %e, "Reload rejected, keeping current configuration");
                    }
                }
                _ = shutdown_rx.recv() => break,
            }
        }
    });

    signals::wait_for_shutdown().await;
    shutdown.trigger();

    reload_task.await?;
    if let Some(task) = admin_task {
        task.await??;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
