use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, DatabaseConfig};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use api_ingress::{ApiIngress, ApiIngressConfig};
use catalog::{config::CatalogConfig, CatalogModule};
use docstore::{StoreConfig, StoreEngine, StoreHandle};
use modkit::runtime::wait_for_shutdown;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Movie Catalog Server - REST API over movies and genres
#[derive(Parser)]
#[command(name = "catalog-server")]
#[command(about = "Movie Catalog Server - REST API over movies and genres")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Document store URL (overrides config)
    #[arg(long, env = "MONGODB_URL")]
    database_url: Option<String>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use the in-memory store instead of the configured database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        database_url: cli.database_url.clone(),
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Movie Catalog Server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config).await,
    }
}

fn store_config(db: DatabaseConfig) -> StoreConfig {
    StoreConfig {
        url: db.url,
        database: db.name,
        connect_timeout: db.connect_timeout,
        max_pool_size: db.max_pool_size,
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    let catalog_cfg: CatalogConfig = config.module_config("catalog")?;
    let ingress_cfg: ApiIngressConfig = config.module_config("api_ingress")?;

    let store_cfg = store_config(config.database.clone().unwrap_or_default());
    let store = StoreHandle::connect(&store_cfg)
        .await
        .context("failed to connect to the document store")?;

    let timeout = Some(config.server.timeout_sec)
        .filter(|s| *s > 0)
        .map(Duration::from_secs);
    let ingress = ApiIngress::new(ingress_cfg, timeout)
        .with_module(Arc::new(CatalogModule::from_handle(&store, &catalog_cfg)));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    let served = ingress
        .serve(listener, async {
            if let Err(e) = wait_for_shutdown().await {
                tracing::error!(error = %e, "signal handler failed; shutting down");
            }
        })
        .await;

    store
        .close()
        .await
        .context("failed to close the document store")?;
    tracing::info!("Movie Catalog Server stopped");
    served
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let db = config.database.clone().unwrap_or_default();
    let engine = StoreEngine::detect(&db.url).context("invalid database.url")?;
    let _: CatalogConfig = config.module_config("catalog")?;
    let _: ApiIngressConfig = config.module_config("api_ingress")?;

    tracing::info!(%engine, "Configuration is valid");
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);

    Ok(())
}
