//! Web server command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use shop_core::media::LocalImageStore;
use shop_db::SqliteCustomerAccounts;
use shop_redis::{RedisProductCatalog, RedisSessionStore};
use shop_web::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Keep all data in memory instead of SQLite, Redis and Neo4j
    #[arg(long)]
    pub ephemeral: bool,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (default: logs/shop.log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, config: AppConfig) -> Result<()> {
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let images = LocalImageStore::new(&config.media.dir, &config.media.base_url);

    let state = if args.ephemeral {
        info!("Using in-memory stores");
        AppState::in_memory().with_local_images(images)
    } else {
        open_stores(&config, images).await?
    };

    println!();
    println!("  {} {}", "Shop".cyan().bold(), "API Server".bold());
    println!();
    println!("  {}       http://{}:{}", "API".green(), host, port);
    println!(
        "  {}     http://{}:{}{}",
        "Media".green(),
        host,
        port,
        config.media.base_url
    );
    if args.ephemeral {
        println!("  {}   {}", "Storage".green(), "in-memory".yellow());
    }
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    shop_web::run_server(state, &host, port).await?;

    info!("Store connections released");
    Ok(())
}

/// Open every backing store once. Failure to reach any of them is fatal.
async fn open_stores(config: &AppConfig, images: LocalImageStore) -> Result<AppState> {
    let pool = shop_db::init_pool(&config.database.path).with_context(|| {
        format!("Failed to open customer database {}", config.database.path.display())
    })?;
    info!(path = %config.database.path.display(), "Customer database ready");

    let redis = shop_redis::init_pool(&config.redis.url)
        .await
        .with_context(|| format!("Failed to connect to Redis at {}", config.redis.url))?;
    info!(url = %config.redis.url, "Connected to Redis");

    let graph = super::graph::connect(&config.graph).await?;
    shop_graph::initialize_schema(&graph).await?;

    Ok(AppState::new(
        Arc::new(graph),
        Arc::new(RedisSessionStore::new(redis.clone())),
        Arc::new(RedisProductCatalog::new(redis)),
        Arc::new(SqliteCustomerAccounts::new(pool)),
        images,
    ))
}
