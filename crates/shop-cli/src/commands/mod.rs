//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::AppConfig;

pub mod graph;
pub mod serve;

/// Storefront backend over SQLite, Redis and Neo4j
#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML config file (defaults to ./shop.toml if present)
    #[arg(short, long, global = true, env = "SHOP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(serve::ServeArgs),

    /// Purchase graph commands
    #[command(subcommand)]
    Graph(graph::GraphCommands),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = AppConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Graph(cmd) => graph::execute(cmd, &config).await,
        }
    }
}
