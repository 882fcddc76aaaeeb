//! Purchase graph CLI commands.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use shop_core::purchase;
use shop_graph::{GraphClient, GraphConfig};

use crate::config::AppConfig;

/// How long to wait for Neo4j to answer the connection ping.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Subcommand)]
pub enum GraphCommands {
    /// Create uniqueness constraints for Customer, Order and Product
    Init,

    /// Record a customer -> order -> product purchase
    Record {
        /// Customer name
        customer: String,
        /// Order ID
        order: String,
        /// Product name
        product: String,
    },

    /// List recorded purchases
    List,

    /// Show node and relationship counts
    Status,
}

pub async fn execute(cmd: GraphCommands, config: &AppConfig) -> Result<()> {
    let client = connect(&config.graph).await?;

    match cmd {
        GraphCommands::Init => cmd_init(&client).await,
        GraphCommands::Record { customer, order, product } => {
            cmd_record(&client, &customer, &order, &product).await
        }
        GraphCommands::List => cmd_list(&client).await,
        GraphCommands::Status => cmd_status(&client).await,
    }
}

/// Connect to Neo4j, failing after [`CONNECT_TIMEOUT`].
pub async fn connect(config: &GraphConfig) -> Result<GraphClient> {
    tokio::time::timeout(CONNECT_TIMEOUT, GraphClient::connect(config))
        .await
        .with_context(|| format!("Timed out connecting to Neo4j at {}", config.uri))?
}

async fn cmd_init(client: &GraphClient) -> Result<()> {
    shop_graph::initialize_schema(client).await?;
    println!("{}", "Graph schema initialized.".green());
    Ok(())
}

async fn cmd_record(client: &GraphClient, customer: &str, order: &str, product: &str) -> Result<()> {
    let recorded = purchase::record(client, customer, order, product).await?;

    println!(
        "{} {} {} {} {} {}",
        "Recorded".green().bold(),
        recorded.customer.cyan(),
        "-[PLACED]->".dimmed(),
        recorded.order.yellow(),
        "-[CONTAINS]->".dimmed(),
        recorded.product.magenta()
    );
    Ok(())
}

async fn cmd_list(client: &GraphClient) -> Result<()> {
    let purchases = purchase::list(client).await?;

    if purchases.is_empty() {
        println!("{}", "No purchases recorded.".dimmed());
        return Ok(());
    }

    for p in &purchases {
        println!(
            "  {} {} {} (Order ID: {})",
            p.customer.cyan(),
            "→".dimmed(),
            p.product.magenta(),
            p.order.yellow()
        );
    }
    println!("\n{} purchases.", purchases.len().to_string().bold());
    Ok(())
}

async fn cmd_status(client: &GraphClient) -> Result<()> {
    let counts = purchase::counts(client).await?;

    println!("{}", "Purchase Graph Status".bold());
    println!("{}", "─".repeat(40));
    println!("  Customers:     {}", counts.customers.to_string().cyan());
    println!("  Orders:        {}", counts.orders.to_string().cyan());
    println!("  Products:      {}", counts.products.to_string().cyan());
    println!("  PLACED:        {}", counts.placed.to_string().cyan());
    println!("  CONTAINS:      {}", counts.contains.to_string().cyan());
    println!("{}", "─".repeat(40));
    println!(
        "  Nodes: {}  Relationships: {}",
        counts.nodes().to_string().bold(),
        counts.relationships().to_string().bold()
    );
    Ok(())
}
