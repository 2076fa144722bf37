//! CLI binary for the qbank search service.

use clap::{Parser, Subcommand};
use qbank::{SearchServer, ServiceConfig, build_service};
use qbank_search::SearchRequest;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// qbank: federated global search for the question bank.
#[derive(Parser)]
#[command(name = "qbank", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Serve `GET /search` and `GET /health` over HTTP.
    Serve,

    /// Run one search and print the JSON response.
    Query {
        /// Free-text query.
        text: String,

        /// Restrict to one result type (e.g. `course`, `system-log`).
        #[arg(short = 't', long = "type")]
        result_type: Option<String>,

        /// Maximum results to return.
        #[arg(short, long)]
        limit: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `query` output stays clean JSON.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("qbank=info,qbank_search=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ServiceConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Serve => serve(config).await,
        Command::Query {
            text,
            result_type,
            limit,
        } => query(config, text, result_type, limit).await,
    }
}

async fn serve(config: ServiceConfig) -> anyhow::Result<()> {
    let service = build_service(&config)?;
    let server = SearchServer::start(service, &config.server).await?;
    info!(port = server.port(), "qbank serving, press Ctrl-C to stop");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("failed to listen for shutdown signal: {e}"))?;

    server.shutdown();
    info!("qbank shut down cleanly");
    Ok(())
}

async fn query(
    config: ServiceConfig,
    text: String,
    result_type: Option<String>,
    limit: Option<i64>,
) -> anyhow::Result<()> {
    let service = build_service(&config)?;
    let request = SearchRequest {
        query: text,
        result_type,
        limit,
    };
    let response = service.search(&request).await.map_err(|e| {
        tracing::error!(error = %e, "query failed");
        anyhow::anyhow!("Search failed: {e}")
    })?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
