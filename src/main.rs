mod catalog;
mod config;
mod documents;
mod models;
mod render;
mod resolver;
mod web;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::catalog::Catalog;
use crate::config::SiteConfig;

#[derive(Parser)]
#[command(name = "title-data-docs")]
#[command(about = "Amherst Title Data API documentation site")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the documentation server
    Serve {
        #[command(flatten)]
        config: SiteConfig,
    },
    /// Write the catalog, with document contexts expanded, as JSON
    Export {
        #[arg(short, long, default_value = "data/catalog.json")]
        output: PathBuf,
    },
    /// Validate the catalog and list every route
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("title_data_docs=info,warp=info")),
        )
        .init();

    let cli = Cli::parse();
    let catalog = Catalog::embedded().context("embedded catalog is invalid")?;
    info!(
        sections = catalog.sections().len(),
        endpoints = catalog.endpoint_count(),
        "catalog loaded"
    );

    match cli.command {
        Commands::Serve { config } => {
            web::run_server(config, catalog).await?;
        }
        Commands::Export { output } => {
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            let json = serde_json::to_string_pretty(&catalog.expanded())?;
            std::fs::write(&output, json)
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!("Catalog saved to: {}", output.display());
        }
        Commands::Check => {
            for route in catalog.routes() {
                println!("{route}");
            }
            info!(
                routes = catalog.routes().len(),
                versions = catalog.site().version_history.len(),
                "catalog ok"
            );
        }
    }

    Ok(())
}
