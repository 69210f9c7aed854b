mod cli;
mod commands;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use devlog_config::Config;
use devlog_mask::MappingRegistry;
use devlog_storage::Storage;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::load()?,
    };

    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let db_path = cli.db.clone().or_else(|| config.database.path.clone());
    let storage = Arc::new(Storage::new(db_path).await?);
    let registry = Arc::new(MappingRegistry::new(
        storage.clone(),
        config.registry.ttl(),
    ));

    match cli.command {
        cli::Commands::Mask {
            file,
            authenticated,
            list,
        } => commands::mask::handle(&file, authenticated, list, registry).await,
        cli::Commands::Repo(cmd) => commands::repo::handle(cmd, &storage).await,
        cli::Commands::Mapping(cmd) => commands::mapping::handle(cmd, storage, registry).await,
    }
}
