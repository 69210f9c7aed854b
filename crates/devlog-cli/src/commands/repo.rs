use anyhow::Result;
use devlog_storage::Storage;

use crate::cli::RepoCommands;

pub async fn handle(cmd: RepoCommands, storage: &Storage) -> Result<()> {
    match cmd {
        RepoCommands::Add { name } => {
            storage.upsert_repository(&name).await?;
            println!("✓ Registered repository: {}", name);
        }
        RepoCommands::Remove { name } => {
            if storage.soft_delete_repository(&name).await? {
                println!("✓ Removed repository: {}", name);
            } else {
                anyhow::bail!("Repository not found: {}", name);
            }
        }
        RepoCommands::List => {
            let repositories = storage.list_all_repositories().await?;
            if repositories.is_empty() {
                println!("No repositories found.");
                return Ok(());
            }

            println!("Repositories:");
            for repo in repositories {
                let marker = if repo.is_deleted { " (deleted)" } else { "" };
                println!("  {}{}", repo.name, marker);
            }
        }
    }
    Ok(())
}
