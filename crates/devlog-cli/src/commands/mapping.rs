use std::sync::Arc;

use anyhow::Result;
use devlog_core::ProjectMapping;
use devlog_mask::{MappingAdmin, MappingRegistry, RepositoryAliases};
use devlog_storage::Storage;

use crate::cli::MappingCommands;

pub async fn handle(
    cmd: MappingCommands,
    storage: Arc<Storage>,
    registry: Arc<MappingRegistry>,
) -> Result<()> {
    match cmd {
        MappingCommands::Set {
            repository,
            display,
            mask,
        } => {
            let admin = MappingAdmin::new(storage, registry);
            let mut mapping = ProjectMapping::new(&repository, display);
            mapping.mask_name = mask;
            admin.save(&mapping).await?;
            println!("✓ Saved mapping for {}", repository);
        }
        MappingCommands::Remove { repository } => {
            let admin = MappingAdmin::new(storage, registry);
            if admin.remove(&repository).await? {
                println!("✓ Removed mapping for {}", repository);
            } else {
                println!("No mapping for {}", repository);
            }
        }
        MappingCommands::List => list(&registry).await?,
    }
    Ok(())
}

async fn list(registry: &MappingRegistry) -> Result<()> {
    let snapshot = registry.snapshot().await?;
    let aliases = RepositoryAliases::new(
        snapshot.mappings(),
        Some(snapshot.index()),
        std::iter::empty::<&str>(),
    );

    let entries = snapshot.index().entries();
    if entries.is_empty() {
        println!("No repositories found.");
        return Ok(());
    }

    println!("Mappings:");
    for (name, _) in entries {
        let info = snapshot.mappings().lookup(name);
        let marker = if info.is_registered { "" } else { " (implicit)" };
        println!(
            "  {} -> {} / {}{}",
            name,
            info.display_name,
            aliases.pseudonym(name),
            marker
        );
    }
    Ok(())
}
