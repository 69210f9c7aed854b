//! Project mapping administration
//!
//! Every successful write invalidates the registry so the next render sees
//! the new display and mask names instead of waiting out the TTL.

use std::sync::Arc;

use devlog_core::{MappingWriter, ProjectMapping, Result};
use tracing::info;

use crate::registry::MappingRegistry;

pub struct MappingAdmin {
    writer: Arc<dyn MappingWriter>,
    registry: Arc<MappingRegistry>,
}

impl MappingAdmin {
    pub fn new(writer: Arc<dyn MappingWriter>, registry: Arc<MappingRegistry>) -> Self {
        Self { writer, registry }
    }

    /// Create or update a mapping
    pub async fn save(&self, mapping: &ProjectMapping) -> Result<()> {
        self.writer.upsert_project_mapping(mapping).await?;
        info!("Saved project mapping for {}", mapping.repository_name);
        self.registry.invalidate();
        Ok(())
    }

    /// Delete a mapping; returns false when none existed
    pub async fn remove(&self, repository_name: &str) -> Result<bool> {
        let removed = self.writer.delete_project_mapping(repository_name).await?;
        if removed {
            info!("Removed project mapping for {}", repository_name);
            self.registry.invalidate();
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DEFAULT_TTL;
    use async_trait::async_trait;
    use devlog_core::{Error, MappingSource, RepositoryRecord};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        mappings: Mutex<Vec<ProjectMapping>>,
    }

    #[async_trait]
    impl MappingSource for MemoryStore {
        async fn list_repositories(&self) -> Result<Vec<RepositoryRecord>> {
            Ok(vec![RepositoryRecord::new("repo-alpha")])
        }

        async fn list_project_mappings(&self) -> Result<Vec<ProjectMapping>> {
            Ok(self.mappings.lock().unwrap().clone())
        }
    }

    #[async_trait]
    impl MappingWriter for MemoryStore {
        async fn upsert_project_mapping(&self, mapping: &ProjectMapping) -> Result<()> {
            if mapping.repository_name != "repo-alpha" {
                return Err(Error::Storage(format!(
                    "Repository not found: {}",
                    mapping.repository_name
                )));
            }
            let mut mappings = self.mappings.lock().unwrap();
            mappings.retain(|m| m.repository_name != mapping.repository_name);
            mappings.push(mapping.clone());
            Ok(())
        }

        async fn delete_project_mapping(&self, repository_name: &str) -> Result<bool> {
            let mut mappings = self.mappings.lock().unwrap();
            let before = mappings.len();
            mappings.retain(|m| m.repository_name != repository_name);
            Ok(mappings.len() != before)
        }
    }

    fn setup() -> (Arc<MappingRegistry>, MappingAdmin) {
        let store = Arc::new(MemoryStore::default());
        let registry = Arc::new(MappingRegistry::new(store.clone(), DEFAULT_TTL));
        let admin = MappingAdmin::new(store, registry.clone());
        (registry, admin)
    }

    #[tokio::test]
    async fn test_save_visible_on_next_read() {
        let (registry, admin) = setup();
        let before = registry.snapshot().await.unwrap();
        assert_eq!(before.mappings().lookup("repo-alpha").display_name, "repo-alpha");

        let mapping = ProjectMapping::new("repo-alpha", "Alpha").with_mask_name("프로젝트 A");
        admin.save(&mapping).await.unwrap();

        let after = registry.snapshot().await.unwrap();
        assert!(after.epoch > before.epoch);
        assert_eq!(
            after.mappings().lookup("repo-alpha").mask_name.as_deref(),
            Some("프로젝트 A")
        );
    }

    #[tokio::test]
    async fn test_remove_restores_implicit_mapping() {
        let (registry, admin) = setup();
        admin
            .save(&ProjectMapping::new("repo-alpha", "Alpha"))
            .await
            .unwrap();
        registry.snapshot().await.unwrap();

        assert!(admin.remove("repo-alpha").await.unwrap());
        let snapshot = registry.snapshot().await.unwrap();
        assert!(!snapshot.mappings().lookup("repo-alpha").is_registered);

        assert!(!admin.remove("repo-alpha").await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_cache() {
        let (registry, admin) = setup();
        let before = registry.snapshot().await.unwrap();

        let result = admin.save(&ProjectMapping::new("missing", "Missing")).await;
        assert!(result.is_err());

        let after = registry.snapshot().await.unwrap();
        assert_eq!(after.epoch, before.epoch);
    }
}
