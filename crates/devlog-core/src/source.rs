//! Contracts of the repository/mapping store consumed by the masking engine

use async_trait::async_trait;

use crate::{ProjectMapping, RepositoryRecord, Result};

/// Read side: everything the mapping registry needs to rebuild itself
#[async_trait]
pub trait MappingSource: Send + Sync {
    /// Non-deleted repositories, sorted by name ascending
    async fn list_repositories(&self) -> Result<Vec<RepositoryRecord>>;

    /// Explicit mapping rows whose repository is not deleted
    async fn list_project_mappings(&self) -> Result<Vec<ProjectMapping>>;
}

/// Write side used by the mapping administration flow
#[async_trait]
pub trait MappingWriter: Send + Sync {
    async fn upsert_project_mapping(&self, mapping: &ProjectMapping) -> Result<()>;

    /// Returns false when no row existed
    async fn delete_project_mapping(&self, repository_name: &str) -> Result<bool>;
}
