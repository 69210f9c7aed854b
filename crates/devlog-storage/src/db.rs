//! Database operations

use std::path::PathBuf;
use std::str::FromStr;

use async_trait::async_trait;
use devlog_core::{MappingSource, MappingWriter, ProjectMapping, RepositoryRecord};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use crate::{Result, StorageError};

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS repositories (
        name TEXT PRIMARY KEY NOT NULL,
        is_deleted INTEGER NOT NULL DEFAULT 0
    )",
    "CREATE TABLE IF NOT EXISTS project_mappings (
        repository_name TEXT PRIMARY KEY NOT NULL REFERENCES repositories(name),
        display_name TEXT NOT NULL,
        mask_name TEXT
    )",
];

/// Main storage interface
#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    /// Open (creating if needed) the database at `db_path`, or the default data-dir location
    pub async fn new(db_path: Option<PathBuf>) -> Result<Self> {
        let path = match db_path {
            Some(path) => path,
            None => Self::default_path()?,
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let storage = Self { pool };
        storage.migrate().await?;
        debug!("Opened storage at {:?}", path);
        Ok(storage)
    }

    /// In-memory database, for tests and throwaway runs
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        // every connection to :memory: is its own database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let storage = Self { pool };
        storage.migrate().await?;
        Ok(storage)
    }

    fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "devlog", "devlog").ok_or_else(|| {
            StorageError::Other(anyhow::anyhow!("Could not determine data directory"))
        })?;
        Ok(dirs.data_dir().join("devlog.db"))
    }

    async fn migrate(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Register a repository, reviving it if it was soft-deleted
    pub async fn upsert_repository(&self, name: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO repositories (name, is_deleted) VALUES (?, 0)
             ON CONFLICT(name) DO UPDATE SET is_deleted = 0",
        )
        .bind(name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Returns false when no live repository had that name
    pub async fn soft_delete_repository(&self, name: &str) -> Result<bool> {
        let result =
            sqlx::query("UPDATE repositories SET is_deleted = 1 WHERE name = ? AND is_deleted = 0")
                .bind(name)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Every repository including soft-deleted ones, sorted by name
    pub async fn list_all_repositories(&self) -> Result<Vec<RepositoryRecord>> {
        let rows: Vec<(String, bool)> =
            sqlx::query_as("SELECT name, is_deleted FROM repositories ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(name, is_deleted)| RepositoryRecord { name, is_deleted })
            .collect())
    }

    pub async fn list_live_repositories(&self) -> Result<Vec<RepositoryRecord>> {
        let names: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM repositories WHERE is_deleted = 0 ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(names
            .into_iter()
            .map(|(name,)| RepositoryRecord::new(name))
            .collect())
    }

    pub async fn list_mappings(&self) -> Result<Vec<ProjectMapping>> {
        let rows: Vec<(String, String, Option<String>)> = sqlx::query_as(
            "SELECT m.repository_name, m.display_name, m.mask_name
             FROM project_mappings m
             JOIN repositories r ON r.name = m.repository_name
             WHERE r.is_deleted = 0
             ORDER BY m.repository_name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(repository_name, display_name, mask_name)| ProjectMapping {
                repository_name,
                display_name,
                mask_name,
            })
            .collect())
    }

    pub async fn upsert_mapping(&self, mapping: &ProjectMapping) -> Result<()> {
        let exists: Option<(String,)> =
            sqlx::query_as("SELECT name FROM repositories WHERE name = ? AND is_deleted = 0")
                .bind(&mapping.repository_name)
                .fetch_optional(&self.pool)
                .await?;

        if exists.is_none() {
            return Err(StorageError::RepositoryNotFound(
                mapping.repository_name.clone(),
            ));
        }

        sqlx::query(
            "INSERT INTO project_mappings (repository_name, display_name, mask_name)
             VALUES (?, ?, ?)
             ON CONFLICT(repository_name) DO UPDATE SET
                display_name = excluded.display_name,
                mask_name = excluded.mask_name",
        )
        .bind(&mapping.repository_name)
        .bind(&mapping.display_name)
        .bind(&mapping.mask_name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete_mapping(&self, repository_name: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM project_mappings WHERE repository_name = ?")
            .bind(repository_name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl MappingSource for Storage {
    async fn list_repositories(&self) -> devlog_core::Result<Vec<RepositoryRecord>> {
        Ok(self.list_live_repositories().await?)
    }

    async fn list_project_mappings(&self) -> devlog_core::Result<Vec<ProjectMapping>> {
        Ok(self.list_mappings().await?)
    }
}

#[async_trait]
impl MappingWriter for Storage {
    async fn upsert_project_mapping(&self, mapping: &ProjectMapping) -> devlog_core::Result<()> {
        Ok(self.upsert_mapping(mapping).await?)
    }

    async fn delete_project_mapping(&self, repository_name: &str) -> devlog_core::Result<bool> {
        Ok(self.delete_mapping(repository_name).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_soft_delete_hides_repository() {
        let storage = Storage::in_memory().await.unwrap();
        storage.upsert_repository("beta").await.unwrap();
        storage.upsert_repository("alpha").await.unwrap();

        assert!(storage.soft_delete_repository("beta").await.unwrap());
        assert!(!storage.soft_delete_repository("beta").await.unwrap());

        let live = storage.list_live_repositories().await.unwrap();
        assert_eq!(live, vec![RepositoryRecord::new("alpha")]);

        let all = storage.list_all_repositories().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[1].is_deleted);
    }

    #[tokio::test]
    async fn test_upsert_revives_deleted_repository() {
        let storage = Storage::in_memory().await.unwrap();
        storage.upsert_repository("alpha").await.unwrap();
        storage.soft_delete_repository("alpha").await.unwrap();
        storage.upsert_repository("alpha").await.unwrap();

        let live = storage.list_live_repositories().await.unwrap();
        assert_eq!(live.len(), 1);
    }

    #[tokio::test]
    async fn test_mapping_requires_live_repository() {
        let storage = Storage::in_memory().await.unwrap();
        let mapping = ProjectMapping::new("ghost", "Ghost");

        let err = storage.upsert_mapping(&mapping).await.unwrap_err();
        assert!(matches!(err, StorageError::RepositoryNotFound(name) if name == "ghost"));
    }

    #[tokio::test]
    async fn test_mapping_upsert_and_delete() {
        let storage = Storage::in_memory().await.unwrap();
        storage.upsert_repository("repo-alpha").await.unwrap();

        let mapping = ProjectMapping::new("repo-alpha", "Alpha").with_mask_name("프로젝트 A");
        storage.upsert_mapping(&mapping).await.unwrap();
        let renamed = ProjectMapping::new("repo-alpha", "Alpha Project");
        storage.upsert_mapping(&renamed).await.unwrap();

        let mappings = storage.list_mappings().await.unwrap();
        assert_eq!(mappings, vec![renamed]);

        assert!(storage.delete_mapping("repo-alpha").await.unwrap());
        assert!(!storage.delete_mapping("repo-alpha").await.unwrap());
        assert!(storage.list_mappings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mappings_of_deleted_repositories_hidden() {
        let storage = Storage::in_memory().await.unwrap();
        storage.upsert_repository("old").await.unwrap();
        storage
            .upsert_mapping(&ProjectMapping::new("old", "Old Client"))
            .await
            .unwrap();
        storage.soft_delete_repository("old").await.unwrap();

        assert!(storage.list_mappings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_storage_error_maps_to_core_error() {
        let err: devlog_core::Error = StorageError::RepositoryNotFound("x".to_string()).into();
        assert!(matches!(err, devlog_core::Error::Storage(msg) if msg.contains("x")));
    }
}
