//! Cached repository mapping registry
//!
//! The mapping table and the global repository index are always built
//! together from one pair of storage reads and published as a single
//! snapshot, so readers never see a table from one epoch with an index
//! from another.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use devlog_core::{MappingSource, Result};
use tracing::{debug, info, warn};

use crate::pseudonym::OrdinalIndex;
use crate::table::MappingTable;

pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// One consistent epoch of mappings and repository positions
#[derive(Debug)]
pub struct RegistrySnapshot {
    pub epoch: u64,
    pub built_at: Instant,
    mappings: MappingTable,
    index: OrdinalIndex,
}

impl RegistrySnapshot {
    pub fn mappings(&self) -> &MappingTable {
        &self.mappings
    }

    pub fn index(&self) -> &OrdinalIndex {
        &self.index
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.built_at.elapsed() < ttl
    }
}

pub struct MappingRegistry {
    source: Arc<dyn MappingSource>,
    ttl: Duration,
    cache: RwLock<Option<Arc<RegistrySnapshot>>>,
    /// Bumped by every invalidation; a rebuild that straddles one is not published
    generation: AtomicU64,
    epochs: AtomicU64,
}

impl MappingRegistry {
    pub fn new(source: Arc<dyn MappingSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            cache: RwLock::new(None),
            generation: AtomicU64::new(0),
            epochs: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current snapshot, rebuilding it when missing or expired
    pub async fn snapshot(&self) -> Result<Arc<RegistrySnapshot>> {
        if let Some(snapshot) = self.cached() {
            return Ok(snapshot);
        }
        self.rebuild().await
    }

    pub async fn get_mappings(&self) -> Result<MappingTable> {
        Ok(self.snapshot().await?.mappings.clone())
    }

    pub async fn get_global_repository_index(&self) -> Result<OrdinalIndex> {
        Ok(self.snapshot().await?.index.clone())
    }

    /// Force the next read to rebuild regardless of TTL
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        *cache = None;
        info!("Mapping registry invalidated");
    }

    fn cached(&self) -> Option<Arc<RegistrySnapshot>> {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        cache
            .as_ref()
            .filter(|snapshot| snapshot.is_fresh(self.ttl))
            .cloned()
    }

    async fn rebuild(&self) -> Result<Arc<RegistrySnapshot>> {
        let generation = self.generation.load(Ordering::Acquire);

        let repositories = self.source.list_repositories().await?;
        let mappings = self.source.list_project_mappings().await?;

        let index = OrdinalIndex::from_sorted_names(
            repositories
                .iter()
                .filter(|r| !r.is_deleted)
                .map(|r| r.name.as_str()),
        );
        let table = MappingTable::build(&repositories, &mappings);
        let epoch = self.epochs.fetch_add(1, Ordering::Relaxed) + 1;

        debug!(
            "Built mapping registry epoch {} with {} repositories, {} explicit mappings",
            epoch,
            index.len(),
            mappings.len()
        );

        let snapshot = Arc::new(RegistrySnapshot {
            epoch,
            built_at: Instant::now(),
            mappings: table,
            index,
        });

        {
            let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
            if self.generation.load(Ordering::Acquire) == generation {
                *cache = Some(Arc::clone(&snapshot));
            } else {
                warn!("Registry invalidated during rebuild, epoch {} not cached", epoch);
            }
        }

        Ok(snapshot)
    }
}
