use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use jiff::Timestamp;
use uuid::Uuid;

use super::CatalogStore;
use crate::{
    error::{CatalogError, Result},
    types::{TrendingStyle, ValidStyle},
};

struct Entry {
    sequence: u64,
    style: TrendingStyle,
}

/// In-process catalog backed by `DashMap`
///
/// Contents live for the lifetime of the process.
#[derive(Default)]
pub struct MemoryCatalog {
    entries: DashMap<Uuid, Entry>,
    // tie-breaker for records created within the same instant
    sequence: AtomicU64,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog pre-populated with `styles`, in order
    pub fn seeded(styles: impl IntoIterator<Item = ValidStyle>) -> Self {
        let catalog = Self::new();
        for style in styles {
            catalog.store(style);
        }
        catalog
    }

    fn store(&self, style: ValidStyle) -> TrendingStyle {
        let record = TrendingStyle {
            id: Uuid::new_v4(),
            title: style.title,
            description: style.description,
            image_path: style.image_path.into(),
            created_at: Timestamp::now(),
        };

        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(
            record.id,
            Entry {
                sequence,
                style: record.clone(),
            },
        );

        record
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn list(&self) -> Result<Vec<TrendingStyle>> {
        let mut entries: Vec<(Timestamp, u64, TrendingStyle)> = self
            .entries
            .iter()
            .map(|entry| (entry.style.created_at, entry.sequence, entry.style.clone()))
            .collect();

        entries.sort_by_key(|(created_at, sequence, _)| Reverse((*created_at, *sequence)));

        Ok(entries.into_iter().map(|(_, _, style)| style).collect())
    }

    async fn insert(&self, style: ValidStyle) -> Result<TrendingStyle> {
        let record = self.store(style);
        tracing::info!(id = %record.id, title = %record.title, "trending style created");
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        match self.entries.remove(&id) {
            Some(_) => {
                tracing::info!(%id, "trending style deleted");
                Ok(())
            }
            None => Err(CatalogError::NotFound(id)),
        }
    }
}
