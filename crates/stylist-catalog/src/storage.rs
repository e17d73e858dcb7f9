pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::Result,
    types::{TrendingStyle, ValidStyle},
};

/// Persistence contract for trending style records
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All records, newest first
    async fn list(&self) -> Result<Vec<TrendingStyle>>;

    /// Store a new record, assigning its id and creation time
    async fn insert(&self, style: ValidStyle) -> Result<TrendingStyle>;

    /// Remove a record; unknown ids are [`crate::CatalogError::NotFound`]
    async fn delete(&self, id: Uuid) -> Result<()>;
}
