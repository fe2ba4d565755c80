use async_trait::async_trait;

use crate::api::types::{ListingQuery, OrderEntry};
use crate::error::EngineError;
use crate::models::{ListingItem, Page};

/// Source of paginated listing data
/// Implemented by the REST client; tests substitute in-memory fakes
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch one normalized page for the given query
    async fn fetch_page(&self, query: &ListingQuery) -> Result<Page<ListingItem>, EngineError>;

    /// Get the name of the backing source
    fn source_name(&self) -> &'static str;
}

/// Persistence boundary for curated-collection reorders
///
/// The payload is always the complete ordered list for the collection,
/// never a diff — partial reorder endpoints have been observed to drop
/// untouched items and corrupt the sequence.
#[async_trait]
pub trait ReorderSink: Send + Sync {
    async fn persist_order(
        &self,
        collection_id: &str,
        order: &[OrderEntry],
    ) -> Result<(), EngineError>;
}

/// Persistence boundary for the single-featured-item toggle
#[async_trait]
pub trait FeaturedSink: Send + Sync {
    async fn persist_featured(&self, collection_id: &str, item_id: &str)
        -> Result<(), EngineError>;
}
