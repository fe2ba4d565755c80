use tracing::{debug, warn};

use crate::api::traits::FeaturedSink;
use crate::error::EngineError;
use crate::models::OrderableItem;

/// Optimistic "set as featured" toggle for one curated collection
///
/// Enforces the at-most-one-featured invariant: the target flips on and
/// every sibling flips off in the same step. On persistence failure the
/// entire prior `is_featured` vector is restored — the optimistic update
/// already cleared a previously featured sibling, so restoring only the
/// target would leave the collection with zero featured items.
pub struct FeaturedSelector {
    collection_id: String,
}

impl FeaturedSelector {
    pub fn new(collection_id: impl Into<String>) -> Self {
        Self {
            collection_id: collection_id.into(),
        }
    }

    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    pub async fn set_featured(
        &self,
        items: &mut [OrderableItem],
        id: &str,
        sink: &dyn FeaturedSink,
    ) -> Result<(), EngineError> {
        if !items.iter().any(|item| item.id == id) {
            return Err(EngineError::UnknownItem { id: id.to_string() });
        }

        let prior: Vec<bool> = items.iter().map(|item| item.is_featured).collect();
        for item in items.iter_mut() {
            item.is_featured = item.id == id;
        }
        debug!(collection = %self.collection_id, id, "optimistically marked featured");

        match sink.persist_featured(&self.collection_id, id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(collection = %self.collection_id, "featured toggle failed, restoring: {}", err);
                for (item, was) in items.iter_mut().zip(prior) {
                    item.is_featured = was;
                }
                Err(err)
            }
        }
    }
}
