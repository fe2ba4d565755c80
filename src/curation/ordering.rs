use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::api::traits::ReorderSink;
use crate::api::types::OrderEntry;
use crate::error::EngineError;
use crate::models::OrderableItem;

/// Lifecycle of one curated collection's draft order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    /// Local order matches the last acknowledged server order
    Clean,
    /// At least one unpersisted local move
    Dirty,
    /// A commit is in flight
    Saving,
}

/// A single reorder gesture, expressed as data so the transition layer
/// is testable without any UI harness
#[derive(Debug, Clone, PartialEq)]
pub struct MoveCommand {
    pub id: String,
    pub to_index: usize,
}

/// Optimistic reorder editor for one curated collection
///
/// The local item list is a draft over the server's last acknowledged
/// order: a commit either lands in full or the draft rolls back to that
/// baseline, so local state always ends up matching server truth.
/// Commits carry the complete ordered id list — partial reorder
/// endpoints have been observed to drop untouched items and corrupt
/// the sequence.
pub struct OrderingEditor {
    collection_id: String,
    items: Vec<OrderableItem>,
    /// Last order the server acknowledged; the rollback target
    baseline: Vec<OrderableItem>,
    state: EditState,
    /// Moves that arrived while a commit was in flight; applied to the
    /// draft once it resolves, never into the payload already sent
    queued: VecDeque<MoveCommand>,
}

impl OrderingEditor {
    /// Start an edit session over the server's acknowledged order
    pub fn new(collection_id: impl Into<String>, mut items: Vec<OrderableItem>) -> Self {
        items.sort_by_key(|item| item.display_order);
        renumber(&mut items);
        Self {
            collection_id: collection_id.into(),
            baseline: items.clone(),
            items,
            state: EditState::Clean,
            queued: VecDeque::new(),
        }
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn items(&self) -> &[OrderableItem] {
        &self.items
    }

    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    /// Current order as the full commit payload
    pub fn order_entries(&self) -> Vec<OrderEntry> {
        self.items
            .iter()
            .map(|item| OrderEntry {
                id: item.id.clone(),
                display_order: item.display_order,
            })
            .collect()
    }

    /// Move an item to a new 0-based index, purely locally
    ///
    /// While a commit is in flight the move is queued and applied once
    /// the commit resolves.
    pub fn move_item(&mut self, id: &str, to_index: usize) -> Result<(), EngineError> {
        if self.state == EditState::Saving {
            debug!(id, to_index, "commit in flight, queueing move");
            self.queued.push_back(MoveCommand {
                id: id.to_string(),
                to_index,
            });
            return Ok(());
        }
        self.apply_move(id, to_index)
    }

    fn apply_move(&mut self, id: &str, to_index: usize) -> Result<(), EngineError> {
        let from = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| EngineError::UnknownItem { id: id.to_string() })?;
        let to = to_index.min(self.items.len().saturating_sub(1));
        if from != to {
            let item = self.items.remove(from);
            self.items.insert(to, item);
            renumber(&mut self.items);
            self.state = EditState::Dirty;
        }
        Ok(())
    }

    /// Mark the commit in flight and hand back the full payload
    ///
    /// Split from [`finish_commit`](Self::finish_commit) so hosts can
    /// drive their own persistence call; [`commit`](Self::commit)
    /// composes the two. Returns `None` when there is nothing to save.
    pub fn begin_commit(&mut self) -> Option<Vec<OrderEntry>> {
        if self.state != EditState::Dirty {
            return None;
        }
        self.state = EditState::Saving;
        Some(self.order_entries())
    }

    /// Resolve the in-flight commit
    ///
    /// Success promotes the draft to the new baseline; failure rolls the
    /// draft back to the last acknowledged server order, so the caller
    /// can tell the user their edit did not take effect. Queued moves
    /// drain into the (possibly rolled-back) draft either way.
    pub fn finish_commit(&mut self, result: Result<(), EngineError>) -> Result<(), EngineError> {
        let outcome = match result {
            Ok(()) => {
                self.baseline = self.items.clone();
                self.state = EditState::Clean;
                Ok(())
            }
            Err(err) => {
                warn!(collection = %self.collection_id, "reorder commit failed, rolling back: {}", err);
                self.items = self.baseline.clone();
                self.state = EditState::Clean;
                Err(err)
            }
        };

        while let Some(cmd) = self.queued.pop_front() {
            // A queued move naming an id that vanished is dropped.
            let _ = self.apply_move(&cmd.id, cmd.to_index);
        }
        outcome
    }

    /// Persist the draft order through the sink, rolling back on failure
    pub async fn commit(&mut self, sink: &dyn ReorderSink) -> Result<(), EngineError> {
        let Some(payload) = self.begin_commit() else {
            return Ok(());
        };
        let result = sink.persist_order(&self.collection_id, &payload).await;
        self.finish_commit(result)
    }
}

fn renumber(items: &mut [OrderableItem]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.display_order = (index + 1) as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn gallery() -> Vec<OrderableItem> {
        ["a", "b", "c", "d"]
            .iter()
            .enumerate()
            .map(|(i, id)| OrderableItem {
                id: (*id).to_string(),
                display_order: (i + 1) as u32,
                is_featured: false,
            })
            .collect()
    }

    fn ids(editor: &OrderingEditor) -> Vec<&str> {
        editor.items().iter().map(|i| i.id.as_str()).collect()
    }

    struct RecordingSink {
        fail: bool,
        payloads: Mutex<Vec<Vec<OrderEntry>>>,
    }

    impl RecordingSink {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                payloads: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ReorderSink for RecordingSink {
        async fn persist_order(
            &self,
            _collection_id: &str,
            order: &[OrderEntry],
        ) -> Result<(), EngineError> {
            self.payloads.lock().unwrap().push(order.to_vec());
            if self.fail {
                Err(EngineError::BackendStatus { status: 500 })
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn move_renumbers_contiguously() {
        let mut editor = OrderingEditor::new("g1", gallery());
        editor.move_item("d", 0).unwrap();
        assert_eq!(ids(&editor), vec!["d", "a", "b", "c"]);
        let orders: Vec<u32> = editor.items().iter().map(|i| i.display_order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
        assert_eq!(editor.state(), EditState::Dirty);
    }

    #[test]
    fn noop_move_stays_clean() {
        let mut editor = OrderingEditor::new("g1", gallery());
        editor.move_item("b", 1).unwrap();
        assert_eq!(editor.state(), EditState::Clean);
    }

    #[test]
    fn unknown_id_is_rejected() {
        let mut editor = OrderingEditor::new("g1", gallery());
        let err = editor.move_item("zz", 0).unwrap_err();
        assert!(matches!(err, EngineError::UnknownItem { .. }));
    }

    #[test]
    fn out_of_range_target_clamps_to_end() {
        let mut editor = OrderingEditor::new("g1", gallery());
        editor.move_item("a", 99).unwrap();
        assert_eq!(ids(&editor), vec!["b", "c", "d", "a"]);
    }

    #[test]
    fn gapped_server_order_is_normalized_on_load() {
        let mut items = gallery();
        items[0].display_order = 3;
        items[1].display_order = 7;
        items[2].display_order = 1;
        items[3].display_order = 9;
        let editor = OrderingEditor::new("g1", items);
        assert_eq!(ids(&editor), vec!["c", "a", "b", "d"]);
        let orders: Vec<u32> = editor.items().iter().map(|i| i.display_order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
        assert_eq!(editor.state(), EditState::Clean);
    }

    #[tokio::test]
    async fn successful_commit_sends_full_list_and_goes_clean() {
        let mut editor = OrderingEditor::new("g1", gallery());
        editor.move_item("d", 0).unwrap();

        let sink = RecordingSink::new(false);
        editor.commit(&sink).await.unwrap();
        assert_eq!(editor.state(), EditState::Clean);
        assert_eq!(ids(&editor), vec!["d", "a", "b", "c"]);

        let payloads = sink.payloads.lock().unwrap();
        assert_eq!(payloads.len(), 1);
        // Full ordered list, never a diff.
        assert_eq!(payloads[0].len(), 4);
        assert_eq!(payloads[0][0], OrderEntry { id: "d".into(), display_order: 1 });
        assert_eq!(payloads[0][3], OrderEntry { id: "c".into(), display_order: 4 });
    }

    #[tokio::test]
    async fn failed_commit_rolls_back_to_server_order() {
        let mut editor = OrderingEditor::new("g1", gallery());
        editor.move_item("d", 0).unwrap();

        let sink = RecordingSink::new(true);
        let err = editor.commit(&sink).await.unwrap_err();
        assert!(matches!(err, EngineError::BackendStatus { status: 500 }));

        // Local state matches server truth again.
        assert_eq!(ids(&editor), vec!["a", "b", "c", "d"]);
        let orders: Vec<u32> = editor.items().iter().map(|i| i.display_order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
        assert_eq!(editor.state(), EditState::Clean);
    }

    #[test]
    fn commit_from_clean_is_a_noop() {
        let mut editor = OrderingEditor::new("g1", gallery());
        assert!(editor.begin_commit().is_none());
        assert_eq!(editor.state(), EditState::Clean);
    }

    #[test]
    fn moves_during_saving_queue_until_resolution() {
        let mut editor = OrderingEditor::new("g1", gallery());
        editor.move_item("d", 0).unwrap();
        let payload = editor.begin_commit().unwrap();
        assert_eq!(editor.state(), EditState::Saving);

        // Arrives mid-flight: queued, and absent from the sent payload.
        editor.move_item("a", 3).unwrap();
        assert_eq!(ids(&editor), vec!["d", "a", "b", "c"]);
        assert_eq!(payload[1].id, "a");
        assert_eq!(payload[1].display_order, 2);

        editor.finish_commit(Ok(())).unwrap();
        assert_eq!(ids(&editor), vec!["d", "b", "c", "a"]);
        assert_eq!(editor.state(), EditState::Dirty);
    }

    #[test]
    fn queued_moves_apply_after_rollback_too() {
        let mut editor = OrderingEditor::new("g1", gallery());
        editor.move_item("d", 0).unwrap();
        editor.begin_commit().unwrap();
        editor.move_item("b", 0).unwrap();

        let err = editor.finish_commit(Err(EngineError::BackendStatus { status: 502 }));
        assert!(err.is_err());
        // Rolled back to the server baseline, then the queued move applied.
        assert_eq!(ids(&editor), vec!["b", "a", "c", "d"]);
        assert_eq!(editor.state(), EditState::Dirty);
    }

    #[tokio::test]
    async fn second_commit_after_success_uses_new_baseline() {
        let mut editor = OrderingEditor::new("g1", gallery());
        editor.move_item("d", 0).unwrap();
        editor.commit(&RecordingSink::new(false)).await.unwrap();

        editor.move_item("c", 0).unwrap();
        editor
            .commit(&RecordingSink::new(true))
            .await
            .unwrap_err();
        // Rollback lands on the acknowledged [d, a, b, c], not the
        // session-start order.
        assert_eq!(ids(&editor), vec!["d", "a", "b", "c"]);
    }
}
