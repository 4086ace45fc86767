//! Marker registry with commit-then-visible update semantics

use std::collections::HashMap;

use gridmark_core::MarkerSpec;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::debug;

/// Pending mutation queued until the next commit
#[derive(Debug, Clone)]
enum PendingOp {
    Insert(MarkerSpec),
    Erase(String),
}

/// Batch of mutations made visible by one commit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkerUpdate {
    /// Markers inserted or overwritten, in queue order
    pub markers: Vec<MarkerSpec>,
    /// Marker names erased
    pub erases: Vec<String>,
}

impl MarkerUpdate {
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.erases.is_empty()
    }
}

/// Server-side registry of interactive markers.
///
/// Mutations queue as pending operations and become visible to lookups only
/// when `commit` applies them atomically. Each commit broadcasts the applied
/// batch to subscribers, so observers redraw once per batch rather than once
/// per mutation. Inserting a name that already exists overwrites it at apply
/// time.
pub struct MarkerServer {
    committed: RwLock<HashMap<String, MarkerSpec>>,
    pending: Mutex<Vec<PendingOp>>,
    update_tx: broadcast::Sender<MarkerUpdate>,
}

impl MarkerServer {
    pub fn new() -> Self {
        let (update_tx, _) = broadcast::channel(100);
        Self {
            committed: RwLock::new(HashMap::new()),
            pending: Mutex::new(Vec::new()),
            update_tx,
        }
    }

    /// Queue a marker for insertion at the next commit
    pub async fn insert(&self, marker: MarkerSpec) {
        self.pending.lock().await.push(PendingOp::Insert(marker));
    }

    /// Queue an erase for the next commit.
    ///
    /// Returns false without queueing anything when the name is neither
    /// committed nor pending insertion.
    pub async fn erase(&self, name: &str) -> bool {
        let mut pending = self.pending.lock().await;
        let known = self.committed.read().await.contains_key(name)
            || pending
                .iter()
                .any(|op| matches!(op, PendingOp::Insert(m) if m.name == name));
        if !known {
            return false;
        }
        pending.push(PendingOp::Erase(name.to_string()));
        true
    }

    /// Look up a committed marker by name.
    ///
    /// Pending mutations are never visible here; commit is the only
    /// visibility barrier.
    pub async fn lookup(&self, name: &str) -> Option<MarkerSpec> {
        self.committed.read().await.get(name).cloned()
    }

    /// Apply all pending mutations in queue order and broadcast the batch
    pub async fn commit(&self) -> MarkerUpdate {
        let ops: Vec<PendingOp> = self.pending.lock().await.drain(..).collect();

        let mut update = MarkerUpdate::default();
        {
            let mut committed = self.committed.write().await;
            for op in ops {
                match op {
                    PendingOp::Insert(marker) => {
                        committed.insert(marker.name.clone(), marker.clone());
                        update.markers.push(marker);
                    }
                    PendingOp::Erase(name) => {
                        committed.remove(&name);
                        update.erases.push(name);
                    }
                }
            }
        }

        debug!(
            markers = update.markers.len(),
            erases = update.erases.len(),
            "Committed marker update"
        );
        let _ = self.update_tx.send(update.clone());
        update
    }

    /// Subscribe to committed update batches
    pub fn subscribe(&self) -> broadcast::Receiver<MarkerUpdate> {
        self.update_tx.subscribe()
    }

    /// All committed markers
    pub async fn markers(&self) -> Vec<MarkerSpec> {
        self.committed.read().await.values().cloned().collect()
    }

    /// Number of committed markers
    pub async fn len(&self) -> usize {
        self.committed.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.committed.read().await.is_empty()
    }
}

impl Default for MarkerServer {
    fn default() -> Self {
        Self::new()
    }
}
