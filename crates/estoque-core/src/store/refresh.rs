// ── Fetch-and-replace cycle ──
//
// Each refresh takes a token from the store's sequence. Only the response
// carrying the newest token may touch the snapshot; older ones are dropped.

use std::sync::atomic::Ordering;

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use estoque_api::RawItem;

use super::InventoryStore;
use super::snapshot::StoreError;
use crate::convert;
use crate::error::{CoreError, FailureKind};
use crate::model::{FieldWarning, Item};

/// What a call to [`InventoryStore::refresh`] did to the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The collection was replaced.
    Applied { items: usize },
    /// The collection was emptied and the error recorded.
    Failed(StoreError),
    /// A newer refresh was issued before this one resolved; nothing changed.
    Superseded,
}

impl InventoryStore {
    /// Fetch the collection and replace the held items.
    ///
    /// On failure the collection is left empty and the snapshot carries a
    /// [`StoreError`]. Never returns `Err`: the outcome is also visible to
    /// every subscriber.
    pub async fn refresh(&self) -> RefreshOutcome {
        let token = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|snapshot| snapshot.loading = true);
        let _loading = LoadingGuard { store: self, token };
        debug!(token, "refreshing inventory");

        let result = self.client.list_items().await.map_err(CoreError::from);

        let mut outcome = RefreshOutcome::Superseded;
        self.state.send_if_modified(|snapshot| {
            if self.sequence.load(Ordering::SeqCst) != token {
                return false;
            }
            outcome = match result {
                Ok(raw) => {
                    let (items, warnings) = ingest(raw);
                    let count = items.len();
                    snapshot.apply_items(items, warnings);
                    RefreshOutcome::Applied { items: count }
                }
                Err(err) => {
                    let error = StoreError {
                        kind: err.kind().unwrap_or(FailureKind::NetworkFailure),
                        message: err.user_message(),
                    };
                    snapshot.apply_failure(error.clone());
                    RefreshOutcome::Failed(error)
                }
            };
            true
        });

        match &outcome {
            RefreshOutcome::Applied { items } => info!(token, items, "inventory refreshed"),
            RefreshOutcome::Failed(error) => {
                warn!(token, kind = %error.kind, error = %error.message, "inventory refresh failed");
            }
            RefreshOutcome::Superseded => debug!(token, "discarded stale inventory response"),
        }
        outcome
    }
}

/// Clears `loading` when a refresh ends without applying, as long as no
/// newer refresh has been issued. Covers a refresh future dropped mid-request.
struct LoadingGuard<'a> {
    store: &'a InventoryStore,
    token: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let (sequence, token) = (&self.store.sequence, self.token);
        self.store.state.send_if_modified(|snapshot| {
            if snapshot.loading && sequence.load(Ordering::SeqCst) == token {
                snapshot.loading = false;
                true
            } else {
                false
            }
        });
    }
}

fn ingest(raw: Vec<RawItem>) -> (IndexMap<i64, Item>, Vec<FieldWarning>) {
    let mut warnings = Vec::new();
    let items: IndexMap<i64, Item> = raw
        .into_iter()
        .map(|record| {
            let item = convert::sanitize(record, &mut warnings);
            (item.id, item)
        })
        .collect();

    for warning in &warnings {
        warn!(%warning, "defaulted numeric field");
    }
    (items, warnings)
}
