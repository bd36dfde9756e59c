use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use crate::config::CurrencyFormat;
use crate::error::FailureKind;
use crate::model::{FieldWarning, Item, ItemView};

/// Screen-level error left by a failed refresh.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct StoreError {
    pub kind: FailureKind,
    pub message: String,
}

/// Immutable view of the store at one point in time.
#[derive(Debug, Clone, Default)]
pub struct InventorySnapshot {
    /// Items keyed by id, in the order the server listed them.
    pub items: Arc<IndexMap<i64, Item>>,
    /// A refresh is in flight.
    pub loading: bool,
    pub error: Option<StoreError>,
    /// Numeric fields defaulted during the last successful refresh.
    pub warnings: Arc<Vec<FieldWarning>>,
    pub last_refresh: Option<DateTime<Utc>>,
}

impl InventorySnapshot {
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn item(&self, id: i64) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn low_stock_items(&self) -> impl Iterator<Item = &Item> {
        self.items().filter(|item| item.is_low_stock())
    }

    pub fn views(&self, currency: CurrencyFormat) -> Vec<ItemView> {
        self.items()
            .map(|item| ItemView::new(item, currency))
            .collect()
    }

    // ── Transitions ──────────────────────────────────────────────────

    pub(super) fn apply_items(&mut self, items: IndexMap<i64, Item>, warnings: Vec<FieldWarning>) {
        self.items = Arc::new(items);
        self.warnings = Arc::new(warnings);
        self.error = None;
        self.loading = false;
        self.last_refresh = Some(Utc::now());
    }

    pub(super) fn apply_failure(&mut self, error: StoreError) {
        self.items = Arc::new(IndexMap::new());
        self.warnings = Arc::new(Vec::new());
        self.error = Some(error);
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, quantity: u64) -> Item {
        Item {
            id,
            name: format!("Item {id}"),
            size: None,
            description: None,
            price_cents: 1000,
            quantity,
        }
    }

    fn loaded(items: &[Item]) -> InventorySnapshot {
        let mut snapshot = InventorySnapshot::default();
        snapshot.apply_items(
            items.iter().map(|i| (i.id, i.clone())).collect(),
            Vec::new(),
        );
        snapshot
    }

    #[test]
    fn failure_empties_collection_and_records_error() {
        let mut snapshot = loaded(&[item(1, 3), item(2, 10)]);
        snapshot.loading = true;
        snapshot.apply_failure(StoreError {
            kind: FailureKind::ServerFailure,
            message: "Server failure (status 500)".into(),
        });

        assert!(snapshot.is_empty());
        assert!(!snapshot.loading);
        assert_eq!(
            snapshot.error.as_ref().map(|e| e.kind),
            Some(FailureKind::ServerFailure)
        );
    }

    #[test]
    fn success_clears_previous_error() {
        let mut snapshot = InventorySnapshot::default();
        snapshot.apply_failure(StoreError {
            kind: FailureKind::NetworkFailure,
            message: "refused".into(),
        });
        snapshot.apply_items(IndexMap::from([(7, item(7, 1))]), Vec::new());

        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.last_refresh.is_some());
    }

    #[test]
    fn low_stock_filter_keeps_server_order() {
        let snapshot = loaded(&[item(3, 0), item(1, 40), item(2, 5)]);
        let ids: Vec<i64> = snapshot.low_stock_items().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }
}
