//! estoque-core: Inventory state layer between estoque-api and consumers (CLI).

pub mod classify;
pub mod config;
pub mod convert;
pub mod coordinator;
pub mod error;
pub mod model;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use classify::{
    CRITICAL_MARKER, Classification, LOW_STOCK_THRESHOLD, classify, display_name, format_currency,
};
pub use config::{CurrencyFormat, InventoryConfig};
pub use coordinator::{
    DraftItem, EditBuffer, EditField, EditSession, MutationCoordinator, PendingDelete,
    WorkflowState,
};
pub use error::{CoreError, FailureKind};
pub use model::{FieldWarning, Item, ItemView, NumericField};
pub use store::{InventorySnapshot, InventoryStore, RefreshOutcome, StoreError};
