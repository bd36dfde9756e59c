// ── Inventory store ──
//
// Owns the item collection and its load/error status. Every change is
// published as a whole `InventorySnapshot` through a `watch` channel.

mod refresh;
mod snapshot;

use std::sync::atomic::AtomicU64;

use tokio::sync::watch;
use tracing::warn;

use estoque_api::{InventoryClient, TransportConfig};

use crate::config::{CurrencyFormat, InventoryConfig};
use crate::convert;
use crate::error::CoreError;
use crate::model::{Item, ItemView};

pub use refresh::RefreshOutcome;
pub use snapshot::{InventorySnapshot, StoreError};

/// Holds the current item collection for one inventory API.
///
/// Created empty; [`refresh`](Self::refresh) replaces the collection
/// wholesale. Consumers read with [`snapshot`](Self::snapshot) or follow
/// changes with [`subscribe`](Self::subscribe).
pub struct InventoryStore {
    client: InventoryClient,
    currency: CurrencyFormat,
    state: watch::Sender<InventorySnapshot>,
    /// Token of the most recently issued refresh.
    sequence: AtomicU64,
}

impl InventoryStore {
    pub fn new(client: InventoryClient, currency: CurrencyFormat) -> Self {
        let (state, _) = watch::channel(InventorySnapshot::default());
        Self {
            client,
            currency,
            state,
            sequence: AtomicU64::new(0),
        }
    }

    /// Build the HTTP client from `config` and wrap it in an empty store.
    pub fn from_config(config: &InventoryConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::with_timeout(config.timeout);
        let client = InventoryClient::new(&config.base_url, &transport)?;
        Ok(Self::new(client, config.currency))
    }

    pub fn client(&self) -> &InventoryClient {
        &self.client
    }

    pub fn currency(&self) -> CurrencyFormat {
        self.currency
    }

    // ── Observation ──────────────────────────────────────────────────

    /// The current state. Cheap: items and warnings are shared.
    pub fn snapshot(&self) -> InventorySnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<InventorySnapshot> {
        self.state.subscribe()
    }

    pub fn item(&self, id: i64) -> Option<Item> {
        self.state.borrow().item(id).cloned()
    }

    /// Classified views of every held item, in server order.
    pub fn views(&self) -> Vec<ItemView> {
        self.state.borrow().views(self.currency)
    }

    // ── Single-item lookup ───────────────────────────────────────────

    /// Fetch one item straight from the server. The held collection is
    /// not touched.
    pub async fn fetch_item(&self, id: i64) -> Result<Item, CoreError> {
        let raw = self.client.get_item(id).await.map_err(|e| {
            if e.is_not_found() {
                CoreError::ItemNotFound { id }
            } else {
                CoreError::from(e)
            }
        })?;

        let mut warnings = Vec::new();
        let item = convert::sanitize(raw, &mut warnings);
        for warning in &warnings {
            warn!(%warning, "defaulted numeric field");
        }
        Ok(item)
    }
}
