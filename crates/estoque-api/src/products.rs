// Product endpoints
//
// CRUD over /api/produtos. Mutations return `()`; callers re-read the
// collection instead of trusting mutation response bodies.

use tracing::debug;

use crate::client::InventoryClient;
use crate::error::Error;
use crate::models::{ItemWrite, RawItem};

impl InventoryClient {
    /// List every item.
    ///
    /// `GET /api/produtos`
    pub async fn list_items(&self) -> Result<Vec<RawItem>, Error> {
        self.get(self.collection_url()).await
    }

    /// Fetch a single item.
    ///
    /// `GET /api/produtos/{id}`
    pub async fn get_item(&self, id: i64) -> Result<RawItem, Error> {
        self.get(self.item_url(id)).await
    }

    /// Create an item and return the record the server stored.
    ///
    /// `POST /api/produtos`
    pub async fn create_item(&self, body: &ItemWrite) -> Result<RawItem, Error> {
        debug!(nome = %body.nome, "creating item");
        self.post(self.collection_url(), body).await
    }

    /// Replace an item's editable fields.
    ///
    /// `PUT /api/produtos/{id}`
    pub async fn update_item(&self, id: i64, body: &ItemWrite) -> Result<(), Error> {
        debug!(id, "updating item");
        self.put_no_response(self.item_url(id), body).await
    }

    /// Delete an item.
    ///
    /// `DELETE /api/produtos/{id}`
    pub async fn delete_item(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting item");
        self.delete(self.item_url(id)).await
    }
}
