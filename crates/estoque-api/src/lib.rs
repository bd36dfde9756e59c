//! estoque-api: Async Rust client for the inventory REST API (/api/produtos)

pub mod client;
pub mod error;
pub mod models;
mod products;
pub mod transport;

pub use client::InventoryClient;
pub use error::Error;
pub use models::{ErrorBody, ItemWrite, RawItem};
pub use transport::TransportConfig;
