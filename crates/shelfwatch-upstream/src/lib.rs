//! shelfwatch-upstream — client for the shop inventory API.
//!
//! One poll = one `GET /v2/product/{product_id}/sku?storeId={store_id}`
//! returning a JSON envelope with a business status code and a list of
//! SKU records. The client collapses every failure mode into
//! [`FetchOutcome`], which the monitor matches exhaustively each tick;
//! nothing here can abort the poll loop.

pub mod client;
pub mod types;

pub use client::{InventoryClient, InventorySource, UpstreamConfig, UpstreamError};
pub use types::{FetchOutcome, InventorySnapshot, SkuRecord};
