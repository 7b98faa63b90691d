use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use savory_core::domain::order::OrderId;

pub mod memory;
pub mod orders;

pub use memory::InMemoryOrderRepository;
pub use orders::SqlOrderRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("item is not on the menu: `{0}`")]
    UnknownItem(String),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Persistence collaborator for finalized orders.
///
/// The fulfillment engine hands a completed cart over item-by-item; pricing
/// lives entirely on this side of the boundary (the cart itself never sees a
/// price).
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Allocates the identifier the next finalized order will be stored
    /// under.
    async fn next_order_id(&self) -> Result<OrderId, RepositoryError>;

    /// Persists one cart line. Fails when the item cannot be priced.
    async fn insert_order_item(
        &self,
        item_name: &str,
        quantity: u32,
        order_id: OrderId,
    ) -> Result<(), RepositoryError>;

    /// Records the tracking status for an order.
    async fn insert_order_tracking(
        &self,
        order_id: OrderId,
        status: &str,
    ) -> Result<(), RepositoryError>;

    /// Computed total across all persisted lines of an order.
    async fn total_order_price(&self, order_id: OrderId) -> Result<Decimal, RepositoryError>;

    /// Tracking status, or `None` for an id no order was stored under.
    async fn order_status(&self, order_id: OrderId) -> Result<Option<String>, RepositoryError>;
}
