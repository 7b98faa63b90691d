use rust_decimal::Decimal;

use savory_core::domain::order::OrderId;

use super::{OrderRepository, RepositoryError};
use crate::DbPool;

/// SQLite-backed order persistence. Prices are stored as integer cents and
/// surfaced as `Decimal` at the trait boundary.
pub struct SqlOrderRepository {
    pool: DbPool,
}

impl SqlOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl OrderRepository for SqlOrderRepository {
    async fn next_order_id(&self) -> Result<OrderId, RepositoryError> {
        let highest: i64 =
            sqlx::query_scalar("SELECT COALESCE(MAX(order_id), 0) FROM order_items")
                .fetch_one(&self.pool)
                .await?;
        Ok(OrderId(highest + 1))
    }

    async fn insert_order_item(
        &self,
        item_name: &str,
        quantity: u32,
        order_id: OrderId,
    ) -> Result<(), RepositoryError> {
        let price_cents: Option<i64> =
            sqlx::query_scalar("SELECT price_cents FROM menu_items WHERE name = ?1")
                .bind(item_name)
                .fetch_optional(&self.pool)
                .await?;

        let Some(price_cents) = price_cents else {
            return Err(RepositoryError::UnknownItem(item_name.to_owned()));
        };

        let line_total_cents = price_cents * i64::from(quantity);
        sqlx::query(
            "INSERT INTO order_items (order_id, item_name, quantity, line_total_cents)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(order_id.0)
        .bind(item_name)
        .bind(i64::from(quantity))
        .bind(line_total_cents)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_order_tracking(
        &self,
        order_id: OrderId,
        status: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO order_tracking (order_id, status) VALUES (?1, ?2)")
            .bind(order_id.0)
            .bind(status)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn total_order_price(&self, order_id: OrderId) -> Result<Decimal, RepositoryError> {
        let total_cents: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(line_total_cents), 0) FROM order_items WHERE order_id = ?1",
        )
        .bind(order_id.0)
        .fetch_one(&self.pool)
        .await?;

        Ok(Decimal::new(total_cents, 2))
    }

    async fn order_status(&self, order_id: OrderId) -> Result<Option<String>, RepositoryError> {
        let status: Option<String> =
            sqlx::query_scalar("SELECT status FROM order_tracking WHERE order_id = ?1")
                .bind(order_id.0)
                .fetch_optional(&self.pool)
                .await?;
        Ok(status)
    }
}
