use std::collections::HashMap;

use rust_decimal::Decimal;
use tokio::sync::RwLock;

use savory_core::domain::order::OrderId;

use super::{OrderRepository, RepositoryError};

/// In-memory order persistence for tests and stubs.
///
/// Mirrors the SQL repository's contract, including the unknown-item
/// failure, and adds failure injection for exercising the
/// persistence-failure paths.
pub struct InMemoryOrderRepository {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    menu: HashMap<String, Decimal>,
    lines: Vec<StoredLine>,
    tracking: HashMap<i64, String>,
    starting_order_id: i64,
    fail_inserts: bool,
}

struct StoredLine {
    order_id: i64,
    line_total: Decimal,
}

impl Default for InMemoryOrderRepository {
    fn default() -> Self {
        Self { state: RwLock::new(MemoryState { starting_order_id: 1, ..MemoryState::default() }) }
    }
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_menu<I>(menu: I) -> Self
    where
        I: IntoIterator<Item = (String, Decimal)>,
    {
        Self {
            state: RwLock::new(MemoryState {
                starting_order_id: 1,
                menu: menu.into_iter().collect(),
                ..MemoryState::default()
            }),
        }
    }

    pub async fn add_menu_item(&self, name: impl Into<String>, price: Decimal) {
        self.state.write().await.menu.insert(name.into(), price);
    }

    /// Id the next order will be assigned when no orders exist yet.
    pub async fn seed_next_order_id(&self, id: OrderId) {
        self.state.write().await.starting_order_id = id.0;
    }

    /// When set, every `insert_order_item` fails, regardless of the item.
    pub async fn fail_inserts(&self, fail: bool) {
        self.state.write().await.fail_inserts = fail;
    }

    pub async fn stored_line_count(&self, order_id: OrderId) -> usize {
        self.state.read().await.lines.iter().filter(|line| line.order_id == order_id.0).count()
    }
}

#[async_trait::async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn next_order_id(&self) -> Result<OrderId, RepositoryError> {
        let state = self.state.read().await;
        let next = state
            .lines
            .iter()
            .map(|line| line.order_id + 1)
            .max()
            .unwrap_or(state.starting_order_id);
        Ok(OrderId(next))
    }

    async fn insert_order_item(
        &self,
        item_name: &str,
        quantity: u32,
        order_id: OrderId,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        if state.fail_inserts {
            return Err(RepositoryError::Decode("injected insert failure".to_owned()));
        }

        let Some(price) = state.menu.get(item_name).copied() else {
            return Err(RepositoryError::UnknownItem(item_name.to_owned()));
        };

        let line_total = price * Decimal::from(quantity);
        state.lines.push(StoredLine { order_id: order_id.0, line_total });
        Ok(())
    }

    async fn insert_order_tracking(
        &self,
        order_id: OrderId,
        status: &str,
    ) -> Result<(), RepositoryError> {
        self.state.write().await.tracking.insert(order_id.0, status.to_owned());
        Ok(())
    }

    async fn total_order_price(&self, order_id: OrderId) -> Result<Decimal, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .lines
            .iter()
            .filter(|line| line.order_id == order_id.0)
            .map(|line| line.line_total)
            .sum())
    }

    async fn order_status(&self, order_id: OrderId) -> Result<Option<String>, RepositoryError> {
        Ok(self.state.read().await.tracking.get(&order_id.0).cloned())
    }
}
