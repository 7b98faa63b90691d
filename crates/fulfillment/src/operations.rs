use std::sync::Arc;

use tracing::{debug, info, warn};

use savory_core::domain::cart::{Cart, SessionId};
use savory_core::domain::fulfillment::Fulfillment;
use savory_core::domain::order::{OrderId, PlacedOrder, STATUS_IN_PROGRESS};
use savory_core::errors::OrderError;
use savory_core::quantity;
use savory_db::OrderRepository;

use crate::cart_store::{CartStore, RemovalRequest};

/// The order operations: five handlers over the cart store and the order
/// repository. Each produces a [`Fulfillment`] descriptor; failures surface
/// as [`OrderError`] and are recovered into user-facing text by the
/// dispatcher.
pub struct OrderService {
    store: Arc<CartStore>,
    orders: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(store: Arc<CartStore>, orders: Arc<dyn OrderRepository>) -> Self {
        Self { store, orders }
    }

    pub fn store(&self) -> &Arc<CartStore> {
        &self.store
    }

    /// `new-order`: unconditionally resets the session to an empty cart.
    pub fn start_order(&self, session: &SessionId) -> Fulfillment {
        let cleared = self.store.start(session);
        info!(
            event_name = "order.start",
            session_id = %session,
            cleared,
            "order session reset"
        );

        if cleared {
            Fulfillment::text(
                "Your previous order has been cleared. Starting a new order. \
                 What would you like?",
            )
        } else {
            Fulfillment::text("Starting a new order. What would you like?")
        }
    }

    /// `add-to-order`: parallel item/quantity sequences merged into the cart
    /// (overwrite-merge). No partial application: the first bad quantity
    /// token aborts the whole call before any mutation.
    pub fn add_to_order(
        &self,
        session: &SessionId,
        food_items: &[String],
        quantity_tokens: &[String],
    ) -> Result<Fulfillment, OrderError> {
        if food_items.len() != quantity_tokens.len() {
            return Err(OrderError::ParameterMismatch {
                detail: format!(
                    "{} items against {} quantities",
                    food_items.len(),
                    quantity_tokens.len()
                ),
            });
        }

        let mut pairs = Vec::with_capacity(food_items.len());
        for (item, token) in food_items.iter().zip(quantity_tokens) {
            let quantity = quantity::normalize(token)
                .map_err(|_| OrderError::InvalidQuantity { token: token.clone() })?;
            pairs.push((item.clone(), quantity));
        }

        let cart = self.store.merge(session, Cart::from_pairs(pairs));
        info!(
            event_name = "order.add",
            session_id = %session,
            item_count = food_items.len(),
            cart_size = cart.len(),
            "items merged into order"
        );

        Ok(Fulfillment::text(format!(
            "So far you have ordered: {}. Do you need anything else?",
            cart.render()
        )))
    }

    /// `remove-from-order`: per-item removal against an existing cart.
    /// Quantities are optional as a whole: no quantities means each named
    /// item is removed entirely; otherwise the counts must match.
    pub fn remove_from_order(
        &self,
        session: &SessionId,
        food_items: &[String],
        quantity_tokens: &[String],
    ) -> Result<Fulfillment, OrderError> {
        let requests = removal_requests(food_items, quantity_tokens)?;

        let Some(report) = self.store.remove_items(session, &requests) else {
            return Err(OrderError::SessionNotFound(session.clone()));
        };

        debug!(
            event_name = "order.remove",
            session_id = %session,
            removed = report.removed.len(),
            updated = report.updated.len(),
            missing = report.missing.len(),
            "removal pass applied"
        );

        let mut parts = Vec::new();
        if !report.removed.is_empty() {
            parts.push(format!("Removed {} from your order!", report.removed.join(", ")));
        }
        if !report.updated.is_empty() {
            parts.push(format!(
                "Updated quantities for {} in your order.",
                report.updated.join(", ")
            ));
        }
        if report.removed.is_empty() && report.updated.is_empty() {
            parts.push("No items were removed.".to_owned());
        }
        if !report.missing.is_empty() {
            parts.push(format!(
                "Your current order does not have {}.",
                report.missing.join(", ")
            ));
        }
        if report.remaining.is_empty() {
            parts.push("Your order is empty!".to_owned());
        } else {
            parts.push(format!(
                "Here is what is left in your order: {}.",
                report.remaining.render()
            ));
        }

        Ok(Fulfillment::text(parts.join(" ")))
    }

    /// `complete-order`: takes the cart out of the store (deleted regardless
    /// of what persistence does next), persists it item-by-item, then
    /// reports the assigned order id and total.
    pub async fn complete_order(&self, session: &SessionId) -> Result<Fulfillment, OrderError> {
        let Some(cart) = self.store.take(session) else {
            return Err(OrderError::SessionNotFound(session.clone()));
        };

        let placed = self.persist_order(&cart).await.map_err(|error| {
            warn!(
                event_name = "order.complete.persistence_failed",
                session_id = %session,
                error = %error,
                "discarding cart after persistence failure"
            );
            OrderError::Persistence(error.to_string())
        })?;

        info!(
            event_name = "order.complete",
            session_id = %session,
            order_id = %placed.id,
            order_total = %placed.total,
            "order placed"
        );

        Ok(Fulfillment::placed(
            format!(
                "Awesome. We have placed your order. Here is your order id # {}. \
                 Your order total is {} which you can pay at the time of delivery!",
                placed.id, placed.total
            ),
            placed.id,
            placed.total,
        ))
    }

    /// `track-order`: read-only status lookup by numeric order id; never
    /// touches the cart store.
    pub async fn track_order(&self, id_tokens: &[String]) -> Result<Fulfillment, OrderError> {
        let Some(order_id) = id_tokens.first().and_then(|token| token.parse::<i64>().ok()) else {
            return Ok(Fulfillment::text(
                "I couldn't find an order id in your request. Which order should I track?",
            ));
        };
        let order_id = OrderId(order_id);

        let status = self
            .orders
            .order_status(order_id)
            .await
            .map_err(|error| OrderError::Persistence(error.to_string()))?;

        Ok(match status {
            Some(status) => Fulfillment::text(format!(
                "The order status for order id {order_id} is: {status}"
            )),
            None => Fulfillment::text(format!("No order found with order id: {order_id}")),
        })
    }

    async fn persist_order(&self, cart: &Cart) -> Result<PlacedOrder, savory_db::RepositoryError> {
        let order_id = self.orders.next_order_id().await?;

        for (item, quantity) in cart.iter() {
            self.orders.insert_order_item(item, quantity, order_id).await?;
        }
        self.orders.insert_order_tracking(order_id, STATUS_IN_PROGRESS).await?;

        let total = self.orders.total_order_price(order_id).await?;
        Ok(PlacedOrder { id: order_id, total })
    }
}

fn removal_requests(
    food_items: &[String],
    quantity_tokens: &[String],
) -> Result<Vec<RemovalRequest>, OrderError> {
    if quantity_tokens.is_empty() {
        return Ok(food_items
            .iter()
            .map(|item| RemovalRequest { item: item.clone(), quantity: None })
            .collect());
    }

    if food_items.len() != quantity_tokens.len() {
        return Err(OrderError::ParameterMismatch {
            detail: format!(
                "{} items against {} quantities",
                food_items.len(),
                quantity_tokens.len()
            ),
        });
    }

    food_items
        .iter()
        .zip(quantity_tokens)
        .map(|(item, token)| {
            let quantity = quantity::normalize(token)
                .map_err(|_| OrderError::InvalidQuantity { token: token.clone() })?;
            Ok(RemovalRequest { item: item.clone(), quantity: Some(quantity) })
        })
        .collect()
}
