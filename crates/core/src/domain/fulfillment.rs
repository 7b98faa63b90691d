use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order::OrderId;

/// Result descriptor handed back to the transport: the user-facing text plus
/// the order id and total when completion produced them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fulfillment {
    pub fulfillment_text: String,
    pub order_id: Option<OrderId>,
    pub order_total: Option<Decimal>,
}

impl Fulfillment {
    pub fn text(fulfillment_text: impl Into<String>) -> Self {
        Self { fulfillment_text: fulfillment_text.into(), order_id: None, order_total: None }
    }

    pub fn placed(fulfillment_text: impl Into<String>, id: OrderId, total: Decimal) -> Self {
        Self {
            fulfillment_text: fulfillment_text.into(),
            order_id: Some(id),
            order_total: Some(total),
        }
    }
}
