use rust_decimal::Decimal;
use serde::Serialize;

use savory_core::domain::fulfillment::Fulfillment;

/// Outbound envelope: the platform reads `fulfillmentText` and speaks it;
/// the order fields ride along for any caller that wants structure.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub fulfillment_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_total: Option<Decimal>,
}

impl WebhookResponse {
    pub fn text(fulfillment_text: impl Into<String>) -> Self {
        Self { fulfillment_text: fulfillment_text.into(), order_id: None, order_total: None }
    }
}

impl From<Fulfillment> for WebhookResponse {
    fn from(fulfillment: Fulfillment) -> Self {
        Self {
            fulfillment_text: fulfillment.fulfillment_text,
            order_id: fulfillment.order_id.map(|id| id.0),
            order_total: fulfillment.order_total,
        }
    }
}
