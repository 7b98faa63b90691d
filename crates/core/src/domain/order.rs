use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Numeric identifier assigned by the persistence layer when an order is
/// finalized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub i64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tracking status a freshly placed order starts in.
pub const STATUS_IN_PROGRESS: &str = "in progress";

/// A finalized order as returned to the caller at completion time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub id: OrderId,
    pub total: Decimal,
}
