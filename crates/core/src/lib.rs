pub mod config;
pub mod domain;
pub mod errors;
pub mod params;
pub mod quantity;

pub use domain::cart::{Cart, RemovalOutcome, SessionId};
pub use domain::fulfillment::Fulfillment;
pub use domain::order::{OrderId, PlacedOrder, STATUS_IN_PROGRESS};
pub use errors::OrderError;
pub use params::OrderParams;
pub use quantity::QuantityError;
