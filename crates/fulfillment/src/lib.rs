//! Session-scoped order aggregation.
//!
//! The core of the fulfillment backend: a conversation session maps to an
//! in-flight cart, five intent handlers mutate or read it, and completed
//! carts are handed to the order repository.
//!
//! ```text
//! (intent, params, session) → Dispatcher → OrderService → CartStore
//!                                              ↓ (complete/track)
//!                                        OrderRepository
//! ```

pub mod cart_store;
pub mod dispatcher;
pub mod operations;

pub use cart_store::{CartStore, RemovalReport, RemovalRequest};
pub use dispatcher::{Dispatcher, Intent, OrderParams};
pub use operations::OrderService;
