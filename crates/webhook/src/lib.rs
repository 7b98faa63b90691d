//! Webhook envelope codec for the upstream conversational platform.
//!
//! Inbound: `queryResult` with the intent display name, the raw parameter
//! bag, and the output contexts the session id is threaded through.
//! Outbound: a `fulfillmentText` reply, plus order id/total when completion
//! produced them. Parameter-shape normalization happens here, once, before
//! any operation logic runs.

pub mod payload;
pub mod response;

pub use payload::{extract_session_id, EnvelopeError, WebhookCall, WebhookRequest};
pub use response::WebhookResponse;
