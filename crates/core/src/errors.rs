use thiserror::Error;

use crate::domain::cart::SessionId;

/// Everything that can go wrong inside an order operation or its dispatch.
///
/// Every variant is recovered at the operation boundary and converted into a
/// user-facing fulfillment text via [`OrderError::user_message`]; none of
/// them propagate as a crash. `UnknownIntent` is the one kind that also
/// signals an operational anomaly (upstream intent configuration drifted
/// away from this backend's handler set) and is logged as such by the
/// dispatcher.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("item and quantity parameters do not line up: {detail}")]
    ParameterMismatch { detail: String },
    #[error("unrecognized quantity token `{token}`")]
    InvalidQuantity { token: String },
    #[error("no in-flight order for session `{0}`")]
    SessionNotFound(SessionId),
    #[error("order persistence failed: {0}")]
    Persistence(String),
    #[error("unknown intent `{0}`")]
    UnknownIntent(String),
}

impl OrderError {
    /// The text the conversational agent should speak for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::ParameterMismatch { .. } => {
                "Sorry, I didn't receive matching food items and quantities. \
                 Can you specify both clearly?"
            }
            Self::InvalidQuantity { .. } => {
                "I couldn't read one of the quantities. \
                 Please use numbers or number words like \"two\"."
            }
            Self::SessionNotFound(_) => {
                "I'm having trouble finding your order. Can you place a new order, please?"
            }
            Self::Persistence(_) => {
                "Sorry, I couldn't process your order due to a backend error. \
                 Please place a new order again."
            }
            Self::UnknownIntent(_) => {
                "Sorry, something went wrong on our side. Please try again."
            }
        }
        .to_owned()
    }

    /// True for the kinds a user can recover from by rephrasing; false for
    /// the kinds that indicate a fault on our side.
    pub fn is_user_recoverable(&self) -> bool {
        !matches!(self, Self::Persistence(_) | Self::UnknownIntent(_))
    }
}
