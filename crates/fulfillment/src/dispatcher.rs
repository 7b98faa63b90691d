use std::str::FromStr;

use tracing::{info, warn};

use savory_core::domain::cart::SessionId;
use savory_core::domain::fulfillment::Fulfillment;
use savory_core::errors::OrderError;
pub use savory_core::params::OrderParams;

use crate::operations::OrderService;

/// The closed set of intents the upstream agent is configured with. Anything
/// outside this set is configuration drift, not user error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    NewOrder,
    AddToOrder,
    RemoveFromOrder,
    CompleteOrder,
    TrackOrder,
}

impl Intent {
    pub const ALL: [Intent; 5] = [
        Intent::NewOrder,
        Intent::AddToOrder,
        Intent::RemoveFromOrder,
        Intent::CompleteOrder,
        Intent::TrackOrder,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::NewOrder => "new-order",
            Self::AddToOrder => "add-to-order",
            Self::RemoveFromOrder => "remove-from-order",
            Self::CompleteOrder => "complete-order",
            Self::TrackOrder => "track-order",
        }
    }
}

impl FromStr for Intent {
    type Err = OrderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|intent| intent.name() == value)
            .ok_or_else(|| OrderError::UnknownIntent(value.to_owned()))
    }
}

/// Maps an intent name to its handler and recovers operation failures into
/// user-facing text. Only `UnknownIntent` escapes as an error: the transport
/// must surface it as a server fault rather than a polite reply.
pub struct Dispatcher {
    service: OrderService,
}

impl Dispatcher {
    pub fn new(service: OrderService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &OrderService {
        &self.service
    }

    pub async fn dispatch(
        &self,
        intent_name: &str,
        params: &OrderParams,
        session: &SessionId,
    ) -> Result<Fulfillment, OrderError> {
        let intent = intent_name.parse::<Intent>().map_err(|error| {
            warn!(
                event_name = "dispatch.unknown_intent",
                intent = intent_name,
                session_id = %session,
                "intent outside the handler set; upstream intent configuration has drifted"
            );
            error
        })?;

        let outcome = match intent {
            Intent::NewOrder => Ok(self.service.start_order(session)),
            Intent::AddToOrder => {
                self.service.add_to_order(session, &params.food_items, &params.quantity_tokens)
            }
            Intent::RemoveFromOrder => {
                self.service.remove_from_order(session, &params.food_items, &params.quantity_tokens)
            }
            Intent::CompleteOrder => self.service.complete_order(session).await,
            Intent::TrackOrder => self.service.track_order(&params.quantity_tokens).await,
        };

        match outcome {
            Ok(fulfillment) => Ok(fulfillment),
            Err(error) => {
                info!(
                    event_name = "dispatch.recovered",
                    intent = intent.name(),
                    session_id = %session,
                    error = %error,
                    "operation failure converted to user-facing reply"
                );
                Ok(Fulfillment::text(error.user_message()))
            }
        }
    }
}
