use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use savory_db::DbPool;
use savory_fulfillment::Dispatcher;
use savory_webhook::{WebhookRequest, WebhookResponse};

use crate::health;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub db_pool: DbPool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(handle_webhook))
        .route("/health", get(health::health))
        .with_state(state)
}

pub async fn handle_webhook(
    State(state): State<AppState>,
    Json(request): Json<WebhookRequest>,
) -> (StatusCode, Json<WebhookResponse>) {
    let correlation_id = Uuid::new_v4();

    let call = match request.into_call() {
        Ok(call) => call,
        Err(envelope_error) => {
            warn!(
                event_name = "webhook.bad_envelope",
                correlation_id = %correlation_id,
                error = %envelope_error,
                "rejecting webhook payload without a usable session"
            );
            return (
                StatusCode::BAD_REQUEST,
                Json(WebhookResponse::text(
                    "Sorry, I couldn't read that request. Please try again.",
                )),
            );
        }
    };

    info!(
        event_name = "webhook.received",
        correlation_id = %correlation_id,
        intent = %call.intent_name,
        session_id = %call.session,
        "webhook call received"
    );

    match state.dispatcher.dispatch(&call.intent_name, &call.params, &call.session).await {
        Ok(fulfillment) => (StatusCode::OK, Json(WebhookResponse::from(fulfillment))),
        Err(dispatch_error) => {
            // Only UnknownIntent escapes the dispatcher; everything else was
            // already recovered into a user-facing reply.
            error!(
                event_name = "webhook.unknown_intent",
                correlation_id = %correlation_id,
                intent = %call.intent_name,
                "no handler for dispatched intent"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(WebhookResponse::text(dispatch_error.user_message())),
            )
        }
    }
}
