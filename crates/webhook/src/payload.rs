use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use savory_core::domain::cart::SessionId;
use savory_core::params::OrderParams;

/// The platform's webhook envelope, as far as this backend reads it. The
/// platform sends considerably more; everything else is ignored on purpose.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    pub query_result: QueryResult,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub intent: IntentRef,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default)]
    pub output_contexts: Vec<OutputContext>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRef {
    pub display_name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct OutputContext {
    pub name: String,
}

/// The envelope reduced to what the dispatcher needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebhookCall {
    pub intent_name: String,
    pub params: OrderParams,
    pub session: SessionId,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("no output context carries a session id")]
    MissingSession,
}

impl WebhookRequest {
    /// Reduces the envelope: intent display name, flattened parameters, and
    /// the session id from the first output context that carries one.
    pub fn into_call(self) -> Result<WebhookCall, EnvelopeError> {
        let session = self
            .query_result
            .output_contexts
            .iter()
            .find_map(|context| extract_session_id(&context.name))
            .ok_or(EnvelopeError::MissingSession)?;

        let params = OrderParams::from_parameters(&self.query_result.parameters);

        Ok(WebhookCall { intent_name: self.query_result.intent.display_name, params, session })
    }
}

/// Pulls the session id out of a context resource name of the form
/// `projects/<project>/agent/sessions/<session>/contexts/<context>`.
pub fn extract_session_id(context_name: &str) -> Option<SessionId> {
    let mut segments = context_name.split('/');
    while let Some(segment) = segments.next() {
        if segment == "sessions" {
            return segments
                .next()
                .filter(|candidate| !candidate.is_empty())
                .map(SessionId::from);
        }
    }
    None
}
