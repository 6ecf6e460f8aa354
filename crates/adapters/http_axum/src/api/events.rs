//! JSON REST handlers for event intake.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use auditflow_app::ports::{EventPublisher, FiringLog, RuleRepository};
use auditflow_domain::entity::EntityKind;
use auditflow_domain::event::{Event, EventKind};
use auditflow_domain::time::Timestamp;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for emitting a lifecycle event.
#[derive(Deserialize)]
pub struct EmitEventRequest {
    pub entity: EntityKind,
    pub event_type: EventKind,
    pub record_id: String,
    #[serde(default)]
    pub payload: serde_json::Value,
    /// Stamped with the current time when absent.
    #[serde(default)]
    pub occurred_at: Option<Timestamp>,
}

/// Possible responses from the emit endpoint.
pub enum EmitResponse {
    /// The event was accepted for asynchronous evaluation.
    Accepted(Json<Event>),
}

impl IntoResponse for EmitResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted(json) => (StatusCode::ACCEPTED, json).into_response(),
        }
    }
}

/// `POST /api/events` — accept a host lifecycle event.
///
/// Publication is fire-and-forget: the response confirms intake, not
/// evaluation. Firing outcomes are observed through `/api/firings`.
pub async fn emit<RR, FL, EP>(
    State(state): State<AppState<RR, FL, EP>>,
    Json(req): Json<EmitEventRequest>,
) -> Result<EmitResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    FL: FiringLog + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let mut event = Event::new(req.entity, req.event_type, req.record_id, req.payload);
    if let Some(occurred_at) = req.occurred_at {
        event.occurred_at = occurred_at;
    }
    state.publisher.publish(event.clone()).await?;
    Ok(EmitResponse::Accepted(Json(event)))
}
