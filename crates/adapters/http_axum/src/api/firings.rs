//! JSON REST handlers for the execution log.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use auditflow_app::ports::{EventPublisher, FiringLog, RuleRepository};
use auditflow_domain::firing::FiringRecord;

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 50;

/// Query parameters for the firing listing.
#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<FiringRecord>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/firings` — list recent firings, newest first.
pub async fn list<RR, FL, EP>(
    State(state): State<AppState<RR, FL, EP>>,
    Query(query): Query<ListQuery>,
) -> Result<ListResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    FL: FiringLog + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let firings = state.firing_log.get_recent(limit).await?;
    Ok(ListResponse::Ok(Json(firings)))
}
