//! JSON REST handlers for the rule catalogue.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use auditflow_app::ports::{EventPublisher, FiringLog, RuleRepository};
use auditflow_domain::error::{ValidationError, WorkflowError};
use auditflow_domain::firing::FiringRecord;
use auditflow_domain::id::RuleId;
use auditflow_domain::rule::{Action, RulePatch, Trigger, WorkflowRule};

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_FIRING_LIMIT: usize = 50;

/// Request body for creating a rule.
#[derive(Deserialize)]
pub struct CreateRuleRequest {
    pub name: String,
    pub description: String,
    pub enabled: Option<bool>,
    pub trigger: Trigger,
    pub actions: Vec<Action>,
}

/// Query parameters for the per-rule firing listing.
#[derive(Deserialize)]
pub struct FiringsQuery {
    pub limit: Option<usize>,
}

fn parse_rule_id(id: &str) -> Result<RuleId, ApiError> {
    RuleId::from_str(id).map_err(|_| {
        ApiError::from(WorkflowError::Validation(ValidationError::InvalidId(
            id.to_string(),
        )))
    })
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<WorkflowRule>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get, update, and toggle endpoints.
pub enum GetResponse {
    Ok(Json<WorkflowRule>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<WorkflowRule>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Possible responses from the per-rule firing listing.
pub enum FiringsResponse {
    Ok(Json<Vec<FiringRecord>>),
}

impl IntoResponse for FiringsResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/rules` — list the catalogue in insertion order.
pub async fn list<RR, FL, EP>(
    State(state): State<AppState<RR, FL, EP>>,
) -> Result<ListResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    FL: FiringLog + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let rules = state.rule_service.list_rules().await?;
    Ok(ListResponse::Ok(Json(rules)))
}

/// `GET /api/rules/:id` — get rule by ID.
pub async fn get<RR, FL, EP>(
    State(state): State<AppState<RR, FL, EP>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    FL: FiringLog + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let rule_id = parse_rule_id(&id)?;
    let rule = state.rule_service.get_rule(rule_id).await?;
    Ok(GetResponse::Ok(Json(rule)))
}

/// `POST /api/rules` — create a new rule.
pub async fn create<RR, FL, EP>(
    State(state): State<AppState<RR, FL, EP>>,
    Json(req): Json<CreateRuleRequest>,
) -> Result<CreateResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    FL: FiringLog + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let mut builder = WorkflowRule::builder()
        .name(req.name)
        .description(req.description)
        .trigger(req.trigger);

    if let Some(enabled) = req.enabled {
        builder = builder.enabled(enabled);
    }

    for a in req.actions {
        builder = builder.action(a);
    }

    let rule = builder.build()?;
    let created = state.rule_service.create_rule(rule).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PATCH /api/rules/:id` — merge a partial update into a rule.
pub async fn update<RR, FL, EP>(
    State(state): State<AppState<RR, FL, EP>>,
    Path(id): Path<String>,
    Json(patch): Json<RulePatch>,
) -> Result<GetResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    FL: FiringLog + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let rule_id = parse_rule_id(&id)?;
    let updated = state.rule_service.update_rule(rule_id, patch).await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/rules/:id` — delete a rule. Deleting an absent rule
/// still returns `204 No Content`.
pub async fn delete<RR, FL, EP>(
    State(state): State<AppState<RR, FL, EP>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    FL: FiringLog + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let rule_id = parse_rule_id(&id)?;
    state.rule_service.delete_rule(rule_id).await?;
    Ok(DeleteResponse::NoContent)
}

/// `POST /api/rules/:id/toggle` — flip the enabled flag.
pub async fn toggle<RR, FL, EP>(
    State(state): State<AppState<RR, FL, EP>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    FL: FiringLog + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let rule_id = parse_rule_id(&id)?;
    let toggled = state.rule_service.toggle_rule(rule_id).await?;
    Ok(GetResponse::Ok(Json(toggled)))
}

/// `GET /api/rules/:id/firings` — list recent firings of one rule.
pub async fn firings<RR, FL, EP>(
    State(state): State<AppState<RR, FL, EP>>,
    Path(id): Path<String>,
    Query(query): Query<FiringsQuery>,
) -> Result<FiringsResponse, ApiError>
where
    RR: RuleRepository + Send + Sync + 'static,
    FL: FiringLog + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    let rule_id = parse_rule_id(&id)?;
    let limit = query.limit.unwrap_or(DEFAULT_FIRING_LIMIT);
    let firings = state.firing_log.find_by_rule(rule_id, limit).await?;
    Ok(FiringsResponse::Ok(Json(firings)))
}
