//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod events;
#[allow(clippy::missing_errors_doc)]
pub mod firings;
#[allow(clippy::missing_errors_doc)]
pub mod rules;

use axum::Router;
use axum::routing::{get, post};

use auditflow_app::ports::{EventPublisher, FiringLog, RuleRepository};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<RR, FL, EP>() -> Router<AppState<RR, FL, EP>>
where
    RR: RuleRepository + Send + Sync + 'static,
    FL: FiringLog + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        // Rules
        .route(
            "/rules",
            get(rules::list::<RR, FL, EP>).post(rules::create::<RR, FL, EP>),
        )
        .route(
            "/rules/{id}",
            get(rules::get::<RR, FL, EP>)
                .patch(rules::update::<RR, FL, EP>)
                .delete(rules::delete::<RR, FL, EP>),
        )
        .route("/rules/{id}/toggle", post(rules::toggle::<RR, FL, EP>))
        .route("/rules/{id}/firings", get(rules::firings::<RR, FL, EP>))
        // Events
        .route("/events", post(events::emit::<RR, FL, EP>))
        // Firings
        .route("/firings", get(firings::list::<RR, FL, EP>))
}
