// --- File: crates/bookflow_scheduling/src/routes.rs ---

use crate::handlers::{
    apply_action_handler, create_session_handler, delete_session_handler, get_calendar_handler,
    get_session_handler, get_slots_handler, SchedulingState,
};
use axum::{
    routing::{get, post},
    Router,
};
use bookflow_common::BookflowError;
use bookflow_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing all scheduling routes, building catalog,
/// sink and session store from `config`.
pub fn routes(config: Arc<AppConfig>) -> Result<Router, BookflowError> {
    let state = SchedulingState::from_config(&config)?;
    Ok(routes_with_state(Arc::new(state)))
}

/// Same routes over an already built state (tests, embedding).
pub fn routes_with_state(state: Arc<SchedulingState>) -> Router {
    Router::new()
        .route("/scheduling/calendar", get(get_calendar_handler))
        .route("/scheduling/slots", get(get_slots_handler))
        .route("/scheduling/sessions", post(create_session_handler))
        .route(
            "/scheduling/sessions/{id}",
            get(get_session_handler).delete(delete_session_handler),
        )
        .route(
            "/scheduling/sessions/{id}/actions",
            post(apply_action_handler),
        )
        .with_state(state)
}
