// File: crates/bookflow_scheduling/src/handlers.rs
use crate::actions::WizardAction;
use crate::calendar::{generate_month, CalendarCursor, MonthGrid};
use crate::catalog::catalog_from_config;
use crate::session::SessionStore;
use crate::sink::sink_from_config;
use crate::wizard::{BookingWizard, WizardError, WizardView};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use bookflow_common::models::hhmm;
use bookflow_common::services::{AvailabilityCatalog, SubmissionSink};
use bookflow_common::{
    config_error, conflict, external_service_error, not_found, parse_error, validation_error,
    BookflowError, HttpStatusCode,
};
use bookflow_config::AppConfig;
use chrono::{Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

// Shared state for the scheduling handlers
pub struct SchedulingState {
    pub catalog: Arc<dyn AvailabilityCatalog>,
    pub sink: Arc<dyn SubmissionSink>,
    pub sessions: SessionStore,
    pub time_zone: Tz,
    fixed_today: Option<NaiveDate>,
}

impl SchedulingState {
    pub fn new(
        catalog: Arc<dyn AvailabilityCatalog>,
        sink: Arc<dyn SubmissionSink>,
        time_zone: Tz,
        session_ttl: Duration,
    ) -> Self {
        Self {
            catalog,
            sink,
            sessions: SessionStore::new(session_ttl),
            time_zone,
            fixed_today: None,
        }
    }

    /// Builds catalog, sink and session store from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, BookflowError> {
        let time_zone: Tz = config
            .scheduling
            .time_zone
            .parse()
            .map_err(|_| config_error(format!("unknown time zone '{}'", config.scheduling.time_zone)))?;
        let catalog = catalog_from_config(&config.scheduling.catalog).map_err(config_error)?;
        let sink = sink_from_config(&config.submission).map_err(config_error)?;
        info!(
            "Scheduling configured: zone={}, sink={:?}, session ttl={}m",
            time_zone, config.submission.kind, config.session.ttl_minutes
        );
        Ok(Self::new(
            catalog,
            sink,
            time_zone,
            Duration::minutes(config.session.ttl_minutes),
        ))
    }

    /// Pins "today" instead of reading the clock.
    pub fn with_fixed_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    /// The current day in the configured zone.
    pub fn today(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| Utc::now().with_timezone(&self.time_zone).date_naive())
    }
}

type HandlerError = (StatusCode, String);

impl From<WizardError> for BookflowError {
    fn from(err: WizardError) -> Self {
        match &err {
            WizardError::StepIncomplete { .. }
            | WizardError::DraftIncomplete(_)
            | WizardError::BlankIntegration => validation_error(&err),
            WizardError::NotAllowed { .. }
            | WizardError::Finalized
            | WizardError::DateUnavailable(_)
            | WizardError::DateInPast(_)
            | WizardError::NoDateSelected
            | WizardError::SlotUnavailable { .. } => conflict(&err),
            WizardError::Calendar(_) => parse_error(&err),
            WizardError::Submission(reason) => external_service_error("submission sink", reason),
        }
    }
}

fn error_response(err: BookflowError) -> HandlerError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, err.to_string())
}

fn wizard_error(err: WizardError) -> HandlerError {
    error_response(err.into())
}

fn unknown_session(id: Uuid) -> HandlerError {
    error_response(not_found(format!("session {}", id)))
}

// --- Request / response types ---

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct CalendarQuery {
    /// Defaults to the current year
    pub year: Option<i32>,
    /// 1-12, defaults to the current month
    pub month: Option<u32>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct SlotsQuery {
    /// Date in YYYY-MM-DD format
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2025-09-02"))]
    pub date: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotsResponse {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub date: NaiveDate,
    /// HH:MM, in order
    pub slots: Vec<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SessionResponse {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub session_id: Uuid,
    #[serde(flatten)]
    pub view: WizardView,
}

// --- Handlers ---

/// Month grid for the date picker.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/scheduling/calendar",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Month grid", body = MonthGrid),
        (status = 400, description = "Invalid year or month")
    ),
    tag = "Scheduling"
))]
pub async fn get_calendar_handler(
    State(state): State<Arc<SchedulingState>>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<MonthGrid>, HandlerError> {
    let today = state.today();
    let current = CalendarCursor::containing(today);
    let year = query.year.unwrap_or(current.year());
    let month = query.month.unwrap_or(current.month());

    let grid = generate_month(year, month, state.catalog.as_ref(), today, None)
        .map_err(|err| error_response(parse_error(err)))?;
    Ok(Json(grid))
}

/// Slots offered on one date.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/scheduling/slots",
    params(SlotsQuery),
    responses(
        (status = 200, description = "Slots for the date, possibly empty", body = SlotsResponse),
        (status = 400, description = "Invalid date format")
    ),
    tag = "Scheduling"
))]
pub async fn get_slots_handler(
    State(state): State<Arc<SchedulingState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, HandlerError> {
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d")
        .map_err(|_| error_response(parse_error("Invalid date format (YYYY-MM-DD)")))?;
    let slots = state.catalog.lookup(date).iter().map(hhmm::format).collect();
    Ok(Json(SlotsResponse { date, slots }))
}

/// Starts a new scheduling session.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/scheduling/sessions",
    responses(
        (status = 201, description = "Session created", body = SessionResponse)
    ),
    tag = "Scheduling"
))]
pub async fn create_session_handler(
    State(state): State<Arc<SchedulingState>>,
) -> Result<(StatusCode, Json<SessionResponse>), HandlerError> {
    state.sessions.prune(Utc::now()).await;

    let wizard = BookingWizard::new(
        Arc::clone(&state.catalog),
        Arc::clone(&state.sink),
        state.today(),
    );
    let view = wizard.view().map_err(wizard_error)?;
    let (session_id, _) = state.sessions.insert(wizard).await;
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse { session_id, view }),
    ))
}

/// Current state of a session.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/scheduling/sessions/{id}",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session state", body = SessionResponse),
        (status = 404, description = "Unknown session")
    ),
    tag = "Scheduling"
))]
pub async fn get_session_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, HandlerError> {
    let wizard = state.sessions.get(id).await.ok_or_else(|| unknown_session(id))?;
    let mut wizard = wizard.lock().await;
    wizard.set_today(state.today());
    let view = wizard.view().map_err(wizard_error)?;
    Ok(Json(SessionResponse {
        session_id: id,
        view,
    }))
}

/// Applies one user action to a session.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/scheduling/sessions/{id}/actions",
    params(("id" = String, Path, description = "Session id")),
    request_body = WizardAction,
    responses(
        (status = 200, description = "Action applied", body = SessionResponse),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "Action not allowed in the current state"),
        (status = 422, description = "Current step is incomplete"),
        (status = 502, description = "Submission sink failed")
    ),
    tag = "Scheduling"
))]
pub async fn apply_action_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(id): Path<Uuid>,
    Json(action): Json<WizardAction>,
) -> Result<Json<SessionResponse>, HandlerError> {
    let wizard = state.sessions.get(id).await.ok_or_else(|| unknown_session(id))?;
    let mut wizard = wizard.lock().await;
    wizard.set_today(state.today());

    let name = action.name();
    if let Err(err) = wizard.apply(action).await {
        debug!("Session {}: {} rejected: {}", id, name, err);
        return Err(wizard_error(err));
    }

    let view = wizard.view().map_err(wizard_error)?;
    Ok(Json(SessionResponse {
        session_id: id,
        view,
    }))
}

/// Discards a session.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/scheduling/sessions/{id}",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 204, description = "Session discarded"),
        (status = 404, description = "Unknown session")
    ),
    tag = "Scheduling"
))]
pub async fn delete_session_handler(
    State(state): State<Arc<SchedulingState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HandlerError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(unknown_session(id))
    }
}
