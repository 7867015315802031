// File: crates/bookflow_scheduling/src/doc.rs

#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::actions::WizardAction;
use crate::calendar::{CalendarCursor, CellStatus, DayCell, MonthGrid};
use crate::draft::{BookingDraft, DraftField};
use crate::handlers::{CalendarQuery, SessionResponse, SlotsQuery, SlotsResponse};
use crate::validation::{FieldError, FieldErrorKind};
use crate::wizard::{Step, WizardView};
use bookflow_common::models::{ContactInfo, Requirements, SubmissionReceipt};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::get_calendar_handler,
        crate::handlers::get_slots_handler,
        crate::handlers::create_session_handler,
        crate::handlers::get_session_handler,
        crate::handlers::apply_action_handler,
        crate::handlers::delete_session_handler,
    ),
    components(
        schemas(
            CalendarQuery, SlotsQuery, SlotsResponse, SessionResponse, WizardView, WizardAction,
            Step, BookingDraft, DraftField, ContactInfo, Requirements, SubmissionReceipt,
            CalendarCursor, MonthGrid, DayCell, CellStatus, FieldError, FieldErrorKind
        )
    ),
    tags(
        (name = "Scheduling", description = "Schedule a Demo wizard")
    )
)]
pub struct SchedulingApiDoc;
