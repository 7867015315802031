// --- File: crates/bookflow_scheduling/src/validation.rs ---
//! Per-field and per-step validation of a [`BookingDraft`].
//!
//! Everything here is a pure function of the draft (and, for the date step,
//! the catalog), so the wizard can recompute validity after every edit.

use crate::draft::{BookingDraft, DraftField};
use crate::wizard::Step;
use bookflow_common::services::AvailabilityCatalog;
use once_cell::sync::Lazy;
use regex::Regex;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};

// local@domain.tld, no whitespace, exactly one '@'
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// A leaf of the draft that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Text(DraftField),
    SelectedDate,
    SelectedTime,
}

impl Field {
    pub fn path(self) -> &'static str {
        match self {
            Field::Text(field) => field.path(),
            Field::SelectedDate => "selectedDate",
            Field::SelectedTime => "selectedTime",
        }
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.path())
    }
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    Missing,
    MalformedEmail,
    /// The chosen slot is not offered for the chosen date
    NotOffered,
    /// The chosen date lies before today
    InPast,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "contact.email"))]
    pub field: Field,
    pub kind: FieldErrorKind,
}

impl FieldError {
    fn new(field: Field, kind: FieldErrorKind) -> Self {
        Self { field, kind }
    }
}

fn require(draft: &BookingDraft, field: DraftField, errors: &mut Vec<FieldError>) -> bool {
    let present = draft
        .get(field)
        .is_some_and(|value| !value.trim().is_empty());
    if !present {
        errors.push(FieldError::new(Field::Text(field), FieldErrorKind::Missing));
    }
    present
}

/// Step 1: names, company and a well-formed email.
pub fn contact_errors(draft: &BookingDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();
    require(draft, DraftField::FirstName, &mut errors);
    require(draft, DraftField::LastName, &mut errors);
    if require(draft, DraftField::Email, &mut errors) && !is_valid_email(&draft.contact.email) {
        errors.push(FieldError::new(
            Field::Text(DraftField::Email),
            FieldErrorKind::MalformedEmail,
        ));
    }
    require(draft, DraftField::Company, &mut errors);
    errors
}

/// Step 2: a date no earlier than `today` and one of that date's slots.
pub fn schedule_errors(
    draft: &BookingDraft,
    catalog: &dyn AvailabilityCatalog,
    today: NaiveDate,
) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if draft.selected_date.is_some_and(|date| date < today) {
        errors.push(FieldError::new(Field::SelectedDate, FieldErrorKind::InPast));
    }
    match (draft.selected_date, draft.selected_time) {
        (None, _) => {
            errors.push(FieldError::new(Field::SelectedDate, FieldErrorKind::Missing));
            errors.push(FieldError::new(Field::SelectedTime, FieldErrorKind::Missing));
        }
        (Some(_), None) => {
            errors.push(FieldError::new(Field::SelectedTime, FieldErrorKind::Missing));
        }
        (Some(date), Some(time)) => {
            if !catalog.offers(date, time) {
                errors.push(FieldError::new(Field::SelectedTime, FieldErrorKind::NotOffered));
            }
        }
    }
    errors
}

/// Step 3: a use case. Integrations and additional info are optional.
pub fn requirements_errors(draft: &BookingDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();
    require(draft, DraftField::UseCase, &mut errors);
    errors
}

/// Errors that block leaving `step`. `Confirmed` has none.
pub fn step_errors(
    step: Step,
    draft: &BookingDraft,
    catalog: &dyn AvailabilityCatalog,
    today: NaiveDate,
) -> Vec<FieldError> {
    match step {
        Step::ContactInfo => contact_errors(draft),
        Step::DateTime => schedule_errors(draft, catalog, today),
        Step::Requirements => requirements_errors(draft),
        Step::Confirmed => Vec::new(),
    }
}

/// Errors across the whole draft; the final gate before submission.
pub fn draft_errors(
    draft: &BookingDraft,
    catalog: &dyn AvailabilityCatalog,
    today: NaiveDate,
) -> Vec<FieldError> {
    let mut errors = contact_errors(draft);
    errors.extend(schedule_errors(draft, catalog, today));
    errors.extend(requirements_errors(draft));
    errors
}
