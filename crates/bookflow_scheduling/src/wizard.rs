// --- File: crates/bookflow_scheduling/src/wizard.rs ---
//! The "Schedule a Demo" state machine.
//!
//! `ContactInfo -> DateTime -> Requirements -> Confirmed`, strictly linear.
//! Forward moves are gated by the current step's validity, backward moves
//! keep everything the user entered, and `Confirmed` is terminal.

use crate::calendar::{CalendarCursor, CalendarError, MonthGrid};
use crate::draft::{BookingDraft, DraftField};
use crate::validation::{self, FieldError};
use bookflow_common::models::{hhmm, BookingRequest, SubmissionReceipt};
use bookflow_common::services::{AvailabilityCatalog, SubmissionError, SubmissionSink};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    ContactInfo,
    DateTime,
    Requirements,
    Confirmed,
}

impl Step {
    /// 1-based position shown in the progress indicator.
    pub fn number(self) -> u8 {
        match self {
            Step::ContactInfo => 1,
            Step::DateTime => 2,
            Step::Requirements => 3,
            Step::Confirmed => 4,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("Step {} is not complete", .step.number())]
    StepIncomplete {
        step: Step,
        errors: Vec<FieldError>,
    },
    #[error("Booking draft is not complete")]
    DraftIncomplete(Vec<FieldError>),
    #[error("Cannot {action} from step {}", .step.number())]
    NotAllowed { action: &'static str, step: Step },
    #[error("Booking is already confirmed")]
    Finalized,
    #[error("No availability on {0}")]
    DateUnavailable(NaiveDate),
    #[error("{0} is in the past")]
    DateInPast(NaiveDate),
    #[error("No date selected")]
    NoDateSelected,
    #[error("{} is not offered on {date}", hhmm::format(.time))]
    SlotUnavailable { date: NaiveDate, time: NaiveTime },
    #[error("Integration identifier must not be blank")]
    BlankIntegration,
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error("Booking could not be submitted: {0}")]
    Submission(#[from] SubmissionError),
}

/// Everything the host UI needs to render the wizard.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    pub step: Step,
    pub step_number: u8,
    pub step_valid: bool,
    pub field_errors: Vec<FieldError>,
    pub draft: BookingDraft,
    pub cursor: CalendarCursor,
    pub calendar: MonthGrid,
    /// Slots of the selected date, HH:MM
    pub available_slots: Vec<String>,
    pub submission_error: Option<String>,
    pub receipt: Option<SubmissionReceipt>,
}

/// One scheduling session.
///
/// Collaborators are injected; the wizard holds no ambient state.
pub struct BookingWizard {
    catalog: Arc<dyn AvailabilityCatalog>,
    sink: Arc<dyn SubmissionSink>,
    today: NaiveDate,
    step: Step,
    draft: BookingDraft,
    cursor: CalendarCursor,
    step_valid: bool,
    submission_error: Option<String>,
    receipt: Option<SubmissionReceipt>,
}

impl BookingWizard {
    /// Starts a fresh session on step 1 with the calendar on `today`'s month.
    pub fn new(
        catalog: Arc<dyn AvailabilityCatalog>,
        sink: Arc<dyn SubmissionSink>,
        today: NaiveDate,
    ) -> Self {
        let mut wizard = Self {
            catalog,
            sink,
            today,
            step: Step::ContactInfo,
            draft: BookingDraft::default(),
            cursor: CalendarCursor::containing(today),
            step_valid: false,
            submission_error: None,
            receipt: None,
        };
        wizard.refresh_validity();
        wizard
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn cursor(&self) -> CalendarCursor {
        self.cursor
    }

    pub fn step_valid(&self) -> bool {
        self.step_valid
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn submission_error(&self) -> Option<&str> {
        self.submission_error.as_deref()
    }

    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        self.receipt.as_ref()
    }

    pub fn is_confirmed(&self) -> bool {
        self.step == Step::Confirmed
    }

    /// Moves the wizard's notion of the current day, e.g. across midnight.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
        self.refresh_validity();
    }

    /// Validation errors of the current step.
    pub fn field_errors(&self) -> Vec<FieldError> {
        validation::step_errors(self.step, &self.draft, self.catalog.as_ref(), self.today)
    }

    fn refresh_validity(&mut self) {
        self.step_valid = self.field_errors().is_empty();
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        if self.is_confirmed() {
            debug!("Rejected edit: booking already confirmed");
            return Err(WizardError::Finalized);
        }
        Ok(())
    }

    // --- Field mutation ---

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.draft.set(field, value.into());
        self.refresh_validity();
        Ok(())
    }

    /// Flips membership of `integration`; returns whether it is now selected.
    pub fn toggle_integration(&mut self, integration: &str) -> Result<bool, WizardError> {
        self.ensure_editable()?;
        let integration = integration.trim();
        if integration.is_empty() {
            return Err(WizardError::BlankIntegration);
        }
        let selected = self.draft.toggle_integration(integration);
        self.refresh_validity();
        Ok(selected)
    }

    // --- Date and time selection ---

    /// Slots the UI may offer: those of the selected date, in order.
    pub fn available_slots(&self) -> Vec<NaiveTime> {
        self.draft
            .selected_date
            .map(|date| self.catalog.lookup(date))
            .unwrap_or_default()
    }

    /// Picks a date. Clears any previously chosen time.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), WizardError> {
        self.ensure_editable()?;
        if date < self.today {
            debug!("Rejected date {}: before {}", date, self.today);
            return Err(WizardError::DateInPast(date));
        }
        if !self.catalog.has_slots(date) {
            debug!("Rejected date {}: no slots in catalog", date);
            return Err(WizardError::DateUnavailable(date));
        }
        self.draft.selected_date = Some(date);
        self.draft.selected_time = None;
        self.refresh_validity();
        Ok(())
    }

    pub fn select_time(&mut self, time: NaiveTime) -> Result<(), WizardError> {
        self.ensure_editable()?;
        let date = self.draft.selected_date.ok_or(WizardError::NoDateSelected)?;
        if !self.catalog.offers(date, time) {
            debug!("Rejected time {} on {}: not offered", time, date);
            return Err(WizardError::SlotUnavailable { date, time });
        }
        self.draft.selected_time = Some(time);
        self.refresh_validity();
        Ok(())
    }

    // --- Calendar browsing ---

    pub fn next_month(&mut self) -> Result<(), WizardError> {
        self.cursor = self.cursor.next()?;
        Ok(())
    }

    pub fn previous_month(&mut self) -> Result<(), WizardError> {
        self.cursor = self.cursor.previous()?;
        Ok(())
    }

    pub fn show_month(&mut self, year: i32, month: u32) -> Result<(), WizardError> {
        self.cursor = CalendarCursor::new(year, month)?;
        Ok(())
    }

    /// The grid for the displayed month, re-queried from the catalog.
    pub fn calendar(&self) -> Result<MonthGrid, CalendarError> {
        self.cursor
            .grid(self.catalog.as_ref(), self.today, self.draft.selected_date)
    }

    // --- Step navigation ---

    /// Moves forward one step if the current step is valid.
    ///
    /// `Requirements` is left through [`submit`](Self::submit) only.
    pub fn advance(&mut self) -> Result<Step, WizardError> {
        let next = match self.step {
            Step::ContactInfo => Step::DateTime,
            Step::DateTime => Step::Requirements,
            Step::Requirements | Step::Confirmed => {
                return Err(WizardError::NotAllowed {
                    action: "advance",
                    step: self.step,
                })
            }
        };
        let errors = self.field_errors();
        if !errors.is_empty() {
            debug!("Advance from step {} rejected: {:?}", self.step.number(), errors);
            self.step_valid = false;
            return Err(WizardError::StepIncomplete {
                step: self.step,
                errors,
            });
        }
        self.step = next;
        self.refresh_validity();
        debug!("Advanced to step {}", self.step.number());
        Ok(self.step)
    }

    /// Moves back one step from `DateTime` or `Requirements`. Keeps the draft.
    pub fn retreat(&mut self) -> Result<Step, WizardError> {
        let previous = match self.step {
            Step::DateTime => Step::ContactInfo,
            Step::Requirements => Step::DateTime,
            Step::ContactInfo | Step::Confirmed => {
                return Err(WizardError::NotAllowed {
                    action: "retreat",
                    step: self.step,
                })
            }
        };
        self.step = previous;
        self.refresh_validity();
        debug!("Retreated to step {}", self.step.number());
        Ok(self.step)
    }

    /// Validates the whole draft and hands it to the submission sink.
    ///
    /// On success the wizard becomes `Confirmed`. On any failure it stays on
    /// `Requirements` with the draft untouched, so calling `submit` again is
    /// a safe retry.
    pub async fn submit(&mut self) -> Result<SubmissionReceipt, WizardError> {
        if self.step != Step::Requirements {
            return Err(WizardError::NotAllowed {
                action: "submit",
                step: self.step,
            });
        }
        let step_errors = self.field_errors();
        if !step_errors.is_empty() {
            self.step_valid = false;
            return Err(WizardError::StepIncomplete {
                step: self.step,
                errors: step_errors,
            });
        }

        let booking = match self.finalize() {
            Ok(booking) => booking,
            Err(errors) => {
                let err = WizardError::DraftIncomplete(errors);
                self.submission_error = Some(err.to_string());
                return Err(err);
            }
        };

        let reference = booking.reference;
        info!(
            "Submitting demo booking {} for {} on {} at {}",
            reference,
            booking.contact.email,
            booking.date,
            hhmm::format(&booking.time)
        );
        let sink = Arc::clone(&self.sink);
        match sink.submit(booking).await {
            Ok(receipt) => {
                info!("Demo booking {} confirmed", reference);
                self.step = Step::Confirmed;
                self.step_valid = true;
                self.submission_error = None;
                self.receipt = Some(receipt.clone());
                Ok(receipt)
            }
            Err(err) => {
                error!("Demo booking {} failed: {}", reference, err);
                self.submission_error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Builds the sink payload, or every error that prevents it.
    fn finalize(&self) -> Result<BookingRequest, Vec<FieldError>> {
        let errors = validation::draft_errors(&self.draft, self.catalog.as_ref(), self.today);
        match (self.draft.selected_date, self.draft.selected_time) {
            (Some(date), Some(time)) if errors.is_empty() => Ok(BookingRequest {
                reference: Uuid::new_v4(),
                contact: self.draft.contact.clone(),
                date,
                time,
                requirements: self.draft.requirements.clone(),
                submitted_at: Utc::now(),
            }),
            _ => Err(errors),
        }
    }

    // --- Rendering ---

    pub fn view(&self) -> Result<WizardView, WizardError> {
        Ok(WizardView {
            step: self.step,
            step_number: self.step.number(),
            step_valid: self.step_valid,
            field_errors: self.field_errors(),
            draft: self.draft.clone(),
            cursor: self.cursor,
            calendar: self.calendar()?,
            available_slots: self.available_slots().iter().map(hhmm::format).collect(),
            submission_error: self.submission_error.clone(),
            receipt: self.receipt.clone(),
        })
    }
}
