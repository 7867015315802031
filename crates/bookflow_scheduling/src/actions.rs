// --- File: crates/bookflow_scheduling/src/actions.rs ---

use crate::draft::DraftField;
use crate::wizard::{BookingWizard, WizardError};
use bookflow_common::models::hhmm;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

/// A user action forwarded by the browser shell.
///
/// ```json
/// { "action": "set_field", "field": "contact.email", "value": "ada@x.com" }
/// { "action": "select_time", "time": "10:00" }
/// { "action": "advance" }
/// ```
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WizardAction {
    SetField {
        field: DraftField,
        value: String,
    },
    ToggleIntegration {
        integration: String,
    },
    SelectDate {
        #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2025-09-02"))]
        date: NaiveDate,
    },
    SelectTime {
        #[serde(with = "hhmm")]
        #[cfg_attr(feature = "openapi", schema(value_type = String, example = "10:00"))]
        time: NaiveTime,
    },
    Advance,
    Retreat,
    Submit,
    NextMonth,
    PreviousMonth,
    ShowMonth {
        year: i32,
        month: u32,
    },
}

impl WizardAction {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            WizardAction::SetField { .. } => "set_field",
            WizardAction::ToggleIntegration { .. } => "toggle_integration",
            WizardAction::SelectDate { .. } => "select_date",
            WizardAction::SelectTime { .. } => "select_time",
            WizardAction::Advance => "advance",
            WizardAction::Retreat => "retreat",
            WizardAction::Submit => "submit",
            WizardAction::NextMonth => "next_month",
            WizardAction::PreviousMonth => "previous_month",
            WizardAction::ShowMonth { .. } => "show_month",
        }
    }
}

impl BookingWizard {
    /// Routes one action to the matching wizard operation.
    pub async fn apply(&mut self, action: WizardAction) -> Result<(), WizardError> {
        match action {
            WizardAction::SetField { field, value } => self.set_field(field, value),
            WizardAction::ToggleIntegration { integration } => {
                self.toggle_integration(&integration).map(|_| ())
            }
            WizardAction::SelectDate { date } => self.select_date(date),
            WizardAction::SelectTime { time } => self.select_time(time),
            WizardAction::Advance => self.advance().map(|_| ()),
            WizardAction::Retreat => self.retreat().map(|_| ()),
            WizardAction::Submit => self.submit().await.map(|_| ()),
            WizardAction::NextMonth => self.next_month(),
            WizardAction::PreviousMonth => self.previous_month(),
            WizardAction::ShowMonth { year, month } => self.show_month(year, month),
        }
    }
}
