// --- File: crates/bookflow_scheduling/src/draft.rs ---

use bookflow_common::models::{hhmm, ContactInfo, Requirements};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The in-progress booking assembled across wizard steps.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub contact: ContactInfo,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub selected_date: Option<NaiveDate>,
    #[serde(default, with = "hhmm::option")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub selected_time: Option<NaiveTime>,
    pub requirements: Requirements,
}

/// The free-text leaves of a [`BookingDraft`], addressed by the dotted
/// paths the browser form uses.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DraftField {
    #[serde(rename = "contact.firstName")]
    FirstName,
    #[serde(rename = "contact.lastName")]
    LastName,
    #[serde(rename = "contact.email")]
    Email,
    #[serde(rename = "contact.company")]
    Company,
    #[serde(rename = "contact.phone")]
    Phone,
    #[serde(rename = "contact.jobTitle")]
    JobTitle,
    #[serde(rename = "contact.companySize")]
    CompanySize,
    #[serde(rename = "requirements.useCase")]
    UseCase,
    #[serde(rename = "requirements.additionalInfo")]
    AdditionalInfo,
}

impl DraftField {
    pub const ALL: [DraftField; 9] = [
        DraftField::FirstName,
        DraftField::LastName,
        DraftField::Email,
        DraftField::Company,
        DraftField::Phone,
        DraftField::JobTitle,
        DraftField::CompanySize,
        DraftField::UseCase,
        DraftField::AdditionalInfo,
    ];

    pub fn path(self) -> &'static str {
        match self {
            DraftField::FirstName => "contact.firstName",
            DraftField::LastName => "contact.lastName",
            DraftField::Email => "contact.email",
            DraftField::Company => "contact.company",
            DraftField::Phone => "contact.phone",
            DraftField::JobTitle => "contact.jobTitle",
            DraftField::CompanySize => "contact.companySize",
            DraftField::UseCase => "requirements.useCase",
            DraftField::AdditionalInfo => "requirements.additionalInfo",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown draft field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for DraftField {
    type Err = UnknownField;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        DraftField::ALL
            .into_iter()
            .find(|field| field.path() == path)
            .ok_or_else(|| UnknownField(path.to_string()))
    }
}

/// Empty input clears an optional field instead of storing "".
fn optional(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl BookingDraft {
    /// Replaces exactly one text leaf.
    pub fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::FirstName => self.contact.first_name = value,
            DraftField::LastName => self.contact.last_name = value,
            DraftField::Email => self.contact.email = value,
            DraftField::Company => self.contact.company = value,
            DraftField::Phone => self.contact.phone = optional(value),
            DraftField::JobTitle => self.contact.job_title = optional(value),
            DraftField::CompanySize => self.contact.company_size = optional(value),
            DraftField::UseCase => self.requirements.use_case = value,
            DraftField::AdditionalInfo => self.requirements.additional_info = optional(value),
        }
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        match field {
            DraftField::FirstName => Some(&self.contact.first_name),
            DraftField::LastName => Some(&self.contact.last_name),
            DraftField::Email => Some(&self.contact.email),
            DraftField::Company => Some(&self.contact.company),
            DraftField::Phone => self.contact.phone.as_deref(),
            DraftField::JobTitle => self.contact.job_title.as_deref(),
            DraftField::CompanySize => self.contact.company_size.as_deref(),
            DraftField::UseCase => Some(&self.requirements.use_case),
            DraftField::AdditionalInfo => self.requirements.additional_info.as_deref(),
        }
    }

    /// Adds `integration` if absent, removes it if present.
    /// Returns whether it is selected afterwards.
    pub fn toggle_integration(&mut self, integration: &str) -> bool {
        let integrations = &mut self.requirements.integrations_needed;
        if integrations.remove(integration) {
            false
        } else {
            integrations.insert(integration.to_string());
            true
        }
    }
}
