// --- File: crates/bookflow_common/src/models.rs ---

// Booking records shared between the scheduling wizard and the submission
// sinks that receive its output.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Contact details collected on the first wizard step.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub company_size: Option<String>,
}

/// What the prospect wants to see in the demo.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    pub use_case: String,
    /// Integration identifiers, e.g. "postgres", "s3". A set, so never duplicated.
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<String>))]
    pub integrations_needed: BTreeSet<String>,
    pub additional_info: Option<String>,
}

/// A completed booking, as handed to a submission sink.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub reference: Uuid,
    pub contact: ContactInfo,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2025-09-02"))]
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "10:00"))]
    pub time: NaiveTime,
    pub requirements: Requirements,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub submitted_at: DateTime<Utc>,
}

/// Acknowledgement returned by a sink that accepted a booking.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub reference: Uuid,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub accepted_at: DateTime<Utc>,
}

/// Serde adapter for times of day written as `HH:MM`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn format(time: &NaiveTime) -> String {
        time.format(FORMAT).to_string()
    }

    pub fn parse(value: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(value.trim(), FORMAT)
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|err| de::Error::custom(format!("invalid time '{raw}': {err}")))
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(time) => super::serialize(time, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            raw.map(|value| {
                super::parse(&value).map_err(|err| {
                    serde::de::Error::custom(format!("invalid time '{value}': {err}"))
                })
            })
            .transpose()
        }
    }
}
