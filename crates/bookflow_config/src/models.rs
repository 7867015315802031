// --- File: crates/bookflow_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Availability Catalog Config ---
/// One row of the static availability table.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct AvailabilityEntry {
    /// Calendar date in YYYY-MM-DD format
    pub date: String,
    /// Bookable times of day in HH:MM format
    #[serde(default)]
    pub slots: Vec<String>,
}

/// Where the wizard's bookable slots come from.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogConfig {
    /// A fixed table of dates and times.
    Static {
        #[serde(default)]
        entries: Vec<AvailabilityEntry>,
    },
    /// Recurring office hours, e.g. Mon-Fri 09:00-17:00 in hourly slots.
    WorkingHours {
        working_days: Vec<String>, // "Mon", "Tue", ...
        start_time: String,        // HH:MM
        end_time: String,          // HH:MM
        slot_minutes: i64,
        #[serde(default)]
        blackout_dates: Vec<String>, // YYYY-MM-DD
    },
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig::Static {
            entries: Vec::new(),
        }
    }
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SchedulingConfig {
    /// IANA zone used to decide what "today" is, e.g. "Europe/Zurich"
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

fn default_time_zone() -> String {
    "UTC".to_string()
}

// --- Submission Sink Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    #[default]
    Logging,
    Webhook,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SubmissionConfig {
    #[serde(default)]
    pub kind: SinkKind,
    /// Simulated processing delay of the logging sink
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    pub webhook_url: Option<String>, // Mandatory when kind = "webhook"
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    pub auth_token: Option<String>, // "secret_from_env" reads SUBMISSION_AUTH_TOKEN
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            kind: SinkKind::Logging,
            delay_ms: default_delay_ms(),
            webhook_url: None,
            timeout_secs: default_timeout_secs(),
            auth_token: None,
        }
    }
}

// --- Session Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    /// Idle sessions older than this are discarded
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: i64,
}

fn default_ttl_minutes() -> i64 {
    60
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl_minutes(),
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    #[serde(default)]
    pub log_level: Option<String>,

    pub scheduling: SchedulingConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub session: SessionConfig,
}
