// --- File: crates/bookflow_scheduling/src/catalog.rs ---
//! Availability catalogs: where the wizard's bookable slots come from.

use bookflow_common::models::hhmm;
use bookflow_common::services::AvailabilityCatalog;
use bookflow_config::{AvailabilityEntry, CatalogConfig};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),
    #[error("Invalid weekday '{0}'")]
    InvalidWeekday(String),
    #[error("Slot length must be positive, got {0} minutes")]
    InvalidSlotLength(i64),
    #[error("Working hours end ({end}) must be after start ({start})")]
    InvalidWorkingHours { start: String, end: String },
}

fn parse_date(value: &str) -> Result<NaiveDate, CatalogError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| CatalogError::InvalidDate(value.to_string()))
}

fn parse_time(value: &str) -> Result<NaiveTime, CatalogError> {
    hhmm::parse(value).map_err(|_| CatalogError::InvalidTime(value.to_string()))
}

// --- Static table ---

/// A fixed table of bookable slots per date.
///
/// Slots are kept sorted and de-duplicated, so `lookup` always returns an
/// ordered sequence.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: BTreeMap<NaiveDate, BTreeSet<NaiveTime>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `times` to `date`'s slots.
    pub fn with_slots<I>(mut self, date: NaiveDate, times: I) -> Self
    where
        I: IntoIterator<Item = NaiveTime>,
    {
        self.entries.entry(date).or_default().extend(times);
        self
    }

    /// Builds the catalog from configuration rows.
    pub fn from_entries(entries: &[AvailabilityEntry]) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for entry in entries {
            let date = parse_date(&entry.date)?;
            let times = entry
                .slots
                .iter()
                .map(|slot| parse_time(slot))
                .collect::<Result<Vec<_>, _>>()?;
            catalog = catalog.with_slots(date, times);
        }
        debug!(
            "Static catalog loaded: {} bookable dates of {} entries",
            catalog.dates().count(),
            catalog.entries.len()
        );
        Ok(catalog)
    }

    /// Dates that have at least one slot, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.entries
            .iter()
            .filter(|(_, slots)| !slots.is_empty())
            .map(|(date, _)| *date)
    }
}

impl AvailabilityCatalog for StaticCatalog {
    fn lookup(&self, date: NaiveDate) -> Vec<NaiveTime> {
        self.entries
            .get(&date)
            .map(|slots| slots.iter().copied().collect())
            .unwrap_or_default()
    }
}

// --- Recurring working hours ---

/// Configuration for working hours and days
#[derive(Debug, Clone)]
pub struct WorkingHoursCatalog {
    /// Days of the week when demos can be scheduled
    working_days: Vec<Weekday>,
    /// First slot of the day
    start_time: NaiveTime,
    /// No slot may end after this time
    end_time: NaiveTime,
    /// Length of one slot
    slot_length: Duration,
    /// Dates without slots regardless of weekday (holidays, company events)
    blackout_dates: BTreeSet<NaiveDate>,
}

impl WorkingHoursCatalog {
    pub fn new(
        working_days: Vec<Weekday>,
        start_time: NaiveTime,
        end_time: NaiveTime,
        slot_length: Duration,
    ) -> Result<Self, CatalogError> {
        if slot_length <= Duration::zero() {
            return Err(CatalogError::InvalidSlotLength(slot_length.num_minutes()));
        }
        if end_time <= start_time {
            return Err(CatalogError::InvalidWorkingHours {
                start: hhmm::format(&start_time),
                end: hhmm::format(&end_time),
            });
        }
        Ok(Self {
            working_days,
            start_time,
            end_time,
            slot_length,
            blackout_dates: BTreeSet::new(),
        })
    }

    pub fn with_blackout_dates<I>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        self.blackout_dates.extend(dates);
        self
    }

    fn daily_slots(&self) -> Vec<NaiveTime> {
        let mut slots = Vec::new();
        let mut current = self.start_time;
        loop {
            let (slot_end, wrapped_seconds) = current.overflowing_add_signed(self.slot_length);
            if wrapped_seconds != 0 || slot_end > self.end_time {
                break;
            }
            slots.push(current);
            current = slot_end;
        }
        slots
    }
}

impl AvailabilityCatalog for WorkingHoursCatalog {
    fn lookup(&self, date: NaiveDate) -> Vec<NaiveTime> {
        if !self.working_days.contains(&date.weekday()) || self.blackout_dates.contains(&date) {
            return Vec::new();
        }
        self.daily_slots()
    }
}

/// Builds the catalog described by the `scheduling.catalog` config section.
pub fn catalog_from_config(
    config: &CatalogConfig,
) -> Result<Arc<dyn AvailabilityCatalog>, CatalogError> {
    match config {
        CatalogConfig::Static { entries } => Ok(Arc::new(StaticCatalog::from_entries(entries)?)),
        CatalogConfig::WorkingHours {
            working_days,
            start_time,
            end_time,
            slot_minutes,
            blackout_dates,
        } => {
            let days = working_days
                .iter()
                .map(|day| {
                    day.parse::<Weekday>()
                        .map_err(|_| CatalogError::InvalidWeekday(day.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            let blackouts = blackout_dates
                .iter()
                .map(|date| parse_date(date))
                .collect::<Result<Vec<_>, _>>()?;
            let slot_length = Duration::try_minutes(*slot_minutes)
                .ok_or(CatalogError::InvalidSlotLength(*slot_minutes))?;
            let catalog = WorkingHoursCatalog::new(
                days,
                parse_time(start_time)?,
                parse_time(end_time)?,
                slot_length,
            )?
            .with_blackout_dates(blackouts);
            Ok(Arc::new(catalog))
        }
    }
}
