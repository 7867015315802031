//! Fixtures shared by the unit tests of this crate.

use crate::catalog::StaticCatalog;
use crate::draft::DraftField;
use crate::wizard::BookingWizard;
use bookflow_common::models::{BookingRequest, SubmissionReceipt};
use bookflow_common::services::{BoxFuture, SubmissionError, SubmissionSink};
use chrono::{NaiveDate, NaiveTime, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn time(value: &str) -> NaiveTime {
    NaiveTime::parse_from_str(value, "%H:%M").unwrap()
}

pub fn times(values: &[&str]) -> Vec<NaiveTime> {
    values.iter().map(|value| time(value)).collect()
}

/// Monday 1 September 2025.
pub fn today() -> NaiveDate {
    date(2025, 9, 1)
}

/// Early September 2025; the weekend of the 6th/7th has no entries.
pub fn sample_catalog() -> StaticCatalog {
    let full_day = times(&["09:00", "10:00", "11:00", "14:00", "15:00", "16:00"]);
    StaticCatalog::new()
        .with_slots(date(2025, 8, 29), times(&["09:00", "10:00"]))
        .with_slots(date(2025, 9, 1), times(&["15:00", "16:00"]))
        .with_slots(date(2025, 9, 2), full_day.clone())
        .with_slots(date(2025, 9, 3), times(&["10:00", "11:00", "14:00"]))
        .with_slots(date(2025, 9, 4), times(&["09:00", "13:00"]))
        .with_slots(date(2025, 9, 5), full_day)
        .with_slots(date(2025, 9, 8), Vec::new())
}

/// Records every booking and accepts it.
#[derive(Default)]
pub struct RecordingSink {
    pub received: Mutex<Vec<BookingRequest>>,
}

impl RecordingSink {
    pub fn bookings(&self) -> Vec<BookingRequest> {
        self.received.lock().unwrap().clone()
    }
}

impl SubmissionSink for RecordingSink {
    fn submit(&self, booking: BookingRequest) -> BoxFuture<'_, SubmissionReceipt, SubmissionError> {
        Box::pin(async move {
            let receipt = SubmissionReceipt {
                reference: booking.reference,
                accepted_at: Utc::now(),
            };
            self.received.lock().unwrap().push(booking);
            Ok(receipt)
        })
    }
}

/// Rejects the first `failures` submissions, then accepts.
pub struct FlakySink {
    remaining_failures: AtomicUsize,
    pub attempts: AtomicUsize,
}

impl FlakySink {
    pub fn new(failures: usize) -> Self {
        Self {
            remaining_failures: AtomicUsize::new(failures),
            attempts: AtomicUsize::new(0),
        }
    }
}

impl SubmissionSink for FlakySink {
    fn submit(&self, booking: BookingRequest) -> BoxFuture<'_, SubmissionReceipt, SubmissionError> {
        Box::pin(async move {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            let failing = self
                .remaining_failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
                .is_ok();
            if failing {
                return Err(SubmissionError::Rejected("503 Service Unavailable".to_string()));
            }
            Ok(SubmissionReceipt {
                reference: booking.reference,
                accepted_at: Utc::now(),
            })
        })
    }
}

pub fn wizard_with_sink(sink: Arc<dyn SubmissionSink>) -> BookingWizard {
    BookingWizard::new(Arc::new(sample_catalog()), sink, today())
}

pub fn new_wizard() -> (BookingWizard, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    (wizard_with_sink(sink.clone()), sink)
}

pub fn fill_contact(wizard: &mut BookingWizard) {
    wizard.set_field(DraftField::FirstName, "Ada").unwrap();
    wizard.set_field(DraftField::LastName, "Lovelace").unwrap();
    wizard.set_field(DraftField::Email, "ada@x.com").unwrap();
    wizard.set_field(DraftField::Company, "Analytical Eng").unwrap();
}

/// A wizard sitting on step 3 with steps 1 and 2 complete.
pub fn wizard_on_requirements(sink: Arc<dyn SubmissionSink>) -> BookingWizard {
    let mut wizard = wizard_with_sink(sink);
    fill_contact(&mut wizard);
    wizard.advance().unwrap();
    wizard.select_date(date(2025, 9, 2)).unwrap();
    wizard.select_time(time("10:00")).unwrap();
    wizard.advance().unwrap();
    wizard
}
