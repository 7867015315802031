//! Service abstractions for the scheduling wizard's collaborators.
//!
//! The wizard never knows where availability comes from or where a finished
//! booking goes; it is handed implementations of these traits at
//! construction time.

use crate::models::{BookingRequest, SubmissionReceipt};
use chrono::{NaiveDate, NaiveTime};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Read-only source of bookable slots.
///
/// `lookup` must be a pure read: the same date yields the same ordered slots
/// for the lifetime of the catalog. An unknown date and a date without slots
/// are indistinguishable (both return an empty list).
pub trait AvailabilityCatalog: Send + Sync {
    /// Ordered times of day that can be booked on `date`.
    fn lookup(&self, date: NaiveDate) -> Vec<NaiveTime>;

    /// Whether `date` has at least one bookable slot.
    fn has_slots(&self, date: NaiveDate) -> bool {
        !self.lookup(date).is_empty()
    }

    /// Whether `time` is one of `date`'s slots.
    fn offers(&self, date: NaiveDate, time: NaiveTime) -> bool {
        self.lookup(date).contains(&time)
    }
}

/// Errors a submission sink can report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("submission rejected: {0}")]
    Rejected(String),
    #[error("submission timed out: {0}")]
    Timeout(String),
    #[error("submission transport failed: {0}")]
    Transport(String),
    #[error("submission sink misconfigured: {0}")]
    Misconfigured(String),
}

/// The external collaborator that records a completed booking.
///
/// Retries and network failure handling belong to implementations; the
/// wizard only distinguishes accepted from failed.
pub trait SubmissionSink: Send + Sync {
    fn submit(&self, booking: BookingRequest) -> BoxFuture<'_, SubmissionReceipt, SubmissionError>;
}
