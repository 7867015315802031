// --- File: crates/bookflow_scheduling/src/lib.rs ---
pub mod actions;
pub mod calendar;
#[cfg(test)]
mod calendar_proptest;
pub mod catalog;
pub mod doc;
pub mod draft;
pub mod handlers;
pub mod routes;
pub mod session;
pub mod sink;
#[cfg(test)]
mod test_support;
pub mod validation;
#[cfg(test)]
mod validation_test;
pub mod wizard;
#[cfg(test)]
mod wizard_proptest;

pub use catalog::{StaticCatalog, WorkingHoursCatalog};
pub use handlers::SchedulingState;
pub use routes::{routes, routes_with_state};
pub use wizard::{BookingWizard, Step, WizardError, WizardView};
