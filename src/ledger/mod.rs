//! Ledger input models and recurring-entry helpers.

pub(crate) mod calendar;
pub mod entry;
pub mod recurring;

pub use entry::{EntryKind, LedgerEntry};
pub use recurring::{Cadence, RecurringEntry};
