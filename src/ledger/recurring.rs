use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calendar::{months_between, shift_months};
use super::entry::{EntryKind, LedgerEntry};
use crate::reports::period::ReportRange;

const MAX_EXPANSION_OCCURRENCES: usize = 1024;

/// How often a recurring entry repeats, anchored on its start date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    Weekly,
    Monthly,
    Yearly,
}

/// Template for a ledger entry that repeats on a fixed cadence.
///
/// Expansion produces detached [`LedgerEntry`] values ready for persistence;
/// the template itself never appears in reports. Monthly and yearly series
/// keep the start date's day-of-month, clamped to shorter months (a series
/// anchored on the 31st lands on Feb 28/29).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringEntry {
    pub id: Uuid,
    pub kind: EntryKind,
    pub amount: Decimal,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub cadence: Cadence,
    pub starts_on: NaiveDate,
    #[serde(default)]
    pub ends_on: Option<NaiveDate>,
}

impl RecurringEntry {
    pub fn new(
        kind: EntryKind,
        amount: Decimal,
        category: impl Into<String>,
        cadence: Cadence,
        starts_on: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            category: category.into(),
            counterparty: None,
            notes: None,
            cadence,
            starts_on,
            ends_on: None,
        }
    }

    pub fn until(mut self, ends_on: NaiveDate) -> Self {
        self.ends_on = Some(ends_on);
        self
    }

    /// Concrete entries for every occurrence falling inside `range`
    /// (inclusive on both ends), honoring `ends_on` when set.
    pub fn expand_within(&self, range: &ReportRange) -> Vec<LedgerEntry> {
        let cutoff = match self.ends_on {
            Some(ends_on) => ends_on.min(range.end),
            None => range.end,
        };
        let mut occurrences = Vec::new();
        let mut index = self.first_candidate_index(range.start);
        let mut guard = 0usize;
        loop {
            let date = self.occurrence_date(index);
            if date > cutoff || guard >= MAX_EXPANSION_OCCURRENCES {
                break;
            }
            if date >= range.start {
                occurrences.push(self.instantiate(date));
            }
            index += 1;
            guard += 1;
        }
        occurrences
    }

    /// Scheduled date of the occurrence at `index` (0 = the start date).
    fn occurrence_date(&self, index: u32) -> NaiveDate {
        match self.cadence {
            Cadence::Weekly => self.starts_on + Duration::weeks(i64::from(index)),
            Cadence::Monthly => shift_months(self.starts_on, index as i32),
            Cadence::Yearly => shift_months(self.starts_on, index as i32 * 12),
        }
    }

    // Lower bound for the first occurrence at or after `from`; the expansion
    // loop skips any candidates that still fall before the window.
    fn first_candidate_index(&self, from: NaiveDate) -> u32 {
        if from <= self.starts_on {
            return 0;
        }
        let estimate = match self.cadence {
            Cadence::Weekly => (from - self.starts_on).num_days() / 7,
            Cadence::Monthly => i64::from(months_between(self.starts_on, from)),
            Cadence::Yearly => i64::from(from.year() - self.starts_on.year()),
        };
        estimate.max(0) as u32
    }

    fn instantiate(&self, date: NaiveDate) -> LedgerEntry {
        LedgerEntry {
            id: Uuid::new_v4(),
            kind: self.kind,
            date,
            amount: self.amount,
            category: self.category.clone(),
            counterparty: self.counterparty,
            notes: self.notes.clone(),
        }
    }
}
