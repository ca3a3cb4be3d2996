use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::ledger::calendar::{first_of_month, last_of_month, months_between, shift_months};
use crate::ledger::LedgerEntry;

/// Period choices offered by the dashboard, resolved against an explicit
/// reference date so reports stay deterministic and testable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PeriodSelector {
    CurrentMonth,
    PreviousMonth,
    LastThreeMonths,
    LastSixMonths,
    CurrentYear,
    Custom,
}

/// Inclusive date interval a report is computed over.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, EngineError> {
        if start > end {
            return Err(EngineError::InvalidRange(format!(
                "range start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Both bounds are part of the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The window of the same length immediately before this one.
    ///
    /// Calendar-aligned ranges (first of a month through last of a month)
    /// step back by whole months, so "current month" compares against the
    /// previous calendar month rather than a fixed day count.
    pub fn preceding(&self) -> ReportRange {
        let month_aligned = self.start.day() == 1 && self.end == last_of_month(self.end);
        if month_aligned {
            let span = months_between(self.start, self.end) + 1;
            let start = shift_months(self.start, -span);
            let end = last_of_month(shift_months(self.start, -1));
            ReportRange { start, end }
        } else {
            let length_days = (self.end - self.start).num_days();
            let end = self.start - Duration::days(1);
            let start = end - Duration::days(length_days);
            ReportRange { start, end }
        }
    }
}

impl PeriodSelector {
    /// Resolves the selector into a concrete range relative to `as_of`.
    ///
    /// A custom selection missing either bound, or with reversed bounds,
    /// falls back to the current month instead of failing.
    pub fn resolve(
        self,
        as_of: NaiveDate,
        custom_start: Option<NaiveDate>,
        custom_end: Option<NaiveDate>,
    ) -> ReportRange {
        match self {
            PeriodSelector::CurrentMonth => month_range(as_of),
            PeriodSelector::PreviousMonth => month_range(shift_months(first_of_month(as_of), -1)),
            PeriodSelector::LastThreeMonths => trailing_months(as_of, 3),
            PeriodSelector::LastSixMonths => trailing_months(as_of, 6),
            PeriodSelector::CurrentYear => year_range(as_of),
            PeriodSelector::Custom => match (custom_start, custom_end) {
                (Some(start), Some(end)) if start <= end => ReportRange { start, end },
                _ => month_range(as_of),
            },
        }
    }
}

/// Entries whose date falls inside `range`, in their original order.
pub fn filter_entries(entries: &[LedgerEntry], range: &ReportRange) -> Vec<LedgerEntry> {
    entries
        .iter()
        .filter(|entry| range.contains(entry.date))
        .cloned()
        .collect()
}

fn month_range(date: NaiveDate) -> ReportRange {
    ReportRange {
        start: first_of_month(date),
        end: last_of_month(date),
    }
}

fn trailing_months(as_of: NaiveDate, months: i32) -> ReportRange {
    ReportRange {
        start: first_of_month(shift_months(as_of, -(months - 1))),
        end: last_of_month(as_of),
    }
}

fn year_range(as_of: NaiveDate) -> ReportRange {
    let start = NaiveDate::from_ymd_opt(as_of.year(), 1, 1).unwrap_or(as_of);
    let end = NaiveDate::from_ymd_opt(as_of.year(), 12, 31).unwrap_or(as_of);
    ReportRange { start, end }
}
