use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a ledger entry. The sign of the movement is carried here,
/// never by the amount itself.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Revenue,
    Expense,
}

/// A single dated, categorized revenue or expense record.
///
/// Entries are immutable inputs to the engine: amounts are non-negative
/// decimals and the engine never writes back to the collection it is given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub kind: EntryKind,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl LedgerEntry {
    pub fn new(
        kind: EntryKind,
        date: NaiveDate,
        amount: Decimal,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            date,
            amount,
            category: category.into(),
            counterparty: None,
            notes: None,
        }
    }

    pub fn with_counterparty(mut self, counterparty: Uuid) -> Self {
        self.counterparty = Some(counterparty);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
