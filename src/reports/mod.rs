//! Read-side reports computed from a snapshot of ledger entries.

pub mod cash_flow;
pub mod dre;
pub mod period;

pub use cash_flow::{CashFlowReport, DailyFlow, FlowTotals, PeriodComparison};
pub use dre::{DreLine, DreReport};
pub use period::{filter_entries, PeriodSelector, ReportRange};
