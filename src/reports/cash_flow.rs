use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::period::{filter_entries, ReportRange};
use crate::ledger::{EntryKind, LedgerEntry};

/// Revenue, expense, and net movement for a single calendar day.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct DailyFlow {
    pub revenue: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// Window-wide totals.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct FlowTotals {
    pub revenue: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// Cash movement bucketed by day and by raw entry category.
///
/// The by-day series is sparse: days without entries are absent rather than
/// zero-filled, and the map's ordering gives the ascending calendar series.
/// Category buckets use the entry's own label, not its taxonomy group; this
/// view is categorical, not income-statement-structural.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CashFlowReport {
    pub by_day: BTreeMap<NaiveDate, DailyFlow>,
    pub revenue_by_category: BTreeMap<String, Decimal>,
    pub expense_by_category: BTreeMap<String, Decimal>,
    pub totals: FlowTotals,
}

/// Totals for the active window next to the window immediately before it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodComparison {
    pub current_range: ReportRange,
    pub previous_range: ReportRange,
    pub current: FlowTotals,
    pub previous: FlowTotals,
    pub revenue_delta: Decimal,
    pub expense_delta: Decimal,
    pub net_delta: Decimal,
}

/// Reduces a window of entries into the cash-flow view.
pub fn aggregate(entries: &[LedgerEntry]) -> CashFlowReport {
    let mut by_day: BTreeMap<NaiveDate, DailyFlow> = BTreeMap::new();
    let mut revenue_by_category: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut expense_by_category: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut totals = FlowTotals::default();

    for entry in entries {
        let day = by_day.entry(entry.date).or_default();
        match entry.kind {
            EntryKind::Revenue => {
                day.revenue += entry.amount;
                totals.revenue += entry.amount;
                *revenue_by_category
                    .entry(entry.category.clone())
                    .or_insert(Decimal::ZERO) += entry.amount;
            }
            EntryKind::Expense => {
                day.expense += entry.amount;
                totals.expense += entry.amount;
                *expense_by_category
                    .entry(entry.category.clone())
                    .or_insert(Decimal::ZERO) += entry.amount;
            }
        }
        day.net = day.revenue - day.expense;
    }
    totals.net = totals.revenue - totals.expense;

    CashFlowReport {
        by_day,
        revenue_by_category,
        expense_by_category,
        totals,
    }
}

/// Totals for `range` against the immediately preceding window of the same
/// shape, with plain differences for the dashboard's period-over-period view.
pub fn compare_periods(entries: &[LedgerEntry], range: &ReportRange) -> PeriodComparison {
    let previous_range = range.preceding();
    let current = aggregate(&filter_entries(entries, range)).totals;
    let previous = aggregate(&filter_entries(entries, &previous_range)).totals;
    PeriodComparison {
        current_range: *range,
        previous_range,
        revenue_delta: current.revenue - previous.revenue,
        expense_delta: current.expense - previous.expense,
        net_delta: current.net - previous.net,
        current,
        previous,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(kind: EntryKind, day: NaiveDate, amount: i64, category: &str) -> LedgerEntry {
        LedgerEntry::new(kind, day, Decimal::from(amount), category)
    }

    #[test]
    fn buckets_by_day_in_ascending_order() {
        let entries = vec![
            entry(EntryKind::Expense, date(2024, 1, 12), 40, "Aluguel"),
            entry(EntryKind::Revenue, date(2024, 1, 5), 100, "Vendas de Produtos"),
            entry(EntryKind::Revenue, date(2024, 1, 12), 60, "Prestação de Serviços"),
        ];
        let report = aggregate(&entries);

        let days: Vec<NaiveDate> = report.by_day.keys().copied().collect();
        assert_eq!(days, vec![date(2024, 1, 5), date(2024, 1, 12)]);

        let jan12 = &report.by_day[&date(2024, 1, 12)];
        assert_eq!(jan12.revenue, Decimal::from(60));
        assert_eq!(jan12.expense, Decimal::from(40));
        assert_eq!(jan12.net, Decimal::from(20));
    }

    #[test]
    fn day_series_is_sparse() {
        let entries = vec![
            entry(EntryKind::Revenue, date(2024, 1, 1), 10, "Vendas de Produtos"),
            entry(EntryKind::Revenue, date(2024, 1, 31), 10, "Vendas de Produtos"),
        ];
        let report = aggregate(&entries);
        assert_eq!(report.by_day.len(), 2);
    }

    #[test]
    fn category_buckets_use_raw_labels() {
        let entries = vec![
            entry(EntryKind::Revenue, date(2024, 1, 5), 100, "Vendas de Produtos"),
            entry(EntryKind::Revenue, date(2024, 1, 6), 50, "Vendas de Produtos"),
            entry(EntryKind::Revenue, date(2024, 1, 7), 30, "Categoria Inventada"),
            entry(EntryKind::Expense, date(2024, 1, 7), 20, "Aluguel"),
        ];
        let report = aggregate(&entries);
        assert_eq!(
            report.revenue_by_category["Vendas de Produtos"],
            Decimal::from(150)
        );
        assert_eq!(
            report.revenue_by_category["Categoria Inventada"],
            Decimal::from(30)
        );
        assert_eq!(report.expense_by_category["Aluguel"], Decimal::from(20));
    }

    #[test]
    fn daily_buckets_conserve_totals() {
        let mut entries = Vec::new();
        for day in 1..=28 {
            entries.push(entry(
                EntryKind::Revenue,
                date(2024, 2, day),
                i64::from(day) * 3,
                "Vendas de Produtos",
            ));
            entries.push(entry(
                EntryKind::Expense,
                date(2024, 2, day),
                i64::from(day),
                "Custo dos Produtos Vendidos (CPV)",
            ));
        }
        let report = aggregate(&entries);

        let day_revenue: Decimal = report.by_day.values().map(|d| d.revenue).sum();
        let day_expense: Decimal = report.by_day.values().map(|d| d.expense).sum();
        assert_eq!(day_revenue, report.totals.revenue);
        assert_eq!(day_expense, report.totals.expense);

        let category_revenue: Decimal = report.revenue_by_category.values().copied().sum();
        let category_expense: Decimal = report.expense_by_category.values().copied().sum();
        assert_eq!(category_revenue, report.totals.revenue);
        assert_eq!(category_expense, report.totals.expense);
        assert_eq!(report.totals.net, report.totals.revenue - report.totals.expense);
    }

    #[test]
    fn compares_against_preceding_month() {
        let entries = vec![
            entry(EntryKind::Revenue, date(2024, 2, 10), 500, "Vendas de Produtos"),
            entry(EntryKind::Revenue, date(2024, 3, 8), 700, "Vendas de Produtos"),
            entry(EntryKind::Expense, date(2024, 3, 9), 100, "Aluguel"),
        ];
        let range = ReportRange::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        let comparison = compare_periods(&entries, &range);

        assert_eq!(comparison.previous_range.start, date(2024, 2, 1));
        assert_eq!(comparison.previous_range.end, date(2024, 2, 29));
        assert_eq!(comparison.current.revenue, Decimal::from(700));
        assert_eq!(comparison.previous.revenue, Decimal::from(500));
        assert_eq!(comparison.revenue_delta, Decimal::from(200));
        assert_eq!(comparison.net_delta, Decimal::from(100));
    }
}
