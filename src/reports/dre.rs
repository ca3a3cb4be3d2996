use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerEntry;
use crate::taxonomy::{CategoryTaxonomy, Classification, ExpenseRole, RevenueRole};

/// One income-statement line: its amount and its share of net revenue.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct DreLine {
    pub amount: Decimal,
    pub percent_of_net_revenue: Decimal,
}

/// Structured income statement (DRE) for a window of entries.
///
/// Rebuilt from scratch on every call; the report has no identity and is
/// never cached. `unmatched_categories` lists labels that were absorbed into
/// the fallback groups, once each. The list is a data-quality signal and
/// never changes the numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DreReport {
    pub gross_revenue: DreLine,
    pub deductions: DreLine,
    pub net_revenue: DreLine,
    pub cost_of_goods_sold: DreLine,
    pub gross_profit: DreLine,
    pub operating_expenses: DreLine,
    pub operating_result: DreLine,
    pub financial_revenue: DreLine,
    pub financial_expenses: DreLine,
    pub financial_result: DreLine,
    pub net_result: DreLine,
    pub unmatched_categories: Vec<String>,
}

/// Classifies every entry through the taxonomy and assembles the statement.
///
/// Total function: unknown categories route through the fallback groups and
/// degenerate inputs (no entries, zero net revenue) produce zeroed lines,
/// never an error.
pub fn compute(entries: &[LedgerEntry], taxonomy: &CategoryTaxonomy) -> DreReport {
    let mut gross_revenue = Decimal::ZERO;
    let mut financial_revenue = Decimal::ZERO;
    let mut deductions = Decimal::ZERO;
    let mut cost_of_goods_sold = Decimal::ZERO;
    let mut operating_expenses = Decimal::ZERO;
    let mut financial_expenses = Decimal::ZERO;
    let mut unmatched: BTreeSet<String> = BTreeSet::new();

    for entry in entries {
        match taxonomy.classify(entry.kind, &entry.category) {
            Classification::Revenue { role, matched, .. } => {
                if !matched {
                    unmatched.insert(entry.category.clone());
                }
                match role {
                    RevenueRole::Financial => financial_revenue += entry.amount,
                    RevenueRole::Operating | RevenueRole::Other => gross_revenue += entry.amount,
                }
            }
            Classification::Expense { role, matched, .. } => {
                if !matched {
                    unmatched.insert(entry.category.clone());
                }
                match role {
                    ExpenseRole::Deduction => deductions += entry.amount,
                    ExpenseRole::CostOfSales => cost_of_goods_sold += entry.amount,
                    ExpenseRole::Operating => operating_expenses += entry.amount,
                    ExpenseRole::Financial => financial_expenses += entry.amount,
                }
            }
        }
    }

    let net_revenue = gross_revenue - deductions;
    let gross_profit = net_revenue - cost_of_goods_sold;
    let operating_result = gross_profit - operating_expenses;
    let financial_result = financial_revenue - financial_expenses;
    let net_result = operating_result + financial_result;

    let line = |amount: Decimal| DreLine {
        amount,
        percent_of_net_revenue: percent_of(amount, net_revenue),
    };

    DreReport {
        gross_revenue: line(gross_revenue),
        deductions: line(deductions),
        net_revenue: line(net_revenue),
        cost_of_goods_sold: line(cost_of_goods_sold),
        gross_profit: line(gross_profit),
        operating_expenses: line(operating_expenses),
        operating_result: line(operating_result),
        financial_revenue: line(financial_revenue),
        financial_expenses: line(financial_expenses),
        financial_result: line(financial_result),
        net_result: line(net_result),
        unmatched_categories: unmatched.into_iter().collect(),
    }
}

fn percent_of(amount: Decimal, net_revenue: Decimal) -> Decimal {
    if net_revenue.is_zero() {
        Decimal::ZERO
    } else {
        amount / net_revenue * Decimal::ONE_HUNDRED
    }
}
