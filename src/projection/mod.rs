//! Break-even and contribution-margin projections.
//!
//! Inputs are estimates, not ledger data: expected revenue, variable costs
//! as percentages of that revenue, absolute fixed costs, and non-operating
//! outflows (loan installments, owner draws already committed). Projections
//! can be saved under a name; storage belongs to an outer layer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A variable cost expressed as a percent of revenue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariableCost {
    pub description: String,
    pub percent: Decimal,
}

/// An absolute monthly fixed cost.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixedCost {
    pub description: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BreakEvenInputs {
    pub estimated_revenue: Decimal,
    pub variable_costs: Vec<VariableCost>,
    pub fixed_costs: Vec<FixedCost>,
    pub non_operating_outflows: Decimal,
}

impl BreakEvenInputs {
    pub fn variable_percent_total(&self) -> Decimal {
        self.variable_costs.iter().map(|cost| cost.percent).sum()
    }

    pub fn fixed_cost_total(&self) -> Decimal {
        self.fixed_costs.iter().map(|cost| cost.value).sum()
    }
}

/// The revenue level where the business covers its fixed costs.
///
/// `Unviable` means variable costs consume 100% or more of each revenue
/// unit: no positive revenue level breaks even.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BreakEvenPoint {
    Viable {
        revenue: Decimal,
        percent_of_estimated: Decimal,
    },
    Unviable,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreakEvenReport {
    pub contribution_margin_percent: Decimal,
    pub fixed_cost_total: Decimal,
    pub point: BreakEvenPoint,
    pub max_pro_labore: Decimal,
}

/// Derives the break-even picture from estimated figures.
///
/// A contribution margin at or below zero is a legitimate "unviable
/// business" signal, not an error. Maximum pro-labore is what remains of the
/// estimated revenue after variable costs, fixed costs, and non-operating
/// outflows, floored at zero; negative compensation is never reported.
pub fn compute(inputs: &BreakEvenInputs) -> BreakEvenReport {
    let variable_percent_total = inputs.variable_percent_total();
    let contribution_margin_percent = Decimal::ONE_HUNDRED - variable_percent_total;
    let fixed_cost_total = inputs.fixed_cost_total();

    let point = if contribution_margin_percent <= Decimal::ZERO {
        tracing::warn!(
            %contribution_margin_percent,
            "variable costs consume the entire revenue; no break-even point"
        );
        BreakEvenPoint::Unviable
    } else {
        let revenue = fixed_cost_total / (contribution_margin_percent / Decimal::ONE_HUNDRED);
        let percent_of_estimated = if inputs.estimated_revenue.is_zero() {
            Decimal::ZERO
        } else {
            revenue / inputs.estimated_revenue * Decimal::ONE_HUNDRED
        };
        BreakEvenPoint::Viable {
            revenue,
            percent_of_estimated,
        }
    };

    let variable_cost_value =
        inputs.estimated_revenue * variable_percent_total / Decimal::ONE_HUNDRED;
    let headroom =
        inputs.estimated_revenue - variable_cost_value - fixed_cost_total - inputs.non_operating_outflows;

    BreakEvenReport {
        contribution_margin_percent,
        fixed_cost_total,
        point,
        max_pro_labore: headroom.max(Decimal::ZERO),
    }
}

/// A named break-even scenario the tenant chose to keep.
///
/// The engine computes the report; reading and writing the snapshot is the
/// projection store's job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreakEvenProjection {
    pub id: Uuid,
    pub name: String,
    pub inputs: BreakEvenInputs,
    pub report: BreakEvenReport,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BreakEvenProjection {
    pub fn new(name: impl Into<String>, inputs: BreakEvenInputs) -> Self {
        let now = Utc::now();
        let report = compute(&inputs);
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            inputs,
            report,
            created_at: now,
            updated_at: now,
        }
    }

    /// Recomputes the report after the inputs were edited.
    pub fn refresh(&mut self) {
        self.report = compute(&self.inputs);
        self.updated_at = Utc::now();
    }
}
