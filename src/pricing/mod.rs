//! Sale-price composition for products and services.
//!
//! The price is derived from the item's total cost, a target profit margin,
//! and any percentage-based fees (card acquirer, marketplace, taxes charged
//! on the sale price). Margin and fees are applied over the final price, so
//! the formula divides the cost basis by what remains of each sold unit:
//! `price = cost / (1 - (margin + fees) / 100)`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// One material or input cost while composing an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostItem {
    pub description: String,
    pub value: Decimal,
}

/// One percentage fee charged over the final price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeeItem {
    pub description: String,
    pub percent: Decimal,
}

/// Cost structure of a product or service being priced.
///
/// Labor applies to services only; products leave both labor fields unset.
/// Inputs are ephemeral: they exist while the user composes a price and are
/// persisted (or discarded) by an outer layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PricingInputs {
    pub material_costs: Vec<CostItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labor_hours: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Decimal>,
    pub additional_fees: Vec<FeeItem>,
    pub margin_percent: Decimal,
}

impl PricingInputs {
    pub fn labor_cost(&self) -> Decimal {
        match (self.labor_hours, self.hourly_rate) {
            (Some(hours), Some(rate)) => hours * rate,
            _ => Decimal::ZERO,
        }
    }

    pub fn total_cost(&self) -> Decimal {
        let materials: Decimal = self.material_costs.iter().map(|item| item.value).sum();
        materials + self.labor_cost()
    }

    pub fn fee_percent_total(&self) -> Decimal {
        self.additional_fees.iter().map(|fee| fee.percent).sum()
    }

    pub fn combined_percent(&self) -> Decimal {
        self.margin_percent + self.fee_percent_total()
    }

    /// Checks that the margin and every fee sit inside `0..=100`.
    ///
    /// The pricing formula itself never rejects inputs; screens call this
    /// before quoting so out-of-range percentages are caught at entry time.
    pub fn validate(&self) -> Result<(), EngineError> {
        percent_in_range("margem", self.margin_percent)?;
        for fee in &self.additional_fees {
            percent_in_range(&fee.description, fee.percent)?;
        }
        Ok(())
    }
}

/// Result of pricing an item.
///
/// `Unviable` marks a margin-plus-fees total at or above 100%: the formula's
/// divisor would hit zero or go negative, so no finite price recovers the
/// cost.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PriceQuote {
    Priced {
        final_price: Decimal,
        profit_value: Decimal,
        fees_value: Decimal,
        margin_profit: Decimal,
        combined_percent: Decimal,
    },
    Unviable {
        combined_percent: Decimal,
    },
}

/// Derives the sale price for the given cost structure.
///
/// A non-positive total cost prices at zero regardless of margin or fees:
/// with no cost basis there is nothing to mark up.
pub fn price(inputs: &PricingInputs) -> PriceQuote {
    let combined_percent = inputs.combined_percent();
    let total_cost = inputs.total_cost();

    if total_cost <= Decimal::ZERO {
        return PriceQuote::Priced {
            final_price: Decimal::ZERO,
            profit_value: Decimal::ZERO,
            fees_value: Decimal::ZERO,
            margin_profit: Decimal::ZERO,
            combined_percent,
        };
    }
    if combined_percent >= Decimal::ONE_HUNDRED {
        tracing::debug!(%combined_percent, "margin plus fees consume the whole price");
        return PriceQuote::Unviable { combined_percent };
    }

    let final_price = total_cost / (Decimal::ONE - combined_percent / Decimal::ONE_HUNDRED);
    let profit_value = final_price - total_cost;
    let fees_value = final_price * inputs.fee_percent_total() / Decimal::ONE_HUNDRED;
    PriceQuote::Priced {
        final_price,
        profit_value,
        fees_value,
        margin_profit: profit_value - fees_value,
        combined_percent,
    }
}

fn percent_in_range(label: &str, value: Decimal) -> Result<(), EngineError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(EngineError::InvalidPercent(format!("{label}: {value}")));
    }
    Ok(())
}
