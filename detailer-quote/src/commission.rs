use detailer_core::{check_amount, check_rate, OrOverflow, PricingResult};
use detailer_shared::money::percent_of;
use detailer_shared::{Money, Percent};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Commission paid out on a quote or sale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CommissionTerm {
    /// Flat amount regardless of the quote value
    Amount(Money),
    /// Share of the pre-fee quote value
    Percentage(Percent),
}

impl CommissionTerm {
    pub fn value(&self) -> Decimal {
        match self {
            CommissionTerm::Amount(value) | CommissionTerm::Percentage(value) => *value,
        }
    }

    /// Commission owed for a quote worth `base_value` before payment fees
    pub fn amount_for(&self, base_value: Money) -> PricingResult<Money> {
        if self.value() <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        match self {
            CommissionTerm::Amount(value) => Ok(*value),
            CommissionTerm::Percentage(percent) => {
                percent_of(base_value, *percent).or_overflow("commission")
            }
        }
    }

    pub fn validate(&self) -> PricingResult<()> {
        match self {
            CommissionTerm::Amount(value) => check_amount("commission amount", *value),
            CommissionTerm::Percentage(percent) => check_rate("commission percentage", *percent),
        }
    }
}

/// Commission for an optional term; no term means no commission
pub fn commission_amount(term: Option<&CommissionTerm>, base_value: Money) -> PricingResult<Money> {
    term.map(|t| t.amount_for(base_value))
        .unwrap_or(Ok(Decimal::ZERO))
}
