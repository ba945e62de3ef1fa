use detailer_core::{check_amount, PricingResult};
use detailer_shared::money::safe_div;
use detailer_shared::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How product consumption is attributed to a quote
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ProductCostingMode {
    /// Sum the linked products of every service line
    #[default]
    PerService,
    /// Charge a flat average per quote, derived from monthly product spend
    MonthlyAverage { amount: Money },
}

/// An entry of the provider's operational-cost configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperationalCost {
    pub name: String,
    pub monthly_amount: Money,
    #[serde(default)]
    pub services_per_month: Option<u32>,
}

impl OperationalCost {
    /// Share of the monthly amount carried by one service
    pub fn per_service_amount(&self) -> Money {
        match self.services_per_month {
            Some(count) if count > 0 => safe_div(self.monthly_amount, Decimal::from(count)),
            _ => self.monthly_amount,
        }
    }

    pub fn validate(&self) -> PricingResult<()> {
        check_amount("operational cost monthly_amount", self.monthly_amount)
    }
}

impl ProductCostingMode {
    pub fn includes_linked_products(&self) -> bool {
        matches!(self, ProductCostingMode::PerService)
    }

    /// Pick the mode from the operational costs: an entry named `entry_name`
    /// switches product costing to its monthly average.
    pub fn from_operational_costs(costs: &[OperationalCost], entry_name: &str) -> Self {
        let wanted = entry_name.trim();

        costs
            .iter()
            .find(|cost| cost.name.trim().eq_ignore_ascii_case(wanted))
            .map(|cost| ProductCostingMode::MonthlyAverage {
                amount: cost.per_service_amount(),
            })
            .unwrap_or(ProductCostingMode::PerService)
    }

    pub fn validate(&self) -> PricingResult<()> {
        match self {
            ProductCostingMode::PerService => Ok(()),
            ProductCostingMode::MonthlyAverage { amount } => {
                check_amount("monthly_average amount", *amount)
            }
        }
    }
}
