use crate::commission::CommissionTerm;
use crate::costing::ProductCostingMode;
use crate::payment::PaymentSelection;
use detailer_catalog::{ServiceLine, ServiceLineBreakdown};
use detailer_core::{check_amount, OrOverflow, PricingResult};
use detailer_shared::money::{checked_sum, floor_zero, round_money};
use detailer_shared::{Money, Percent};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything needed to price one quote or sale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteInput {
    pub services: Vec<ServiceLine>,
    #[serde(default)]
    pub other_costs_global: Money,
    #[serde(default)]
    pub commission: Option<CommissionTerm>,
    #[serde(default)]
    pub payment: Option<PaymentSelection>,
    /// Price agreed with the client, before any processor fee
    pub total_service_value: Money,
    #[serde(default)]
    pub costing_mode: ProductCostingMode,
}

impl QuoteInput {
    pub fn validate(&self) -> PricingResult<()> {
        for service in &self.services {
            service.validate()?;
        }

        check_amount("other_costs_global", self.other_costs_global)?;
        check_amount("total_service_value", self.total_service_value)?;
        if let Some(term) = &self.commission {
            term.validate()?;
        }
        if let Some(payment) = &self.payment {
            payment.validate()?;
        }
        self.costing_mode.validate()
    }

    /// Execution time of all service lines, in minutes
    pub fn execution_time_minutes(&self) -> PricingResult<Decimal> {
        checked_sum(
            self.services
                .iter()
                .map(|s| floor_zero(s.execution_time_minutes)),
        )
        .or_overflow("execution time")
    }
}

/// Cost, price and margin figures of a quote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteTotals {
    pub total_products_cost: Money,
    pub total_labor_cost: Money,
    pub total_other_costs: Money,
    pub commission_amount: Money,
    pub payment_fee_amount: Money,
    pub total_cost: Money,
    pub total_service_value: Money,
    /// What the provider receives after the processor's cut
    pub final_price_with_fee: Money,
    pub net_profit: Money,
    pub profit_margin_percent: Percent,
}

impl QuoteTotals {
    /// Copy with every figure rounded for display or persistence
    pub fn rounded(&self, scale: u32) -> Self {
        Self {
            total_products_cost: round_money(self.total_products_cost, scale),
            total_labor_cost: round_money(self.total_labor_cost, scale),
            total_other_costs: round_money(self.total_other_costs, scale),
            commission_amount: round_money(self.commission_amount, scale),
            payment_fee_amount: round_money(self.payment_fee_amount, scale),
            total_cost: round_money(self.total_cost, scale),
            total_service_value: round_money(self.total_service_value, scale),
            final_price_with_fee: round_money(self.final_price_with_fee, scale),
            net_profit: round_money(self.net_profit, scale),
            profit_margin_percent: round_money(self.profit_margin_percent, scale),
        }
    }
}

/// Quote totals plus the per-line detail shown while editing a quote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteReport {
    pub totals: QuoteTotals,
    pub services: Vec<ServiceLineBreakdown>,
    pub execution_time_minutes: Decimal,
    pub profit_per_hour: Money,
    /// Value of each credit installment, when paying by credit
    pub installment_amount: Option<Money>,
}

impl QuoteReport {
    pub fn rounded(&self, scale: u32) -> Self {
        Self {
            totals: self.totals.rounded(scale),
            services: self
                .services
                .iter()
                .map(|line| ServiceLineBreakdown {
                    id: line.id,
                    name: line.name.clone(),
                    labor_cost: round_money(line.labor_cost, scale),
                    products_cost: round_money(line.products_cost, scale),
                    other_costs: round_money(line.other_costs, scale),
                    total_cost: round_money(line.total_cost, scale),
                })
                .collect(),
            execution_time_minutes: self.execution_time_minutes,
            profit_per_hour: round_money(self.profit_per_hour, scale),
            installment_amount: self.installment_amount.map(|v| round_money(v, scale)),
        }
    }
}
