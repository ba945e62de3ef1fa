use crate::costing::ProductCostingMode;
use detailer_catalog::ServiceLine;
use detailer_core::{OrOverflow, PricingError, PricingResult};
use detailer_shared::money::{
    checked_safe_div, checked_sum, minutes_to_hours, round_money, HUNDRED,
};
use detailer_shared::{Money, Percent};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Price that yields `desired_margin_percent` of net margin over `total_cost`
pub fn suggested_price(total_cost: Money, desired_margin_percent: Percent) -> PricingResult<Money> {
    if desired_margin_percent >= HUNDRED {
        tracing::warn!(%desired_margin_percent, "rejected margin without a finite price");
        return Err(PricingError::InvalidMargin {
            desired: desired_margin_percent,
        });
    }

    Decimal::ONE
        .checked_sub(desired_margin_percent / HUNDRED)
        .and_then(|kept| total_cost.checked_div(kept))
        .or_overflow("suggested price")
}

/// Net profit earned per hour of execution
pub fn profitability_per_hour(
    net_profit: Money,
    execution_time_minutes: Decimal,
) -> PricingResult<Money> {
    checked_safe_div(net_profit, minutes_to_hours(execution_time_minutes))
        .or_overflow("profit per hour")
}

/// Net profit as a percentage of `value`; zero when nothing is charged
pub fn margin_percent(net_profit: Money, value: Money) -> PricingResult<Percent> {
    checked_safe_div(net_profit, value)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .or_overflow("profit margin")
}

/// Standalone profitability of one catalog service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServicePricing {
    pub labor_cost: Money,
    pub products_cost: Money,
    pub other_costs: Money,
    pub total_cost: Money,
    pub sale_price: Money,
    pub net_profit: Money,
    pub profit_margin_percent: Percent,
    pub profit_per_hour: Money,
    pub suggested_price: Option<Money>,
}

impl ServicePricing {
    pub fn rounded(&self, scale: u32) -> Self {
        Self {
            labor_cost: round_money(self.labor_cost, scale),
            products_cost: round_money(self.products_cost, scale),
            other_costs: round_money(self.other_costs, scale),
            total_cost: round_money(self.total_cost, scale),
            sale_price: round_money(self.sale_price, scale),
            net_profit: round_money(self.net_profit, scale),
            profit_margin_percent: round_money(self.profit_margin_percent, scale),
            profit_per_hour: round_money(self.profit_per_hour, scale),
            suggested_price: self.suggested_price.map(|v| round_money(v, scale)),
        }
    }
}

/// Price a single service, as done when registering it in the catalog.
///
/// Without an explicit `sale_price` the suggested price for
/// `desired_margin_percent` is used; with neither, the service is evaluated
/// at a price of zero.
pub fn service_pricing(
    service: &ServiceLine,
    mode: &ProductCostingMode,
    sale_price: Option<Money>,
    desired_margin_percent: Option<Percent>,
) -> PricingResult<ServicePricing> {
    let labor_cost = service.labor_cost();
    let products_cost = match mode {
        ProductCostingMode::PerService => service.products_cost()?,
        ProductCostingMode::MonthlyAverage { amount } => *amount,
    };
    let other_costs = service.other_costs_flat;
    let total_cost =
        checked_sum([labor_cost, products_cost, other_costs]).or_overflow("service cost")?;

    let suggested = desired_margin_percent
        .map(|margin| suggested_price(total_cost, margin))
        .transpose()?;

    let sale_price = sale_price.or(suggested).unwrap_or(Decimal::ZERO);
    let net_profit = sale_price.checked_sub(total_cost).or_overflow("net profit")?;
    let profit_margin_percent = margin_percent(net_profit, sale_price)?;
    let profit_per_hour = profitability_per_hour(net_profit, service.execution_time_minutes)?;

    Ok(ServicePricing {
        labor_cost,
        products_cost,
        other_costs,
        total_cost,
        sale_price,
        net_profit,
        profit_margin_percent,
        profit_per_hour,
        suggested_price: suggested,
    })
}
