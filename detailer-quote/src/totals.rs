use crate::commission::commission_amount;
use crate::costing::ProductCostingMode;
use crate::models::{QuoteInput, QuoteReport, QuoteTotals};
use crate::payment::payment_fee;
use crate::pricing::{margin_percent, profitability_per_hour};
use detailer_catalog::ServiceLine;
use detailer_core::{OrOverflow, PricingResult};
use detailer_shared::money::checked_sum;
use detailer_shared::Money;

fn total_products_cost(
    services: &[ServiceLine],
    mode: &ProductCostingMode,
) -> PricingResult<Money> {
    match mode {
        ProductCostingMode::PerService => {
            let per_line = services
                .iter()
                .map(ServiceLine::products_cost)
                .collect::<PricingResult<Vec<_>>>()?;
            checked_sum(per_line).or_overflow("products cost")
        }
        ProductCostingMode::MonthlyAverage { amount } => Ok(*amount),
    }
}

/// Compute the cost, price and margin figures of a quote.
///
/// Commission and payment fee are both taken on the pre-fee service value
/// and counted as costs rather than deducted from revenue.
pub fn assemble_totals(input: &QuoteInput) -> PricingResult<QuoteTotals> {
    let value = input.total_service_value;

    // 1-3. Direct costs
    let total_products_cost = total_products_cost(&input.services, &input.costing_mode)?;
    let total_labor_cost =
        checked_sum(input.services.iter().map(ServiceLine::labor_cost)).or_overflow("labor cost")?;
    let total_other_costs = checked_sum(
        input
            .services
            .iter()
            .map(|s| s.other_costs_flat)
            .chain([input.other_costs_global]),
    )
    .or_overflow("other costs")?;

    // 4. Commission
    let commission_amount = commission_amount(input.commission.as_ref(), value)?;

    // 5-6. Processor fee, then everything the provider pays out
    let payment_fee_amount = payment_fee(input.payment.as_ref(), value)?;
    let total_cost = checked_sum([
        total_products_cost,
        total_labor_cost,
        total_other_costs,
        commission_amount,
        payment_fee_amount,
    ])
    .or_overflow("total cost")?;

    // 7-9. Outcome
    let final_price_with_fee = value
        .checked_sub(payment_fee_amount)
        .or_overflow("final price")?;
    let net_profit = value.checked_sub(total_cost).or_overflow("net profit")?;
    let profit_margin_percent = margin_percent(net_profit, value)?;

    tracing::debug!(
        services = input.services.len(),
        %total_cost,
        %net_profit,
        %profit_margin_percent,
        "quote totals assembled"
    );

    Ok(QuoteTotals {
        total_products_cost,
        total_labor_cost,
        total_other_costs,
        commission_amount,
        payment_fee_amount,
        total_cost,
        total_service_value: value,
        final_price_with_fee,
        net_profit,
        profit_margin_percent,
    })
}

/// Totals plus per-line breakdown, hourly profitability and installment value
pub fn assemble_report(input: &QuoteInput) -> PricingResult<QuoteReport> {
    let totals = assemble_totals(input)?;
    let include_products = input.costing_mode.includes_linked_products();

    let services = input
        .services
        .iter()
        .map(|s| s.breakdown(include_products))
        .collect::<PricingResult<Vec<_>>>()?;

    let execution_time_minutes = input.execution_time_minutes()?;
    let profit_per_hour = profitability_per_hour(totals.net_profit, execution_time_minutes)?;
    let installment_amount = input
        .payment
        .as_ref()
        .and_then(|p| p.installment_amount(input.total_service_value));

    Ok(QuoteReport {
        totals,
        services,
        execution_time_minutes,
        profit_per_hour,
        installment_amount,
    })
}
