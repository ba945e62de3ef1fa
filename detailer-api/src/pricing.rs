use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use detailer_catalog::{DilutionSplit, Product, ServiceLine};
use detailer_core::{check_amount, PricingResult};
use detailer_quote::{
    assemble_report, service_pricing, suggested_price, OperationalCost, ProductCostingMode,
    QuoteInput, QuoteReport, ServicePricing,
};
use detailer_shared::money::round_money;
use detailer_shared::{Money, Percent};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ProductCostResponse {
    pub cost_per_application: Money,
    pub cost_per_container: Money,
    pub dilution_split: DilutionSplit,
    pub applications_per_unit: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct ServiceCostRequest {
    pub service: ServiceLine,
    #[serde(default)]
    pub costing_mode: ProductCostingMode,
    #[serde(default)]
    pub operational_costs: Vec<OperationalCost>,
    pub sale_price: Option<Money>,
    pub desired_margin_percent: Option<Percent>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteTotalsRequest {
    pub quote: QuoteInput,
    /// When present, decides the costing mode instead of `quote.costing_mode`
    #[serde(default)]
    pub operational_costs: Vec<OperationalCost>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestedPriceRequest {
    pub total_cost: Money,
    pub desired_margin_percent: Percent,
}

#[derive(Debug, Serialize)]
pub struct SuggestedPriceResponse {
    pub suggested_price: Money,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products/cost", post(product_cost))
        .route("/services/cost", post(service_cost))
        .route("/quotes/totals", post(quote_totals))
        .route("/suggested-price", post(suggest_price))
}

/// Operational costs, when sent, override the requested mode
fn resolve_costing_mode(
    state: &AppState,
    requested: ProductCostingMode,
    operational_costs: &[OperationalCost],
) -> PricingResult<ProductCostingMode> {
    for cost in operational_costs {
        cost.validate()?;
    }

    let mode = if operational_costs.is_empty() {
        requested
    } else {
        ProductCostingMode::from_operational_costs(
            operational_costs,
            &state.pricing.product_cost_entry,
        )
    };
    mode.validate()?;
    Ok(mode)
}

/// POST /v1/pricing/products/cost
/// Per-application and per-container cost of a catalog product.
/// Figures are left unrounded: fractions of a cent add up over a month.
pub async fn product_cost(
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<Json<ProductCostResponse>, AppError> {
    let Json(product) = payload?;
    product.validate()?;

    Ok(Json(ProductCostResponse {
        cost_per_application: product.cost_per_application(),
        cost_per_container: product.cost_per_container(),
        dilution_split: product.dilution_split(),
        applications_per_unit: product.applications_per_unit(),
    }))
}

/// POST /v1/pricing/services/cost
pub async fn service_cost(
    State(state): State<AppState>,
    payload: Result<Json<ServiceCostRequest>, JsonRejection>,
) -> Result<Json<ServicePricing>, AppError> {
    let Json(req) = payload?;
    req.service.validate()?;
    if let Some(price) = req.sale_price {
        check_amount("sale_price", price)?;
    }

    let mode = resolve_costing_mode(&state, req.costing_mode, &req.operational_costs)?;
    let pricing = service_pricing(
        &req.service,
        &mode,
        req.sale_price,
        req.desired_margin_percent,
    )?;

    Ok(Json(pricing.rounded(state.pricing.rounding_scale)))
}

/// POST /v1/pricing/quotes/totals
/// Recomputed by the client on every edit of a quote form
pub async fn quote_totals(
    State(state): State<AppState>,
    payload: Result<Json<QuoteTotalsRequest>, JsonRejection>,
) -> Result<Json<QuoteReport>, AppError> {
    let Json(req) = payload?;
    let mut quote = req.quote;
    quote.validate()?;

    quote.costing_mode =
        resolve_costing_mode(&state, quote.costing_mode, &req.operational_costs)?;

    let report = assemble_report(&quote)?;
    tracing::debug!(
        "Quote with {} services: total cost {}, net profit {}",
        quote.services.len(),
        report.totals.total_cost,
        report.totals.net_profit
    );

    Ok(Json(report.rounded(state.pricing.rounding_scale)))
}

/// POST /v1/pricing/suggested-price
pub async fn suggest_price(
    State(state): State<AppState>,
    payload: Result<Json<SuggestedPriceRequest>, JsonRejection>,
) -> Result<Json<SuggestedPriceResponse>, AppError> {
    let Json(req) = payload?;
    check_amount("total_cost", req.total_cost)?;

    let price = suggested_price(req.total_cost, req.desired_margin_percent)?;

    Ok(Json(SuggestedPriceResponse {
        suggested_price: round_money(price, state.pricing.rounding_scale),
    }))
}
