use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use detailer_api::{
    app,
    app_config::{Config, PricingSettings},
    AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    app(AppState::new(PricingSettings::default()))
}

async fn post_json(path: &str, body: Value) -> (StatusCode, Value) {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn wash_service() -> Value {
    json!({
        "name": "Detailed wash",
        "labor_cost_per_hour": 50,
        "execution_time_minutes": 60,
        "other_costs_flat": 0,
        "linked_products": [{
            "product": {
                "kind": "ready_to_use",
                "unit_price": 50,
                "container_volume_ml": 500,
                "usage_per_application_ml": 100
            },
            "usage_per_application_ml": 100
        }]
    })
}

#[tokio::test]
async fn test_health() {
    let response = test_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_quote_totals_scenario() {
    let (status, body) = post_json(
        "/v1/pricing/quotes/totals",
        json!({
            "quote": {
                "services": [wash_service()],
                "total_service_value": 100
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totals"]["total_cost"].as_f64(), Some(60.0));
    assert_eq!(body["totals"]["net_profit"].as_f64(), Some(40.0));
    assert_eq!(body["totals"]["profit_margin_percent"].as_f64(), Some(40.0));
    assert_eq!(body["profit_per_hour"].as_f64(), Some(40.0));
    assert_eq!(body["services"][0]["name"], "Detailed wash");
    assert!(body["installment_amount"].is_null());
}

#[tokio::test]
async fn test_quote_totals_with_commission_and_credit() {
    let (status, body) = post_json(
        "/v1/pricing/quotes/totals",
        json!({
            "quote": {
                "services": [wash_service()],
                "total_service_value": 200,
                "commission": { "kind": "percentage", "value": 10 },
                "payment": {
                    "method": {
                        "kind": "credit",
                        "installment_rates": [
                            { "installments": 1, "rate_percent": 2.5 },
                            { "installments": 3, "rate_percent": 5 }
                        ]
                    },
                    "installments": 3
                }
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totals"]["commission_amount"].as_f64(), Some(20.0));
    assert_eq!(body["totals"]["payment_fee_amount"].as_f64(), Some(10.0));
    assert_eq!(body["totals"]["total_cost"].as_f64(), Some(90.0));
    assert_eq!(body["totals"]["final_price_with_fee"].as_f64(), Some(190.0));
    assert_eq!(body["installment_amount"].as_f64(), Some(66.67));
}

#[tokio::test]
async fn test_operational_cost_entry_switches_to_monthly_average() {
    let (status, body) = post_json(
        "/v1/pricing/quotes/totals",
        json!({
            "quote": {
                "services": [wash_service()],
                "total_service_value": 100
            },
            "operational_costs": [
                { "name": "produtos", "monthly_amount": 600, "services_per_month": 40 }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totals"]["total_products_cost"].as_f64(), Some(15.0));
    assert_eq!(body["totals"]["total_cost"].as_f64(), Some(65.0));
    assert_eq!(body["services"][0]["products_cost"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_negative_quote_value_is_rejected() {
    let (status, body) = post_json(
        "/v1/pricing/quotes/totals",
        json!({
            "quote": {
                "services": [],
                "total_service_value": -1
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("total_service_value"));
}

#[tokio::test]
async fn test_product_cost() {
    let (status, body) = post_json(
        "/v1/pricing/products/cost",
        json!({
            "kind": "diluted",
            "unit_price": 100,
            "container_volume_ml": 1000,
            "dilution_ratio": 9,
            "usage_per_application_ml": 50,
            "container_size_ml": 500
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cost_per_application"].as_f64(), Some(0.5));
    assert_eq!(body["cost_per_container"].as_f64(), Some(5.0));
    assert_eq!(body["dilution_split"]["concentrate_ml"].as_f64(), Some(50.0));
    assert_eq!(body["dilution_split"]["water_ml"].as_f64(), Some(450.0));
    assert_eq!(body["applications_per_unit"].as_f64(), Some(200.0));
}

#[tokio::test]
async fn test_service_cost_with_desired_margin() {
    let (status, body) = post_json(
        "/v1/pricing/services/cost",
        json!({
            "service": wash_service(),
            "desired_margin_percent": 40
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_cost"].as_f64(), Some(60.0));
    assert_eq!(body["suggested_price"].as_f64(), Some(100.0));
    assert_eq!(body["profit_margin_percent"].as_f64(), Some(40.0));
}

#[tokio::test]
async fn test_suggested_price() {
    let (status, body) = post_json(
        "/v1/pricing/suggested-price",
        json!({ "total_cost": 60, "desired_margin_percent": 40 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggested_price"].as_f64(), Some(100.0));
}

#[tokio::test]
async fn test_suggested_price_rejects_full_margin() {
    let (status, body) = post_json(
        "/v1/pricing/suggested-price",
        json!({ "total_cost": 60, "desired_margin_percent": 100 }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid margin"));
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let (status, body) = post_json(
        "/v1/pricing/suggested-price",
        json!({ "total_cost": "sixty" }),
    )
    .await;

    assert!(status.is_client_error());
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_service_cost_with_operational_costs() {
    let (status, body) = post_json(
        "/v1/pricing/services/cost",
        json!({
            "service": wash_service(),
            "operational_costs": [
                { "name": "Produtos", "monthly_amount": 300, "services_per_month": 20 }
            ],
            "sale_price": 130
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products_cost"].as_f64(), Some(15.0));
    assert_eq!(body["total_cost"].as_f64(), Some(65.0));
    assert_eq!(body["profit_margin_percent"].as_f64(), Some(50.0));
}

#[tokio::test]
async fn test_operational_costs_without_entry_fall_back_to_per_service() {
    let (status, body) = post_json(
        "/v1/pricing/quotes/totals",
        json!({
            "quote": {
                "services": [wash_service()],
                "total_service_value": 100,
                "costing_mode": { "mode": "monthly_average", "amount": 99 }
            },
            "operational_costs": [
                { "name": "Aluguel", "monthly_amount": 2000 }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totals"]["total_products_cost"].as_f64(), Some(10.0));
    assert_eq!(body["totals"]["total_cost"].as_f64(), Some(60.0));
    assert_eq!(body["services"][0]["products_cost"].as_f64(), Some(10.0));
}

#[tokio::test]
async fn test_negative_debit_rate_is_rejected() {
    let (status, body) = post_json(
        "/v1/pricing/quotes/totals",
        json!({
            "quote": {
                "services": [wash_service()],
                "total_service_value": 100,
                "payment": { "method": { "kind": "debit", "flat_rate_percent": -5 } }
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("flat_rate_percent"));
}

#[tokio::test]
async fn test_negative_monthly_average_is_rejected() {
    let (status, body) = post_json(
        "/v1/pricing/quotes/totals",
        json!({
            "quote": {
                "services": [wash_service()],
                "total_service_value": 100,
                "costing_mode": { "mode": "monthly_average", "amount": -30 }
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("monthly_average"));
}

#[tokio::test]
async fn test_negative_operational_cost_is_rejected() {
    let (status, body) = post_json(
        "/v1/pricing/services/cost",
        json!({
            "service": wash_service(),
            "operational_costs": [
                { "name": "Produtos", "monthly_amount": -300, "services_per_month": 20 }
            ],
            "sale_price": 130
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("monthly_amount"));
}

#[tokio::test]
async fn test_overflow_is_an_internal_error() {
    // 10^12 of profit over 10^-20 minutes does not fit a decimal
    let (status, body) = post_json(
        "/v1/pricing/quotes/totals",
        json!({
            "quote": {
                "services": [{
                    "labor_cost_per_hour": 0,
                    "execution_time_minutes": 1e-20
                }],
                "total_service_value": 1000000000000u64
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
}

#[test]
fn test_config_load_with_env_override() {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../config");

    let config = Config::load_from(dir, Some(Default::default())).unwrap();
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.pricing.rounding_scale, 2);
    assert_eq!(config.pricing.product_cost_entry, "Produtos");

    let env = [("DETAILER__PRICING__ROUNDING_SCALE".to_string(), "4".to_string())]
        .into_iter()
        .collect();
    let config = Config::load_from(dir, Some(env)).unwrap();
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.pricing.rounding_scale, 4);
    assert_eq!(config.pricing.product_cost_entry, "Produtos");
}
