pub mod commission;
pub mod costing;
pub mod models;
pub mod payment;
pub mod pricing;
pub mod totals;

pub use commission::CommissionTerm;
pub use costing::{OperationalCost, ProductCostingMode};
pub use models::{QuoteInput, QuoteReport, QuoteTotals};
pub use payment::{InstallmentRate, PaymentMethodFee, PaymentSelection};
pub use pricing::{
    margin_percent, profitability_per_hour, service_pricing, suggested_price, ServicePricing,
};
pub use totals::{assemble_report, assemble_totals};
