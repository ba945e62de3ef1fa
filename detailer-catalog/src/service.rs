use crate::product::Product;
use detailer_core::{check_amount, check_measure, OrOverflow, PricingResult};
use detailer_shared::money::{checked_sum, minutes_to_hours};
use detailer_shared::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product attached to a service, with the usage that service consumes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkedProduct {
    pub product: Product,
    pub usage_per_application_ml: Decimal,
}

impl LinkedProduct {
    pub fn cost(&self) -> Money {
        self.product
            .cost_per_application_with_usage(self.usage_per_application_ml)
    }
}

/// One service execution on a quote or sale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceLine {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    pub labor_cost_per_hour: Money,
    pub execution_time_minutes: Decimal,
    #[serde(default)]
    pub other_costs_flat: Money,
    #[serde(default)]
    pub linked_products: Vec<LinkedProduct>,
}

/// Cost contributors of a single service line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceLineBreakdown {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub labor_cost: Money,
    pub products_cost: Money,
    pub other_costs: Money,
    pub total_cost: Money,
}

impl ServiceLine {
    /// Labor for the execution time at the hourly rate
    pub fn labor_cost(&self) -> Money {
        if self.execution_time_minutes <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        minutes_to_hours(self.execution_time_minutes) * self.labor_cost_per_hour
    }

    /// Sum of the linked products' per-application cost.
    ///
    /// Whether this figure counts toward a quote depends on the costing mode,
    /// which the quote assembler applies.
    pub fn products_cost(&self) -> PricingResult<Money> {
        checked_sum(self.linked_products.iter().map(LinkedProduct::cost))
            .or_overflow("products cost")
    }

    pub fn service_cost(&self) -> PricingResult<Money> {
        Ok(self.breakdown(true)?.total_cost)
    }

    /// Per-line figures; `include_products` is false when product cost is
    /// attributed as a monthly average instead
    pub fn breakdown(&self, include_products: bool) -> PricingResult<ServiceLineBreakdown> {
        let labor_cost = self.labor_cost();
        let products_cost = if include_products {
            self.products_cost()?
        } else {
            Decimal::ZERO
        };
        let total_cost = checked_sum([labor_cost, products_cost, self.other_costs_flat])
            .or_overflow("service cost")?;

        Ok(ServiceLineBreakdown {
            id: self.id,
            name: self.name.clone(),
            labor_cost,
            products_cost,
            other_costs: self.other_costs_flat,
            total_cost,
        })
    }

    /// Bounds every per-line figure; only sums across products can overflow.
    pub fn validate(&self) -> PricingResult<()> {
        check_amount("service labor_cost_per_hour", self.labor_cost_per_hour)?;
        check_amount("service execution_time_minutes", self.execution_time_minutes)?;
        check_amount("service other_costs_flat", self.other_costs_flat)?;

        for linked in &self.linked_products {
            check_measure(
                "linked product usage_per_application_ml",
                linked.usage_per_application_ml,
            )?;
            linked.product.validate()?;
        }

        Ok(())
    }
}
