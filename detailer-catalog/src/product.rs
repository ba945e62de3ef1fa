use detailer_core::{check_amount, check_measure, PricingResult};
use detailer_shared::money::{floor_zero, safe_div};
use detailer_shared::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a product is applied
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// Concentrate mixed with water before use
    Diluted,
    /// Applied straight from the container
    ReadyToUse,
}

/// A catalog product as bought from the supplier.
///
/// `dilution_ratio` counts parts of water per part of concentrate: a 1:9
/// product yields ten parts of final mixture per part of concentrate. The
/// same `ratio + 1` convention drives both costing and the container split.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    pub kind: ProductKind,
    /// Price paid for one purchased container
    pub unit_price: Money,
    /// Volume of the purchased container
    pub container_volume_ml: Decimal,
    #[serde(default)]
    pub dilution_ratio: Decimal,
    /// Default usage for one service execution (diluted products: ml of final mixture)
    pub usage_per_application_ml: Decimal,
    /// Size of the working container (spray bottle, bucket) filled with mixture
    #[serde(default)]
    pub container_size_ml: Decimal,
}

/// Volumes needed to fill one working container
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DilutionSplit {
    pub concentrate_ml: Decimal,
    pub water_ml: Decimal,
}

impl Product {
    /// Diluted with a usable ratio
    pub fn is_effectively_diluted(&self) -> bool {
        self.kind == ProductKind::Diluted && self.dilution_ratio > Decimal::ZERO
    }

    /// Parts of final mixture per part of concentrate
    fn mixture_parts(&self) -> Decimal {
        self.dilution_ratio + Decimal::ONE
    }

    /// Cost of one ml of what actually touches the vehicle.
    ///
    /// `None` for the degenerate cases (no container volume, diluted product
    /// without a ratio) so callers fall back to a zero contribution.
    fn cost_per_applied_ml(&self) -> Option<Money> {
        if self.container_volume_ml <= Decimal::ZERO {
            return None;
        }

        let per_ml = self.unit_price / self.container_volume_ml;
        match self.kind {
            ProductKind::ReadyToUse => Some(per_ml),
            ProductKind::Diluted if self.dilution_ratio > Decimal::ZERO => {
                Some(per_ml / self.mixture_parts())
            }
            ProductKind::Diluted => None,
        }
    }

    /// Cost of one application using the product's default usage
    pub fn cost_per_application(&self) -> Money {
        self.cost_per_application_with_usage(self.usage_per_application_ml)
    }

    /// Cost of one application with an overridden usage, as set per service
    pub fn cost_per_application_with_usage(&self, usage_ml: Decimal) -> Money {
        self.cost_per_applied_ml()
            .map(|rate| rate * usage_ml)
            .unwrap_or(Decimal::ZERO)
    }

    /// Cost of filling one working container with diluted mixture
    pub fn cost_per_container(&self) -> Money {
        if self.container_size_ml <= Decimal::ZERO || !self.is_effectively_diluted() {
            return Decimal::ZERO;
        }

        self.cost_per_applied_ml()
            .map(|rate| rate * self.container_size_ml)
            .unwrap_or(Decimal::ZERO)
    }

    /// Concentrate and water needed for one working container
    pub fn dilution_split(&self) -> DilutionSplit {
        let size = floor_zero(self.container_size_ml);

        if !self.is_effectively_diluted() {
            return DilutionSplit {
                concentrate_ml: size,
                water_ml: Decimal::ZERO,
            };
        }

        let concentrate_ml = size / self.mixture_parts();
        DilutionSplit {
            concentrate_ml,
            water_ml: floor_zero(size - concentrate_ml),
        }
    }

    /// Number of applications one purchased container yields
    pub fn applications_per_unit(&self) -> Decimal {
        let final_volume = if self.is_effectively_diluted() {
            self.container_volume_ml * self.mixture_parts()
        } else {
            self.container_volume_ml
        };

        safe_div(floor_zero(final_volume), self.usage_per_application_ml)
    }

    /// Reject values that cannot come from a real catalog record.
    ///
    /// Within these bounds the single-product figures above cannot overflow.
    pub fn validate(&self) -> PricingResult<()> {
        check_amount("product unit_price", self.unit_price)?;
        check_measure("product container_volume_ml", self.container_volume_ml)?;
        check_amount("product dilution_ratio", self.dilution_ratio)?;
        check_measure("product usage_per_application_ml", self.usage_per_application_ml)?;
        check_amount("product container_size_ml", self.container_size_ml)
    }
}
