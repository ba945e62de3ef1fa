use detailer_core::{check_rate, OrOverflow, PricingResult};
use detailer_shared::money::percent_of;
use detailer_shared::{Money, Percent};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a credit card rate table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct InstallmentRate {
    pub installments: u32,
    pub rate_percent: Percent,
}

/// Processor fee schedule for a payment method
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaymentMethodFee {
    Debit {
        flat_rate_percent: Percent,
    },
    Credit {
        #[serde(default)]
        installment_rates: Vec<InstallmentRate>,
    },
    /// Cash, bank transfer and anything else without a processor cut
    #[serde(rename = "none")]
    NoFee,
}

impl PaymentMethodFee {
    /// Credit schedule from `(installments, rate_percent)` pairs
    pub fn credit<I>(rates: I) -> Self
    where
        I: IntoIterator<Item = (u32, Percent)>,
    {
        PaymentMethodFee::Credit {
            installment_rates: rates
                .into_iter()
                .map(|(installments, rate_percent)| InstallmentRate {
                    installments,
                    rate_percent,
                })
                .collect(),
        }
    }

    /// Rate applied for the given installment count.
    ///
    /// Credit without an installment count falls back to the single-payment
    /// rate; a count missing from the table has no fee.
    pub fn rate_for(&self, installments: Option<u32>) -> Percent {
        match self {
            PaymentMethodFee::Debit { flat_rate_percent } => *flat_rate_percent,
            PaymentMethodFee::Credit { installment_rates } => {
                let count = installments.unwrap_or(1);
                installment_rates
                    .iter()
                    .find(|row| row.installments == count)
                    .map(|row| row.rate_percent)
                    .unwrap_or(Decimal::ZERO)
            }
            PaymentMethodFee::NoFee => Decimal::ZERO,
        }
    }

    /// Fee withheld by the processor on `base_value`
    pub fn fee(&self, base_value: Money, installments: Option<u32>) -> PricingResult<Money> {
        percent_of(base_value, self.rate_for(installments)).or_overflow("payment fee")
    }

    pub fn validate(&self) -> PricingResult<()> {
        match self {
            PaymentMethodFee::Debit { flat_rate_percent } => {
                check_rate("debit flat_rate_percent", *flat_rate_percent)
            }
            PaymentMethodFee::Credit { installment_rates } => installment_rates
                .iter()
                .try_for_each(|row| check_rate("credit rate_percent", row.rate_percent)),
            PaymentMethodFee::NoFee => Ok(()),
        }
    }
}

/// The payment method chosen on a quote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentSelection {
    pub method: PaymentMethodFee,
    #[serde(default)]
    pub installments: Option<u32>,
}

impl PaymentSelection {
    pub fn fee(&self, base_value: Money) -> PricingResult<Money> {
        self.method.fee(base_value, self.installments)
    }

    /// Value of each credit installment; `None` for other methods
    pub fn installment_amount(&self, base_value: Money) -> Option<Money> {
        match self.method {
            PaymentMethodFee::Credit { .. } => {
                let count = self.installments.unwrap_or(1).max(1);
                Some(base_value / Decimal::from(count))
            }
            PaymentMethodFee::Debit { .. } | PaymentMethodFee::NoFee => None,
        }
    }

    pub fn validate(&self) -> PricingResult<()> {
        self.method.validate()
    }
}

/// Fee for an optional selection; no selection means no fee
pub fn payment_fee(
    selection: Option<&PaymentSelection>,
    base_value: Money,
) -> PricingResult<Money> {
    selection
        .map(|s| s.fee(base_value))
        .unwrap_or(Ok(Decimal::ZERO))
}
