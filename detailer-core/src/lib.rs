use detailer_shared::money::{HUNDRED, MAX_INPUT, MIN_MEASURE};
use detailer_shared::{Money, Percent};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    /// A margin of 100% or more has no finite price.
    #[error("Invalid margin: desired margin {desired}% must be below 100%")]
    InvalidMargin { desired: Percent },
    #[error("Validation failed: {0}")]
    Validation(String),
    /// Result does not fit the decimal range
    #[error("Arithmetic overflow while computing {operation}")]
    Overflow { operation: &'static str },
}

pub type PricingResult<T> = Result<T, PricingError>;

/// Turn a checked-arithmetic `None` into [`PricingError::Overflow`]
pub trait OrOverflow<T> {
    fn or_overflow(self, operation: &'static str) -> PricingResult<T>;
}

impl<T> OrOverflow<T> for Option<T> {
    fn or_overflow(self, operation: &'static str) -> PricingResult<T> {
        self.ok_or(PricingError::Overflow { operation })
    }
}

/// Amounts, durations and counts: `0..=MAX_INPUT`
pub fn check_amount(field: &str, value: Money) -> PricingResult<()> {
    if value < Money::ZERO {
        return Err(PricingError::Validation(format!(
            "{} must not be negative, got {}",
            field, value
        )));
    }
    if value > MAX_INPUT {
        return Err(PricingError::Validation(format!(
            "{} must not exceed {}, got {}",
            field, MAX_INPUT, value
        )));
    }
    Ok(())
}

/// Volumes used as divisors: zero, or at least `MIN_MEASURE`
pub fn check_measure(field: &str, value: Money) -> PricingResult<()> {
    check_amount(field, value)?;
    if value > Money::ZERO && value < MIN_MEASURE {
        return Err(PricingError::Validation(format!(
            "{} must be zero or at least {}, got {}",
            field, MIN_MEASURE, value
        )));
    }
    Ok(())
}

/// Rates charged on a value: `0..=100`
pub fn check_rate(field: &str, value: Percent) -> PricingResult<()> {
    if value < Percent::ZERO || value > HUNDRED {
        return Err(PricingError::Validation(format!(
            "{} must be between 0 and 100, got {}",
            field, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_invalid_margin_message() {
        let err = PricingError::InvalidMargin { desired: dec!(100) };
        assert_eq!(
            err.to_string(),
            "Invalid margin: desired margin 100% must be below 100%"
        );
    }

    #[test]
    fn test_or_overflow() {
        assert_eq!(Some(dec!(1)).or_overflow("sum"), Ok(dec!(1)));
        assert_eq!(
            Decimal::MAX.checked_add(Decimal::ONE).or_overflow("sum"),
            Err(PricingError::Overflow { operation: "sum" })
        );
    }

    #[test]
    fn test_check_amount_bounds() {
        assert!(check_amount("unit_price", Decimal::ZERO).is_ok());
        assert!(check_amount("unit_price", MAX_INPUT).is_ok());
        assert!(check_amount("unit_price", dec!(-0.01)).is_err());
        assert!(check_amount("unit_price", MAX_INPUT + Decimal::ONE).is_err());
    }

    #[test]
    fn test_check_measure_rejects_tiny_divisors() {
        assert!(check_measure("container_volume_ml", Decimal::ZERO).is_ok());
        assert!(check_measure("container_volume_ml", dec!(0.01)).is_ok());
        let err = check_measure("container_volume_ml", dec!(0.001)).unwrap_err();
        assert!(matches!(err, PricingError::Validation(msg) if msg.contains("at least 0.01")));
    }

    #[test]
    fn test_check_rate_bounds() {
        assert!(check_rate("flat_rate_percent", dec!(2.5)).is_ok());
        assert!(check_rate("flat_rate_percent", dec!(100)).is_ok());
        assert!(check_rate("flat_rate_percent", dec!(-5)).is_err());
        assert!(check_rate("flat_rate_percent", dec!(100.01)).is_err());
    }
}
