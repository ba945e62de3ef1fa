use rust_decimal::{Decimal, RoundingStrategy};

/// Currency amount. Values stay unrounded until presentation.
pub type Money = Decimal;

/// Percentage on a 0..100 scale (`10` means ten percent).
pub type Percent = Decimal;

pub const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

pub const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Largest amount, volume or duration accepted from a caller (10^12)
pub const MAX_INPUT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Smallest positive volume accepted as a divisor (0.01 ml)
pub const MIN_MEASURE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Divide, returning zero when the divisor is zero or negative.
///
/// Volumes, durations and installment counts are never meaningful below zero,
/// so a non-positive divisor is treated as "no contribution".
pub fn safe_div(numerator: Decimal, divisor: Decimal) -> Decimal {
    checked_safe_div(numerator, divisor).unwrap_or(Decimal::ZERO)
}

/// [`safe_div`] that reports overflow as `None` instead of saturating
pub fn checked_safe_div(numerator: Decimal, divisor: Decimal) -> Option<Decimal> {
    if divisor <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }
    numerator.checked_div(divisor)
}

/// `base * percent / 100`, `None` on overflow
pub fn percent_of(base: Money, percent: Percent) -> Option<Money> {
    base.checked_mul(percent / HUNDRED)
}

/// Sum of `values`, `None` on overflow
pub fn checked_sum<I>(values: I) -> Option<Money>
where
    I: IntoIterator<Item = Money>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |total, value| total.checked_add(value))
}

/// Convert a duration in minutes to fractional hours.
pub fn minutes_to_hours(minutes: Decimal) -> Decimal {
    minutes / MINUTES_PER_HOUR
}

/// Clamp negatives to zero.
pub fn floor_zero(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Round half away from zero to `scale` decimal places.
pub fn round_money(value: Money, scale: u32) -> Money {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}
