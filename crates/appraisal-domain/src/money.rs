//! Currency helpers

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round a currency amount to whole cents, half away from zero
///
/// The amount is rounded as the decimal it prints as, so `1.005` becomes
/// `1.01` even though its binary value sits just below the midpoint.
/// Amounts outside the decimal range are rounded in floating point.
///
/// # Examples
///
/// ```
/// use appraisal_domain::round_cents;
///
/// assert_eq!(round_cents(10.456), 10.46);
/// assert_eq!(round_cents(1.005), 1.01);
/// assert_eq!(round_cents(99.0), 99.0);
/// ```
pub fn round_cents(amount: f64) -> f64 {
    if !amount.is_finite() {
        return amount;
    }

    amount
        .to_string()
        .parse::<Decimal>()
        .ok()
        .and_then(|decimal| {
            decimal
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
                .to_f64()
        })
        .unwrap_or_else(|| (amount * 100.0).round() / 100.0)
}

/// Format a dollar amount with thousands separators
///
/// # Examples
///
/// ```
/// use appraisal_domain::format_usd;
///
/// assert_eq!(format_usd(1234.4, 0), "$1,234");
/// assert_eq!(format_usd(1234.5, 2), "$1,234.50");
/// assert_eq!(format_usd(40.0, 0), "$40");
/// ```
pub fn format_usd(amount: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, amount.abs());
    let (whole, fraction) = match formatted.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };

    match fraction {
        Some(fraction) => format!("{}${}.{}", sign, grouped, fraction),
        None => format!("{}${}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping() {
        assert_eq!(format_usd(0.0, 0), "$0");
        assert_eq!(format_usd(999.0, 0), "$999");
        assert_eq!(format_usd(1000.0, 0), "$1,000");
        assert_eq!(format_usd(100000.0, 2), "$100,000.00");
        assert_eq!(format_usd(1234567.891, 2), "$1,234,567.89");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(format_usd(-1500.0, 0), "-$1,500");
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(120.0), 120.0);
        assert_eq!(round_cents(33.333333), 33.33);
        assert_eq!(round_cents(0.005001), 0.01);
    }

    #[test]
    fn test_round_cents_decimal_midpoints() {
        // Each of these is stored just below its printed midpoint
        assert_eq!(round_cents(1.005), 1.01);
        assert_eq!(round_cents(2.675), 2.68);
        assert_eq!(round_cents(1.115), 1.12);
        assert_eq!(round_cents(-1.005), -1.01);
        assert_eq!(round_cents(0.125), 0.13);
    }

    #[test]
    fn test_round_cents_out_of_decimal_range() {
        let huge = 2f64.powi(100);
        assert_eq!(round_cents(huge), huge);
        assert!(round_cents(f64::NAN).is_nan());
        assert_eq!(round_cents(f64::INFINITY), f64::INFINITY);
    }
}
