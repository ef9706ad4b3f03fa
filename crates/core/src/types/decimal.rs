//! Fixed-precision decimal columns.
//!
//! Money and percentage fields are stored as [`Decimal`] with a declared
//! precision: a maximum number of significant digits and a maximum number of
//! digits after the decimal point.

use rust_decimal::Decimal;

/// Declared precision of a decimal field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalFormat {
    /// Maximum number of significant digits.
    pub max_digits: u32,
    /// Maximum number of digits after the decimal point.
    pub decimal_places: u32,
}

impl DecimalFormat {
    /// Product price and order total: 12 digits, 2 places.
    pub const AMOUNT: Self = Self::new(12, 2);
    /// Payment amount: 20 digits, 2 places.
    pub const PAYMENT: Self = Self::new(20, 2);
    /// Satisfaction percentage: 5 digits, 2 places.
    pub const PERCENTAGE: Self = Self::new(5, 2);

    /// Create a new format.
    #[must_use]
    pub const fn new(max_digits: u32, decimal_places: u32) -> Self {
        Self {
            max_digits,
            decimal_places,
        }
    }

    /// Maximum number of digits before the decimal point.
    #[must_use]
    pub const fn max_whole_digits(&self) -> u32 {
        self.max_digits.saturating_sub(self.decimal_places)
    }
}

/// Digit counts of a decimal value as written.
///
/// Trailing fractional zeros count: `1.000` has four digits, three of them
/// decimal, and does not fit a field with two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitCount {
    /// Significant digits, including leading zeros after the point.
    pub digits: u32,
    /// Digits after the decimal point.
    pub decimals: u32,
}

impl DigitCount {
    /// Count the digits of `value`.
    ///
    /// `0` counts as one digit; `0.05` counts as two digits, both decimal.
    /// When the scale is longer than the mantissa, every digit is decimal.
    #[must_use]
    pub fn of(value: Decimal) -> Self {
        let decimals = value.scale();
        let mut mantissa = value.mantissa().unsigned_abs();

        let mut len = 1;
        while mantissa >= 10 {
            mantissa /= 10;
            len += 1;
        }

        Self {
            digits: len.max(decimals),
            decimals,
        }
    }

    /// Digits before the decimal point.
    #[must_use]
    pub const fn whole_digits(&self) -> u32 {
        self.digits.saturating_sub(self.decimals)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_count_simple() {
        let count = DigitCount::of(Decimal::new(1999, 2));
        assert_eq!(count, DigitCount { digits: 4, decimals: 2 });
        assert_eq!(count.whole_digits(), 2);
    }

    #[test]
    fn test_digit_count_zero() {
        assert_eq!(
            DigitCount::of(Decimal::ZERO),
            DigitCount { digits: 1, decimals: 0 }
        );
    }

    #[test]
    fn test_digit_count_leading_fraction_zeros() {
        assert_eq!(
            DigitCount::of(Decimal::new(5, 2)),
            DigitCount { digits: 2, decimals: 2 }
        );
    }

    #[test]
    fn test_digit_count_keeps_trailing_zeros() {
        assert_eq!(
            DigitCount::of(Decimal::new(1500, 3)),
            DigitCount { digits: 4, decimals: 3 }
        );
        assert_eq!(
            DigitCount::of("1.000".parse().unwrap()),
            DigitCount { digits: 4, decimals: 3 }
        );
    }

    #[test]
    fn test_digit_count_zero_with_scale() {
        assert_eq!(
            DigitCount::of("0.00".parse().unwrap()),
            DigitCount { digits: 2, decimals: 2 }
        );
    }

    #[test]
    fn test_digit_count_negative() {
        assert_eq!(
            DigitCount::of(Decimal::new(-12345, 2)),
            DigitCount { digits: 5, decimals: 2 }
        );
    }

    #[test]
    fn test_format_whole_digits() {
        assert_eq!(DecimalFormat::AMOUNT.max_whole_digits(), 10);
        assert_eq!(DecimalFormat::PERCENTAGE.max_whole_digits(), 3);
    }
}
