//! Rounding to decimal places and to significant figures.
//!
//! Both functions mirror the usual host rounding primitive:
//! the exact binary value of the `f64` is rounded half to even,
//! so `0.125` rounds to `0.12` but `2.675` rounds to `2.67`
//! (it is slightly less than `2.675` in binary).

use num_traits::ToPrimitive;

use crate::exact::Exact;

/// Rounding to this many decimal places (or more) keeps any finite `f64` as is
const MAX_DECIMAL_PLACES: i32 = 323;
/// Rounding to the tens of this power (or more) always gives zero
const MIN_DECIMAL_PLACES: i32 = -308;

/// Round the value to the given number of digits after the decimal point.
///
/// The negative `ndigits` rounds to tens, hundreds, etc.
///
///```
/// # use geomatics::round_dec;
/// assert_eq!(round_dec(3.14159, 2), 3.14);
/// assert_eq!(round_dec(1250.0, -2), 1200.0);
/// assert_eq!(round_dec(0.5, 0), 0.0);
/// ```
pub fn round_dec(value: f64, ndigits: i32) -> f64 {
    if !value.is_finite() || value == 0.0 || ndigits > MAX_DECIMAL_PLACES {
        return value;
    }

    if ndigits < MIN_DECIMAL_PLACES {
        return 0.0_f64.copysign(value);
    }

    if let Ok(places) = usize::try_from(ndigits) {
        // the formatter takes the exact binary expansion and rounds it half to even
        format!("{:.*}", places, value).parse().unwrap_or(value)
    } else {
        // the powers of ten beyond 1e22 are inexact in binary,
        // so the rounding goes through the exact value of the float
        Exact::from_f64(value)
            .and_then(|exact| exact.round_dec(i64::from(ndigits)).to_f64())
            .map_or(f64::INFINITY.copysign(value), |rounded| {
                rounded.copysign(value)
            })
    }
}

/// Round the value to the `n` significant figures.
///
/// The order of magnitude is found with the decimal logarithm,
/// so the zero is returned as is.
///
///```
/// # use geomatics::round_sig;
/// assert_eq!(round_sig(1234.0, 2), 1200.0);
/// assert_eq!(round_sig(0.000_456_7, 2), 0.000_46);
/// assert_eq!(round_sig(0.0, 3), 0.0);
/// ```
pub fn round_sig(value: f64, n: i32) -> f64 {
    if value == 0.0 {
        return 0.0;
    }

    if !value.is_finite() {
        return value;
    }

    // number of digits before the decimal point: 1 for [1..10), 0 for [0.1..1)
    let magnitude = value.abs().log10().floor() as i32 + 1;
    round_dec(value, n.saturating_sub(magnitude))
}

/// Numbers which can be rounded to the given number of significant figures
pub trait RoundSig: Sized {
    /// Rounded copy of the number with at most `n` significant figures
    fn round_sig(&self, n: i32) -> Self;
}

impl RoundSig for f64 {
    fn round_sig(&self, n: i32) -> Self {
        round_sig(*self, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Count the digits of the mantissa in the shortest scientific notation
    fn significant_digits(value: f64) -> usize {
        let sci = format!("{:e}", value);
        let mantissa = sci.split('e').next().unwrap();
        mantissa.chars().filter(char::is_ascii_digit).count()
    }

    #[test]
    fn zero() {
        assert_eq!(round_sig(0.0, 3), 0.0);
        assert_eq!(round_sig(-0.0, 3), 0.0);
        assert_eq!(round_sig(0.0, 0), 0.0);
    }

    #[test]
    fn integer_part() {
        assert_eq!(round_sig(1234.0, 2), 1200.0);
        assert_eq!(round_sig(1234.0, 4), 1234.0);
        assert_eq!(round_sig(1234.0, 6), 1234.0);
        assert_eq!(round_sig(-98_765.0, 3), -98_800.0);
    }

    #[test]
    fn small_fraction() {
        assert_eq!(round_sig(0.000_456_7, 2), 0.000_46);
        assert_eq!(round_sig(0.000_456_7, 1), 0.0005);
        assert_eq!(round_sig(-0.012_345, 3), -0.0123);
    }

    #[test]
    fn unit_range() {
        assert_eq!(round_sig(1.0, 1), 1.0);
        assert_eq!(round_sig(9.87, 2), 9.9);
        assert_eq!(round_sig(0.1, 1), 0.1);
    }

    #[test]
    fn rounding_up_adds_a_digit_before_point() {
        assert_eq!(round_sig(9.96, 2), 10.0);
        assert_eq!(round_sig(999.9, 3), 1000.0);
    }

    #[test]
    fn ties_go_to_even() {
        assert_eq!(round_sig(1250.0, 2), 1200.0);
        assert_eq!(round_sig(1350.0, 2), 1400.0);
        assert_eq!(round_sig(0.125, 2), 0.12);
    }

    #[test]
    fn non_positive_count_is_not_rejected() {
        assert_eq!(round_sig(1234.0, 0), 0.0);
        assert_eq!(round_sig(5678.0, 0), 10_000.0);
        assert_eq!(round_sig(5678.0, -1), 0.0);
    }

    #[test]
    fn not_finite_pass_through() {
        assert!(round_sig(f64::NAN, 2).is_nan());
        assert_eq!(round_sig(f64::INFINITY, 2), f64::INFINITY);
        assert_eq!(round_sig(f64::NEG_INFINITY, 2), f64::NEG_INFINITY);
    }

    #[test]
    fn at_most_n_significant_digits() {
        let values = [
            123_456.789,
            -0.000_123_456_789,
            std::f64::consts::PI,
            1.0 / 3.0,
            2.0_f64.sqrt() * 1e10,
            -7.777_777e-7,
            0.999_999,
            6.02e23,
            1.6e-19,
        ];

        for value in values {
            for n in 1..=10 {
                let rounded = round_sig(value, n);
                assert!(
                    significant_digits(rounded) <= n as usize,
                    "{value} rounded to {n} figures is {rounded}"
                );
            }
        }
    }

    #[test]
    fn idempotent() {
        for value in [123.456, -0.098_76, 45_678.9, 9.999] {
            for n in 1..=6 {
                let once = round_sig(value, n);
                assert_eq!(round_sig(once, n), once);
            }
        }
    }

    #[test]
    fn trait_for_float() {
        assert_eq!(RoundSig::round_sig(&1234.0_f64, 3), 1230.0);
    }

    #[test]
    fn decimal_places() {
        assert_eq!(round_dec(3.141_59, 2), 3.14);
        assert_eq!(round_dec(3.141_59, 0), 3.0);
        assert_eq!(round_dec(-3.141_59, 3), -3.142);
        assert_eq!(round_dec(2.675, 2), 2.67);
    }

    #[test]
    fn negative_decimal_places() {
        assert_eq!(round_dec(1234.0, -1), 1230.0);
        assert_eq!(round_dec(1250.0, -2), 1200.0);
        assert_eq!(round_dec(1251.0, -2), 1300.0);
        assert_eq!(round_dec(-45.0, -1), -40.0);
    }

    #[test]
    fn integer_ties_to_even() {
        assert_eq!(round_dec(0.5, 0), 0.0);
        assert_eq!(round_dec(1.5, 0), 2.0);
        assert_eq!(round_dec(2.5, 0), 2.0);
        assert_eq!(round_dec(-2.5, 0), -2.0);
    }

    #[test]
    fn large_magnitudes() {
        assert_eq!(round_sig(3.3e23, 1), 3e23);
        assert_eq!(round_sig(6.02e23, 1), 6e23);
        assert_eq!(round_sig(1.234_567e16, 3), 1.23e16);
        assert_eq!(round_sig(-9.876_5e40, 2), -9.9e40);
        assert_eq!(round_dec(1.26e25, -24), 1.3e25);
        assert_eq!(round_dec(1.7e308, -307), 1.7e308);
    }

    #[test]
    fn large_magnitudes_keep_n_digits() {
        for exp in 16..60 {
            for mantissa in 10..100 {
                let value = f64::from(mantissa) / 10.0 * 10_f64.powi(exp);
                for n in 1..=3 {
                    let rounded = round_sig(value, n);
                    assert!(
                        significant_digits(rounded) <= n as usize,
                        "{value} rounded to {n} figures is {rounded}"
                    );
                }
            }
        }
    }

    #[test]
    fn negative_places_keep_the_sign_of_zero() {
        assert!(round_dec(-4.0, -1).is_sign_negative());
        assert_eq!(round_dec(-4.0, -1), 0.0);
        assert!(round_dec(4.0, -1).is_sign_positive());
    }

    #[test]
    fn rounded_beyond_the_float_range() {
        assert_eq!(round_dec(1.7e308, -308), f64::INFINITY);
        assert_eq!(round_sig(-1.7e308, 1), f64::NEG_INFINITY);
    }

    #[test]
    fn extreme_places() {
        assert_eq!(round_dec(1.234_5, 400), 1.234_5);
        assert_eq!(round_dec(1e300, -400), 0.0);
        assert!(round_dec(-1e300, -400).is_sign_negative());
    }
}
