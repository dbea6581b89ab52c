//! Sexagesimal (degrees, minutes, seconds) notation of the decimal degrees.
//!
//! The degrees are taken as the integer part of the angle (truncated toward zero),
//! the minutes and seconds are built from the absolute value of the remaining fraction,
//! so the sign of the angle is kept by the degrees only.
//!
//! The seconds are displayed with the fixed number of decimal digits.
//! When they round up to the full minute, the minutes are incremented
//! (or the degrees, if the minutes are already at 59).

use std::{convert::TryFrom, fmt, str::FromStr};

use lazy_static::lazy_static;
use num_bigint::BigInt;
use num_traits::{FromPrimitive, Signed, ToPrimitive};
use regex::Regex;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use geomatics_types::{OutOfRange, ParseDmsError};

use crate::round::round_dec;

use super::{
    common::parse_dms_re,
    consts::{
        ARC_MINUTE_SIGN, ARC_SECOND_SIGN, DEGREE_SIGN, DOUBLE_PRIME_SIGN, MINUTES_IN_DEGREE,
        PRIME_SIGN, SECONDS_IN_MINUTE,
    },
};

/// Degrees, minutes and seconds of an angle.
///
///```
/// # use geomatics::Dms;
/// let a = Dms::with_precision(45.5, 2).unwrap();
/// assert_eq!(a.degrees().to_string(), "45");
/// assert_eq!(a.minutes(), 30);
/// assert_eq!(a.seconds(), 0.0);
/// assert_eq!(a.to_string(), "45° 30' 0.00\"");
/// assert_eq!(format!("{a:#}"), "45° 30′ 0.00″");
/// ```
#[derive(Debug, PartialEq, Default, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dms {
    degrees: BigInt,
    minutes: u8,
    seconds: f64,
    precision: usize,
}

impl Dms {
    /// Construct from the separate components.
    ///
    /// # Errors
    /// When the minutes are not in the range `[0..60)`
    /// or the seconds are not in the range `[0..60)`.
    pub fn new(
        degrees: impl Into<BigInt>,
        minutes: u8,
        seconds: f64,
        precision: usize,
    ) -> Result<Self, OutOfRange> {
        if minutes >= MINUTES_IN_DEGREE {
            return Err(OutOfRange::ArcMinutes);
        }

        let valid_seconds = 0.0..f64::from(SECONDS_IN_MINUTE);
        if !valid_seconds.contains(&seconds) {
            return Err(OutOfRange::ArcSeconds);
        }

        Ok(Self {
            degrees: degrees.into(),
            minutes,
            seconds,
            precision,
        })
    }

    /// Split the decimal degrees into the DMS parts,
    /// with the seconds to be shown with `precision` decimal digits.
    ///
    /// # Errors
    /// When the value is not finite.
    pub fn with_precision(value: f64, precision: usize) -> Result<Self, OutOfRange> {
        let whole_degrees = value.trunc();
        let mut degrees = BigInt::from_f64(whole_degrees).ok_or(OutOfRange::NotFinite)?;

        let total_minutes = (value - whole_degrees).abs() * f64::from(MINUTES_IN_DEGREE);
        let whole_minutes = total_minutes.trunc();
        // the fraction of a degree is always less than 60 minutes
        let mut minutes = whole_minutes as u8;
        let mut seconds = (total_minutes - whole_minutes) * f64::from(SECONDS_IN_MINUTE);

        let displayed_digits = i32::try_from(precision).unwrap_or(i32::MAX);
        if round_dec(seconds, displayed_digits) == f64::from(SECONDS_IN_MINUTE) {
            // only one level of carry: the minutes are checked before the increment
            if minutes == MINUTES_IN_DEGREE - 1 {
                degrees += 1_u8;
                minutes = 0;
            } else {
                minutes += 1;
            }
            seconds = 0.0;
        }

        Ok(Self {
            degrees,
            minutes,
            seconds,
            precision,
        })
    }

    /// Split the decimal degrees into the DMS parts with the whole seconds.
    ///
    /// # Errors
    /// When the value is not finite.
    pub fn from_degrees(value: f64) -> Result<Self, OutOfRange> {
        Self::with_precision(value, 0)
    }

    /// The degrees (carries the sign of the angle)
    pub const fn degrees(&self) -> &BigInt {
        &self.degrees
    }

    /// The arc minutes in the range `[0..60)`
    pub const fn minutes(&self) -> u8 {
        self.minutes
    }

    /// The arc seconds in the range `[0..60)`
    pub const fn seconds(&self) -> f64 {
        self.seconds
    }

    /// The number of decimal digits of the displayed seconds
    pub const fn precision(&self) -> usize {
        self.precision
    }

    /// Convert back to the decimal degrees
    pub fn to_degrees(&self) -> f64 {
        let fraction = f64::from(self.minutes) / f64::from(MINUTES_IN_DEGREE)
            + self.seconds / (f64::from(MINUTES_IN_DEGREE) * f64::from(SECONDS_IN_MINUTE));
        let whole = self.degrees.magnitude().to_f64().unwrap_or(f64::INFINITY);
        let abs = whole + fraction;
        if self.degrees.is_negative() {
            -abs
        } else {
            abs
        }
    }
}

/// Convert the decimal degrees into the DMS notation
/// with the seconds shown with the `precision` decimal digits.
///
///```
/// # use geomatics::to_dms;
/// assert_eq!(to_dms(0.0, 0).unwrap(), "0° 0' 0\"");
/// assert_eq!(to_dms(45.5, 2).unwrap(), "45° 30' 0.00\"");
/// assert_eq!(to_dms(123.751_666_7, 0).unwrap(), "123° 45' 6\"");
/// ```
///
/// # Errors
/// When the value is not finite.
pub fn to_dms(value: f64, precision: usize) -> Result<String, OutOfRange> {
    Dms::with_precision(value, precision).map(|dms| dms.to_string())
}

impl TryFrom<f64> for Dms {
    type Error = OutOfRange;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_degrees(value)
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (min_sign, sec_sign) = if f.alternate() {
            (PRIME_SIGN, DOUBLE_PRIME_SIGN)
        } else {
            (ARC_MINUTE_SIGN, ARC_SECOND_SIGN)
        };

        write!(
            f,
            "{}{} {}{} {:.*}{}",
            self.degrees, DEGREE_SIGN, self.minutes, min_sign, self.precision, self.seconds, sec_sign
        )
    }
}

lazy_static! {
    static ref RE_UNICODE: Regex = Regex::new(&parse_dms_re(false)).expect("Unicode regex is valid");
    static ref RE_ASCII: Regex = Regex::new(&parse_dms_re(true)).expect("ASCII regex is valid");
}

impl Dms {
    /// The sign of the angle and its components
    fn parse_parts(s: &str) -> Result<(bool, Self), ParseDmsError> {
        let capture = RE_UNICODE
            .captures(s)
            .or_else(|| RE_ASCII.captures(s))
            .ok_or(ParseDmsError::DmsNotation)?;

        let negative = capture.name("sign").is_some();
        let deg: BigInt = capture
            .name("deg")
            .ok_or(ParseDmsError::DmsNotation)?
            .as_str()
            .parse()
            .map_err(|_| ParseDmsError::DmsNotation)?;
        let min: u8 = capture.name("min").map_or("0", |m| m.as_str()).parse()?;
        let sec: f64 = capture.name("sec").map_or("0", |m| m.as_str()).parse()?;
        let precision = capture.name("sec_fract").map_or(0, |m| m.as_str().len());

        let degrees = if negative { -deg } else { deg };
        let dms = Self::new(degrees, min, sec, precision)?;
        Ok((negative, dms))
    }
}

impl FromStr for Dms {
    type Err = ParseDmsError;

    /// Parse the DMS notation.
    /// The sign of the angles in the range `(-1..0)` is lost,
    /// use [`parse_dms`] to keep it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_parts(s.trim()).map(|(_, dms)| dms)
    }
}

/// Read the decimal degrees either from the DMS notation
/// or from the plain number (optionally followed by the degree sign).
///
/// The leading minus makes the whole angle negative.
///
///```
/// # use geomatics::parse_dms;
/// assert_eq!(parse_dms("45° 30' 0\"").unwrap(), 45.5);
/// assert_eq!(parse_dms("-0°30′").unwrap(), -0.5);
/// assert_eq!(parse_dms("12.25°").unwrap(), 12.25);
/// ```
///
/// # Errors
/// When the string is not a DMS notation or some part of it is out of range.
pub fn parse_dms(s: &str) -> Result<f64, ParseDmsError> {
    let s = s.trim();
    let number = s.strip_suffix(DEGREE_SIGN).unwrap_or(s);
    if let Ok(number) = number.parse::<f64>() {
        return Ok(number);
    }

    let (negative, dms) = Dms::parse_parts(s)?;
    let abs = dms.to_degrees().abs();
    Ok(if negative { -abs } else { abs })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "{actual} is not close to {expected}"
        );
    }

    #[test]
    fn default() {
        let zero = Dms::default();
        assert_eq!(zero.degrees(), &BigInt::from(0));
        assert_eq!(zero.minutes(), 0);
        assert_eq!(zero.seconds(), 0.0);
        assert_eq!(zero.precision(), 0);
    }

    #[test]
    fn zero() {
        assert_eq!(to_dms(0.0, 0).unwrap(), "0° 0' 0\"");
        assert_eq!(to_dms(0.0, 2).unwrap(), "0° 0' 0.00\"");
        assert_eq!(to_dms(-0.0, 1).unwrap(), "0° 0' 0.0\"");
    }

    #[test]
    fn half_degree() {
        assert_eq!(to_dms(45.5, 2).unwrap(), "45° 30' 0.00\"");

        let dms = Dms::with_precision(45.5, 2).unwrap();
        assert_eq!(dms.degrees(), &BigInt::from(45));
        assert_eq!(dms.minutes(), 30);
        assert_eq!(dms.seconds(), 0.0);
    }

    #[test]
    fn whole_seconds() {
        assert_eq!(to_dms(123.751_666_7, 0).unwrap(), "123° 45' 6\"");
        assert_eq!(to_dms(0.25, 0).unwrap(), "0° 15' 0\"");
    }

    #[test]
    fn fractional_seconds() {
        // 12° 34' 56.789"
        let value = 12.0 + 34.0 / 60.0 + 56.789 / 3600.0;
        assert_eq!(to_dms(value, 3).unwrap(), "12° 34' 56.789\"");
        assert_eq!(to_dms(value, 1).unwrap(), "12° 34' 56.8\"");
        assert_eq!(to_dms(value, 0).unwrap(), "12° 34' 57\"");
    }

    #[test]
    fn carry_into_degrees() {
        // 10° 59' 59.964"
        let dms = Dms::from_degrees(10.999_99).unwrap();
        assert_eq!(dms.degrees(), &BigInt::from(11));
        assert_eq!(dms.minutes(), 0);
        assert_eq!(dms.seconds(), 0.0);
        assert_eq!(dms.to_string(), "11° 0' 0\"");

        assert_eq!(to_dms(10.999_99, 1).unwrap(), "11° 0' 0.0\"");
    }

    #[test]
    fn no_carry_with_enough_digits() {
        assert_eq!(to_dms(10.999_99, 2).unwrap(), "10° 59' 59.96\"");
    }

    #[test]
    fn carry_into_minutes() {
        // 30° 15' 59.9996"
        let value = 30.0 + 15.0 / 60.0 + 59.9996 / 3600.0;
        assert_eq!(to_dms(value, 0).unwrap(), "30° 16' 0\"");
        assert_eq!(to_dms(value, 2).unwrap(), "30° 16' 0.00\"");

        let dms = Dms::with_precision(value, 2).unwrap();
        assert_eq!(dms.degrees(), &BigInt::from(30));
        assert_eq!(dms.minutes(), 16);
        assert_eq!(dms.seconds(), 0.0);
    }

    #[test]
    fn carry_into_minutes_keeps_degrees() {
        // 7° 58' 59.7" rounds to 7° 59' 0"
        let value = 7.0 + 58.0 / 60.0 + 59.7 / 3600.0;
        let dms = Dms::from_degrees(value).unwrap();
        assert_eq!(dms.degrees(), &BigInt::from(7));
        assert_eq!(dms.minutes(), 59);
        assert_eq!(dms.to_string(), "7° 59' 0\"");
    }

    #[test]
    fn negative_sign_is_in_degrees_only() {
        assert_eq!(to_dms(-10.5, 0).unwrap(), "-10° 30' 0\"");

        let dms = Dms::with_precision(-10.5, 0).unwrap();
        assert_eq!(dms.degrees(), &BigInt::from(-10));
        assert_eq!(dms.minutes(), 30);
    }

    #[test]
    fn negative_less_than_degree_loses_sign() {
        assert_eq!(to_dms(-0.5, 0).unwrap(), "0° 30' 0\"");
    }

    #[test]
    fn negative_carry_increments_degrees() {
        assert_eq!(to_dms(-10.999_99, 0).unwrap(), "-9° 0' 0\"");
    }

    #[test]
    fn outside_of_half_turn_is_not_wrapped() {
        assert_eq!(to_dms(725.25, 0).unwrap(), "725° 15' 0\"");
        assert_eq!(to_dms(-400.75, 0).unwrap(), "-400° 45' 0\"");
    }

    #[test]
    #[should_panic(expected = "NotFinite")]
    fn nan() {
        let _s = to_dms(f64::NAN, 0).unwrap();
    }

    #[test]
    #[should_panic(expected = "NotFinite")]
    fn infinity() {
        let _s = to_dms(f64::NEG_INFINITY, 2).unwrap();
    }

    #[test]
    fn beyond_machine_integers() {
        assert_eq!(to_dms(1e19, 0).unwrap(), "10000000000000000000° 0' 0\"");
        assert_eq!(to_dms(-9.3e18, 1).unwrap(), "-9300000000000000000° 0' 0.0\"");
        // the integer part of the binary value, not of the decimal literal
        assert_eq!(to_dms(1e23, 0).unwrap(), "99999999999999991611392° 0' 0\"");

        let dms = Dms::from_degrees(1e19).unwrap();
        assert_eq!(dms.degrees(), &BigInt::from(10_u64.pow(19)));
        assert_eq!(dms.to_degrees(), 1e19);
    }

    #[test]
    fn try_from_float() {
        let dms = Dms::try_from(45.25).unwrap();
        assert_eq!(dms, Dms::new(45, 15, 0.0, 0).unwrap());
    }

    #[test]
    fn typographic_marks() {
        let dms = Dms::with_precision(45.5, 1).unwrap();
        assert_eq!(format!("{dms:#}"), "45° 30′ 0.0″");
    }

    #[test]
    #[should_panic(expected = "ArcMinutes")]
    fn bad_minutes() {
        let _a = Dms::new(30, 60, 0.0, 0).unwrap();
    }

    #[test]
    #[should_panic(expected = "ArcSeconds")]
    fn bad_seconds() {
        let _a = Dms::new(30, 59, 60.0, 0).unwrap();
    }

    #[test]
    #[should_panic(expected = "ArcSeconds")]
    fn negative_seconds() {
        let _a = Dms::new(30, 59, -1.0, 0).unwrap();
    }

    #[test]
    fn to_decimal() {
        assert_close(Dms::new(45, 30, 0.0, 0).unwrap().to_degrees(), 45.5);
        assert_close(Dms::new(-10, 15, 36.0, 0).unwrap().to_degrees(), -10.26);
    }

    #[test]
    fn parse_ascii() {
        let dms: Dms = "45° 30' 15.25\"".parse().unwrap();
        assert_eq!(dms, Dms::new(45, 30, 15.25, 2).unwrap());
        assert_close(parse_dms("45° 30' 15.25\"").unwrap(), 45.504_236_111_111);
    }

    #[test]
    fn parse_without_spaces() {
        assert_close(parse_dms("45°30'15.25\"").unwrap(), 45.504_236_111_111);
        assert_close(parse_dms("45*30'15\"").unwrap(), 45.504_166_666_667);
    }

    #[test]
    fn parse_unicode() {
        let dms: Dms = "45°30′15.25″".parse().unwrap();
        assert_eq!(dms, Dms::new(45, 30, 15.25, 2).unwrap());
    }

    #[test]
    fn parse_partial() {
        assert_eq!(parse_dms("12°").unwrap(), 12.0);
        assert_eq!(parse_dms("12° 45'").unwrap(), 12.75);
    }

    #[test]
    fn parse_negative() {
        assert_eq!(parse_dms("-10° 30' 0\"").unwrap(), -10.5);
        assert_eq!(parse_dms("-0° 30' 0\"").unwrap(), -0.5);

        let dms: Dms = "-10° 30' 0\"".parse().unwrap();
        assert_eq!(dms.degrees(), &BigInt::from(-10));
    }

    #[test]
    fn parse_plain_number() {
        assert_eq!(parse_dms("45.5").unwrap(), 45.5);
        assert_eq!(parse_dms(" -3.25° ").unwrap(), -3.25);
    }

    #[test]
    #[should_panic(expected = "ArcMinutes")]
    fn parse_bad_minutes() {
        let _a = parse_dms("45° 60' 0\"").unwrap();
    }

    #[test]
    #[should_panic(expected = "ArcSeconds")]
    fn parse_bad_seconds() {
        let _a = parse_dms("45° 30' 60\"").unwrap();
    }

    #[test]
    #[should_panic(expected = "DmsNotation")]
    fn parse_not_dms() {
        let _a = parse_dms("forty five degrees").unwrap();
    }

    #[test]
    #[should_panic(expected = "DmsNotation")]
    fn parse_mixed_marks() {
        let _a = parse_dms("45° 30′ 15\"").unwrap();
    }

    #[test]
    fn carry_on_large_degrees() {
        let value = 4_000_000_000.999_999;
        assert_eq!(to_dms(value, 0).unwrap(), "4000000001° 0' 0\"");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        for dms in [
            Dms::new(-123, 45, 6.5, 1).unwrap(),
            Dms::from_degrees(1e19).unwrap(),
        ] {
            let json = serde_json::to_string(&dms).unwrap();
            let back: Dms = serde_json::from_str(&json).unwrap();
            assert_eq!(back, dms);
        }
    }

    #[test]
    fn round_trip() {
        let values = [0.0, 1.0, 45.5, 123.456_789, 359.999_9, -12.345_678, 89.000_01];
        for value in values {
            for precision in 0..=4 {
                let s = to_dms(value, precision).unwrap();
                let back = parse_dms(&s).unwrap();
                // half of the last displayed digit of the seconds
                let tolerance = 0.5 * 10_f64.powi(-(precision as i32)) / 3600.0 + 1e-12;
                assert!(
                    (back - value).abs() <= tolerance,
                    "{value} -> {s} -> {back}"
                );
            }
        }
    }
}
