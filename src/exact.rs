//! Exact rational numbers of arbitrary precision.
//!
//! The values entered as integers, fractions or decimal literals
//! are stored without any loss and rounded to significant figures exactly,
//! so no binary floating point error sneaks into the rounded result.

use std::{cmp::Ordering, fmt, str::FromStr};

use lazy_static::lazy_static;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Float, One, Signed, ToPrimitive, Zero};
use regex::Regex;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use geomatics_types::ParseEntryError;

use crate::round::RoundSig;

/// Significant figures kept when converting to `f64`:
/// 17 are enough to identify any double, the rest protects the last one.
const FLOAT_CONVERSION_FIGURES: i32 = 20;

/// Reduced fraction with the positive denominator.
///
///```
/// # use geomatics::Exact;
/// let third: Exact = "1/3".parse().unwrap();
/// assert_eq!(third.round_sig(3).to_string(), "333/1000");
///
/// let same: Exact = "0.333".parse().unwrap();
/// assert_eq!(third.round_sig(3), same);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Exact {
    numer: BigInt,
    denom: BigInt,
}

/// `10^exp`, the exponents beyond `u32::MAX` saturate
fn pow_10(exp: u64) -> BigInt {
    let exp = u32::try_from(exp).unwrap_or(u32::MAX);
    BigInt::from(10_u8).pow(exp)
}

fn decimal_len(n: &BigInt) -> i64 {
    let digits = n.magnitude().to_str_radix(10).len();
    i64::try_from(digits).unwrap_or(i64::MAX)
}

impl Exact {
    /// The fraction `numer / denom`. No fraction with the zero denominator.
    pub fn new(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Option<Self> {
        let denom = denom.into();
        if denom.is_zero() {
            return None;
        }

        Some(Self::reduced(numer.into(), denom))
    }

    /// The whole number
    pub fn from_integer(n: impl Into<BigInt>) -> Self {
        Self {
            numer: n.into(),
            denom: BigInt::one(),
        }
    }

    /// The exact binary value of the finite float
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }

        let (mantissa, exponent, sign) = Float::integer_decode(value);
        let mut numer = BigInt::from(mantissa);
        if sign < 0 {
            numer = -numer;
        }

        let shift = usize::from(exponent.unsigned_abs());
        Some(if exponent >= 0 {
            Self::from_integer(numer << shift)
        } else {
            Self::reduced(numer, BigInt::one() << shift)
        })
    }

    /// `mantissa * 10^exp`
    pub fn from_scientific(mantissa: impl Into<BigInt>, exp: i64) -> Self {
        let mantissa = mantissa.into();
        let scale = pow_10(exp.unsigned_abs());
        if exp >= 0 {
            Self::from_integer(mantissa * scale)
        } else {
            Self::reduced(mantissa, scale)
        }
    }

    fn reduced(numer: BigInt, denom: BigInt) -> Self {
        let (numer, denom) = if denom.is_negative() {
            (-numer, -denom)
        } else {
            (numer, denom)
        };

        let gcd = numer.gcd(&denom);
        if gcd.is_one() || gcd.is_zero() {
            return Self { numer, denom };
        }

        Self {
            numer: numer / &gcd,
            denom: denom / gcd,
        }
    }

    /// The numerator (carries the sign)
    pub const fn numer(&self) -> &BigInt {
        &self.numer
    }

    /// The denominator (always positive)
    pub const fn denom(&self) -> &BigInt {
        &self.denom
    }

    /// Is it `0`?
    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    /// Is the denominator `1`?
    pub fn is_integer(&self) -> bool {
        self.denom.is_one()
    }

    /// The integer part (rounded toward zero)
    pub fn trunc(&self) -> BigInt {
        &self.numer / &self.denom
    }

    /// Is `|self| >= 10^exp`?
    fn abs_reaches_pow_10(&self, exp: i64) -> bool {
        let numer = self.numer.abs();
        let scale = pow_10(exp.unsigned_abs());
        if exp >= 0 {
            numer >= &self.denom * scale
        } else {
            numer * scale >= self.denom
        }
    }

    /// `floor(log10(|self|))` for the non-zero value
    fn decimal_exponent(&self) -> i64 {
        // the quotient of the numbers having `a` and `b` digits
        // lies in the range (10^(a-b-1) .. 10^(a-b+1))
        let estimate = decimal_len(&self.numer) - decimal_len(&self.denom);
        if self.abs_reaches_pow_10(estimate) {
            estimate
        } else {
            estimate - 1
        }
    }

    /// The fewest digits after the decimal point to write the value exactly,
    /// `None` for the recurring decimals
    fn terminating_places(&self) -> Option<i64> {
        let twos = self.denom.trailing_zeros().unwrap_or(0);
        let mut rest = &self.denom >> twos;
        let five = BigInt::from(5_u8);
        let mut fives = 0_u64;
        loop {
            let (quot, rem) = rest.div_rem(&five);
            if !rem.is_zero() {
                break;
            }
            rest = quot;
            fives += 1;
        }

        rest.is_one()
            .then(|| i64::try_from(twos.max(fives)).unwrap_or(i64::MAX))
    }

    /// The nearest integer to `self * 10^places` (the ties go to the even one)
    fn scaled_round(&self, places: i64) -> BigInt {
        let scale = pow_10(places.unsigned_abs());
        let (numer, denom) = if places >= 0 {
            (&self.numer * scale, self.denom.clone())
        } else {
            (self.numer.clone(), &self.denom * scale)
        };

        let (quot, rem) = numer.div_mod_floor(&denom);
        // 0 <= rem < denom
        match (rem * 2_u8).cmp(&denom) {
            Ordering::Less => quot,
            Ordering::Greater => quot + 1_u8,
            Ordering::Equal if quot.is_even() => quot,
            Ordering::Equal => quot + 1_u8,
        }
    }

    /// Round to the given number of digits after the decimal point.
    /// The negative `places` rounds to tens, hundreds, etc.
    pub fn round_dec(&self, places: i64) -> Self {
        let is_exact = self
            .terminating_places()
            .map_or(false, |exact_places| exact_places <= places);
        if self.is_zero() || is_exact {
            return self.clone();
        }

        // |self| < 10^(-places-1) is less than a half of 10^(-places)
        if places < 0 && self.decimal_exponent() < places.saturating_neg().saturating_sub(1) {
            return Self::from_integer(0);
        }

        let rounded = self.scaled_round(places);
        Self::from_scientific(rounded, places.saturating_neg())
    }

    /// Round to the `n` significant figures, the ties go to the even digit
    pub fn round_sig(&self, n: i32) -> Self {
        if self.is_zero() {
            return self.clone();
        }

        let places = i64::from(n) - 1 - self.decimal_exponent();
        self.round_dec(places)
    }
}

impl RoundSig for Exact {
    fn round_sig(&self, n: i32) -> Self {
        Self::round_sig(self, n)
    }
}

impl Ord for Exact {
    fn cmp(&self, other: &Self) -> Ordering {
        // both denominators are positive
        (&self.numer * &other.denom).cmp(&(&other.numer * &self.denom))
    }
}

impl PartialOrd for Exact {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl ToPrimitive for Exact {
    fn to_i64(&self) -> Option<i64> {
        self.trunc().to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.trunc().to_u64()
    }

    /// The nearest `f64`, or `None` when the value is out of the `f64` range
    fn to_f64(&self) -> Option<f64> {
        if self.is_zero() {
            return Some(0.0);
        }

        let places = i64::from(FLOAT_CONVERSION_FIGURES) - 1 - self.decimal_exponent();
        let mantissa = self.scaled_round(places);
        let value: f64 = format!("{}e{}", mantissa, places.saturating_neg())
            .parse()
            .ok()?;
        value.is_finite().then_some(value)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Exact {
                fn from(val: $t) -> Self {
                    Self::from_integer(val)
                }
            }
        )+
    };
}

impl_from_int!(i32, i64, u32, u64, BigInt);

lazy_static! {
    static ref RE_FRACTION: Regex = Regex::new(r"^(?P<numer>[+-]?\d+)(?:/(?P<denom>[+-]?\d+))?$")
        .expect("Fraction regex is valid");
    static ref RE_DECIMAL: Regex = Regex::new(
        r"^(?P<sign>[+-]?)(?P<int>\d*)(?:\.(?P<fract>\d*))?(?:[eE](?P<exp>[+-]?\d+))?$"
    )
    .expect("Decimal regex is valid");
}

fn parse_int(s: &str) -> Result<BigInt, ParseEntryError> {
    s.parse().map_err(|_| ParseEntryError::Notation)
}

impl Exact {
    pub(crate) fn parse_fraction(s: &str) -> Option<Result<Self, ParseEntryError>> {
        let capture = RE_FRACTION.captures(s)?;
        let numer = parse_int(&capture["numer"]);
        let denom = capture
            .name("denom")
            .map_or_else(|| Ok(BigInt::one()), |d| parse_int(d.as_str()));

        Some(numer.and_then(|numer| {
            let denom = denom?;
            Self::new(numer, denom).ok_or(ParseEntryError::ZeroDenominator)
        }))
    }

    fn parse_decimal(s: &str) -> Result<Self, ParseEntryError> {
        let capture = RE_DECIMAL.captures(s).ok_or(ParseEntryError::Notation)?;
        let int = capture.name("int").map_or("", |m| m.as_str());
        let fract = capture.name("fract").map_or("", |m| m.as_str());
        if int.is_empty() && fract.is_empty() {
            return Err(ParseEntryError::Notation);
        }

        let exp: i64 = capture
            .name("exp")
            .map_or(Ok(0), |m| m.as_str().parse())
            .map_err(|_| ParseEntryError::Notation)?;
        let fract_len = i64::try_from(fract.len()).map_err(|_| ParseEntryError::Notation)?;

        let mut mantissa = parse_int(&format!("{int}{fract}"))?;
        if &capture["sign"] == "-" {
            mantissa = -mantissa;
        }

        Ok(Self::from_scientific(mantissa, exp.saturating_sub(fract_len)))
    }
}

impl FromStr for Exact {
    type Err = ParseEntryError;

    /// Accepts integers, `p/q` fractions and decimal literals (with an optional exponent)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::parse_fraction(s).unwrap_or_else(|| Self::parse_decimal(s))
    }
}

impl fmt::Display for Exact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}
