//! Element-wise rounding of the matrices.
//!
//! A matrix can mix the exact numbers, the floating point numbers
//! and the free symbols. Rounding to significant figures keeps the exact
//! numbers exact; rounding to decimal places goes through `f64`
//! and leaves alone everything which has no floating point value.

use std::{convert::TryFrom, fmt, str::FromStr};

use lazy_static::lazy_static;
use num_traits::ToPrimitive;
use regex::Regex;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use geomatics_types::{Grid, InvalidMethod, NotNumeric, ParseEntryError, RoundingMethod};

use crate::{
    exact::Exact,
    round::{round_dec, RoundSig},
};

/// Single element of a matrix
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Entry {
    /// Rational number without any loss of precision
    Exact(Exact),
    /// Floating point number
    Float(f64),
    /// Named quantity without a numeric value
    Symbol(String),
}

impl Entry {
    /// The free symbol with the given name
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Is there any numeric value behind the entry?
    pub const fn is_numeric(&self) -> bool {
        !matches!(self, Self::Symbol(_))
    }

    /// The floating point value of the entry.
    ///
    /// # Errors
    /// For symbols and for the exact numbers beyond the `f64` range.
    pub fn to_f64(&self) -> Result<f64, NotNumeric> {
        match self {
            Self::Exact(exact) => exact.to_f64().ok_or(NotNumeric::Overflow),
            Self::Float(value) => Ok(*value),
            Self::Symbol(_) => Err(NotNumeric::Symbol),
        }
    }

    /// Round the numbers to the `n` significant figures keeping their kind,
    /// the symbols are kept as is.
    pub fn round_sig(&self, n: i32) -> Self {
        match self {
            Self::Exact(exact) => Self::Exact(exact.round_sig(n)),
            Self::Float(value) => Self::Float(value.round_sig(n)),
            Self::Symbol(_) => self.clone(),
        }
    }

    /// Round the floating point value to the `places` digits after the decimal point.
    /// Whatever has no floating point value is kept as is.
    pub fn round_dec(&self, places: i32) -> Self {
        match self.to_f64() {
            Ok(value) => Self::Float(round_dec(value, places)),
            Err(NotNumeric::Symbol | NotNumeric::Overflow) => self.clone(),
        }
    }

    /// Round with the given method
    pub fn rounded(&self, digits: i32, method: RoundingMethod) -> Self {
        match method {
            RoundingMethod::Significant => self.round_sig(digits),
            RoundingMethod::Decimal => self.round_dec(digits),
        }
    }
}

impl TryFrom<&Entry> for f64 {
    type Error = NotNumeric;

    fn try_from(value: &Entry) -> Result<Self, Self::Error> {
        value.to_f64()
    }
}

impl From<Exact> for Entry {
    fn from(val: Exact) -> Self {
        Self::Exact(val)
    }
}

impl From<f64> for Entry {
    fn from(val: f64) -> Self {
        Self::Float(val)
    }
}

impl From<i64> for Entry {
    fn from(val: i64) -> Self {
        Self::Exact(val.into())
    }
}

lazy_static! {
    static ref RE_SYMBOL: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Symbol regex is valid");
}

impl FromStr for Entry {
    type Err = ParseEntryError;

    /// Integers and `p/q` fractions are exact,
    /// decimal literals are floating point, names are symbols.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(exact) = Exact::parse_fraction(s) {
            return exact.map(Self::Exact);
        }

        if RE_SYMBOL.is_match(s) {
            return Ok(Self::symbol(s));
        }

        Ok(Self::Float(s.parse()?))
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(exact) => write!(f, "{exact}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Symbol(name) => write!(f, "{name}"),
        }
    }
}

/// Round every element of the matrix with the method given by its name
/// (`sig`/`significant` or `dec`/`decimal`, in any case).
///
///```
/// # use geomatics::{grid_from_rows, round_matrix, Entry, Grid};
/// let grid: Grid<Entry> = grid_from_rows(vec![
///     vec!["1/3".parse().unwrap(), "x".parse().unwrap()],
///     vec!["1234.5678".parse().unwrap(), "2/7".parse().unwrap()],
/// ])
/// .unwrap();
///
/// let sig = round_matrix(&grid, 3, "sig").unwrap();
/// assert_eq!(sig[(0, 0)].to_string(), "333/1000");
/// assert_eq!(sig[(1, 0)], Entry::Float(1230.0));
///
/// let dec = round_matrix(&grid, 2, "DEC").unwrap();
/// assert_eq!(dec[(0, 0)], Entry::Float(0.33));
/// assert_eq!(dec[(0, 1)], Entry::symbol("x"));
///
/// assert!(round_matrix(&grid, 2, "bogus").is_err());
/// ```
///
/// # Errors
/// When the method name is not known.
pub fn round_matrix(
    grid: &Grid<Entry>,
    digits: i32,
    method: &str,
) -> Result<Grid<Entry>, InvalidMethod> {
    let method = method.parse()?;
    Ok(round_matrix_with(grid, digits, method))
}

/// Round every element of the matrix with the given method
pub fn round_matrix_with(grid: &Grid<Entry>, digits: i32, method: RoundingMethod) -> Grid<Entry> {
    grid.map(|entry| entry.rounded(digits, method))
}
