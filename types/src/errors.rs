use std::{
    error::Error,
    fmt,
    num::{ParseFloatError, ParseIntError},
};

use crate::enum_trivial_from_impl;

/// The rounding method selector does not name any known method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMethod(pub String);

impl fmt::Display for InvalidMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid method '{}'. Use 'sig'/'significant' or 'dec'/'decimal'.",
            self.0
        )
    }
}

impl Error for InvalidMethod {}

/// The value has no floating point representation
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NotNumeric {
    /// Free symbol without a numeric value
    Symbol,
    /// Exact number too big for `f64`
    Overflow,
}

impl fmt::Display for NotNumeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::Symbol => "Cannot convert a symbolic expression to a float",
            Self::Overflow => "The exact value is out of the floating point range",
        };

        write!(f, "{msg}")
    }
}

impl Error for NotNumeric {}

/// Some part of an angle cannot be represented
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutOfRange {
    NotFinite,  // NaN or infinity
    ArcMinutes, // min >= 60
    ArcSeconds, // sec >= 60
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::NotFinite => "Angle should be a finite number of degrees",
            Self::ArcMinutes => "Angle's arc minute value not in range [0..60)",
            Self::ArcSeconds => "Angle's arc second value not in range [0..60)",
        };

        write!(f, "{msg}")
    }
}

impl Error for OutOfRange {}

/// Failed to read the Degree-Minute-Second notation
#[derive(Debug)]
pub enum ParseDmsError {
    Range(OutOfRange),
    Float(ParseFloatError),
    // this variant is practically impossible due to regex digits limitations
    Int(ParseIntError),
    DmsNotation,
}

enum_trivial_from_impl!(OutOfRange => ParseDmsError:Range);
enum_trivial_from_impl!(ParseFloatError => ParseDmsError:Float);
enum_trivial_from_impl!(ParseIntError => ParseDmsError:Int);

impl fmt::Display for ParseDmsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot parse angle: ")?;
        match self {
            Self::Range(inner) => write!(f, "{inner}"),
            Self::Float(inner) => write!(f, "{inner}"),
            Self::Int(inner) => write!(f, "{inner}"),
            Self::DmsNotation => write!(f, "not a Degree-Minute-Second notation"),
        }
    }
}

impl Error for ParseDmsError {}

/// The data does not fill the rectangular grid exactly
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ShapeError {
    /// Expected number of rows
    pub rows: usize,
    /// Expected number of columns
    pub cols: usize,
    /// Actual number of elements (or the length of the offending row)
    pub len: usize,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cannot arrange {} elements into a {}x{} grid",
            self.len, self.rows, self.cols
        )
    }
}

impl Error for ShapeError {}

/// Failed to read a matrix entry
#[derive(Debug)]
pub enum ParseEntryError {
    /// The `p/q` fraction with `q == 0`
    ZeroDenominator,
    Float(ParseFloatError),
    /// Neither a number nor a symbol name
    Notation,
}

enum_trivial_from_impl!(ParseFloatError => ParseEntryError:Float);

impl fmt::Display for ParseEntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot parse matrix entry: ")?;
        match self {
            Self::ZeroDenominator => write!(f, "zero denominator"),
            Self::Float(inner) => write!(f, "{inner}"),
            Self::Notation => write!(f, "not a number or a symbol"),
        }
    }
}

impl Error for ParseEntryError {}
