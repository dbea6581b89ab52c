//! Selector of the element-wise rounding rule

use std::{convert::TryFrom, fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::InvalidMethod;

/// How the digit count passed to a rounding function is interpreted
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoundingMethod {
    /// The digit count is the number of significant figures
    #[default]
    Significant,
    /// The digit count is the number of places after the decimal point
    Decimal,
}

/// Every accepted spelling (lower case) of the methods
const SYNONYMS: [(&str, RoundingMethod); 4] = [
    ("sig", RoundingMethod::Significant),
    ("significant", RoundingMethod::Significant),
    ("dec", RoundingMethod::Decimal),
    ("decimal", RoundingMethod::Decimal),
];

impl RoundingMethod {
    /// The full lower-case name of the method
    pub const fn name(self) -> &'static str {
        match self {
            Self::Significant => "significant",
            Self::Decimal => "decimal",
        }
    }
}

impl FromStr for RoundingMethod {
    type Err = InvalidMethod;

    /// Case-insensitive lookup among the method's synonyms
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        SYNONYMS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|&(_, method)| method)
            .ok_or_else(|| InvalidMethod(s.to_owned()))
    }
}

impl TryFrom<&str> for RoundingMethod {
    type Error = InvalidMethod;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for RoundingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
