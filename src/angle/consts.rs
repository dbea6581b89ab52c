pub(crate) const MINUTES_IN_DEGREE: u8 = 60;
pub(crate) const SECONDS_IN_MINUTE: u8 = 60;

pub(crate) const DEGREE_SIGN: char = '°';
pub(crate) const ARC_MINUTE_SIGN: char = '\'';
pub(crate) const ARC_SECOND_SIGN: char = '"';

// typographic marks
pub(crate) const PRIME_SIGN: char = '′';
pub(crate) const DOUBLE_PRIME_SIGN: char = '″';

// the degree sign substitute on keyboards without `°`
pub(crate) const ASCII_DEGREE_SIGN: char = '*';
