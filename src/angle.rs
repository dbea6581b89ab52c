//! Angles in the sexagesimal notation

mod common;
mod consts;
pub mod dms;

pub use dms::{parse_dms, to_dms, Dms};
