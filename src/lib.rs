//! Numeric utilities for geomatics (surveying and geodesy):
//!  - decimal degrees to the degrees, minutes and seconds notation;
//!  - rounding to significant figures;
//!  - element-wise rounding of the matrices of exact, floating point and symbolic values.

// The list was generated with the command
//   $ rustc -W help | grep ' allow ' | awk '{print $1}' | tr - _ | sort | xargs -I{} echo '#![warn({})]'
#![warn(absolute_paths_not_starting_with_crate)]
#![warn(anonymous_parameters)]
#![warn(deprecated_in_future)]
#![warn(elided_lifetimes_in_paths)]
#![warn(explicit_outlives_requirements)]
#![warn(keyword_idents)]
#![warn(macro_use_extern_crate)]
#![warn(meta_variable_misuse)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(non_ascii_idents)]
#![warn(single_use_lifetimes)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unstable_features)]
#![warn(unused_extern_crates)]
#![warn(unused_import_braces)]
#![warn(unused_labels)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]
#![warn(unused_results)]
#![warn(variant_size_differences)]
// recommendations
#![forbid(unsafe_code)]
#![deny(clippy::mem_forget)]
// suppress some pedantic warnings
#![allow(clippy::non_ascii_literal)]
#![allow(clippy::must_use_candidate)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]
// the float to integer casts are guarded by the range checks
#![allow(clippy::cast_possible_truncation)]

pub use angle::{parse_dms, to_dms, Dms};
pub use exact::Exact;
pub use geomatics_types::{
    grid_from_rows, Grid, InvalidMethod, NotNumeric, OutOfRange, ParseDmsError, ParseEntryError,
    RoundingMethod, ShapeError,
};
pub use matrix::{round_matrix, round_matrix_with, Entry};
pub use round::{round_dec, round_sig, RoundSig};

mod angle;
mod exact;
mod matrix;
mod round;
