//! OpenWF -- pre- and post-processing tools for geothermal SHEMAT-Suite models
//!
//! The crate prepares input files for the SHEMAT-Suite finite-difference
//! heat-transport simulator (lithology encoding, boundary conditions, unit
//! tables) and evaluates its results (conductive heat flow, temperature
//! gradients, heat capacity, borehole comparisons, rejection sampling).

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod postproc;
pub mod prelude;
pub mod preproc;
