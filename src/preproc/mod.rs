//! Implements the preparation of SHEMAT-Suite input files from geological models

mod bc_records;
mod ensemble;
mod export_config;
mod geo_model;
mod lith_encoding;
mod shemat_input;
mod topo_mask;
mod units;
pub use crate::preproc::bc_records::*;
pub use crate::preproc::ensemble::*;
pub use crate::preproc::export_config::*;
pub use crate::preproc::geo_model::*;
pub use crate::preproc::lith_encoding::*;
pub use crate::preproc::shemat_input::*;
pub use crate::preproc::topo_mask::*;
pub use crate::preproc::units::*;
