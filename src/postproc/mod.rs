//! Implements the evaluation of SHEMAT-Suite results

mod borehole;
mod dataset;
mod heat_capacity;
mod heat_flow;
mod inversion;
mod plotting;
mod statistics;
pub use crate::postproc::borehole::*;
pub use crate::postproc::dataset::*;
pub use crate::postproc::heat_capacity::*;
pub use crate::postproc::heat_flow::*;
pub use crate::postproc::inversion::*;
pub use crate::postproc::plotting::*;
pub use crate::postproc::statistics::*;
