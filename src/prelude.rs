//! Makes available common structures needed to prepare and evaluate a model
//!
//! You may write `use openwf::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{Axis, Grid3, Order, RegularGrid, DEFAULT_OUT_DIR, DEFAULT_TEST_DIR};
pub use crate::postproc::{
    calc_cond_hf, calc_cond_hf_along, calc_cond_hf_over_interval, calc_tgradient, find_nearest, load_inv, Dataset,
    HeatFlow, InvData,
};
pub use crate::preproc::{
    encode_lithology, topomask, BcRecord, ExportConfig, LateralBoundaries, ShematInput, UnitProps, UnitRun,
    UnitTable,
};
