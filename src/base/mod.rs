//! Implements the base structures shared by pre- and post-processing

mod constants;
mod enums;
mod grid;
mod regular_grid;
pub use crate::base::constants::*;
pub use crate::base::enums::*;
pub use crate::base::grid::*;
pub use crate::base::regular_grid::*;
