pub mod constants;
pub mod math_helpers;

pub use constants::*;
pub use math_helpers::*;

pub use crate::constants_config::SimConfig;
pub use crate::errors::SimulationError;
