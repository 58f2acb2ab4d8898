/// Defines the directory where the generated model files are saved
pub const DEFAULT_OUT_DIR: &str = "/tmp/openwf/results";

/// Defines an auxiliary directory where the test result files are saved
pub const DEFAULT_TEST_DIR: &str = "/tmp/openwf/test";

/// Average atmospheric lapse rate in K/m
pub const LAPSE_RATE: f64 = 0.0065;

/// Reference temperature at sea level in K
pub const SEA_LEVEL_TEMPERATURE: f64 = 288.0;

/// Offset between Kelvin and degrees Celsius
pub const KELVIN_OFFSET: f64 = 273.15;

/// Default basal heat flow in W/m² used for the Neumann condition at the model base
pub const DEFAULT_BASAL_HEAT_FLOW: f64 = 0.07;

/// Default vertical extent of the model below sea level in m
pub const DEFAULT_MODEL_DEPTH: f64 = 6000.0;
