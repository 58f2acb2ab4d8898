use crate::base::{DEFAULT_BASAL_HEAT_FLOW, DEFAULT_OUT_DIR};
use crate::StrError;
use std::fmt;
use std::str::FromStr;

/// Defines the output file formats written by SHEMAT-Suite
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputFormat {
    /// VTK files
    Vtk,

    /// HDF5 files
    Hdf,

    /// Tecplot files
    Plt,
}

impl OutputFormat {
    /// Returns the keyword used in the `# file output` line
    pub fn keyword(&self) -> &'static str {
        match self {
            OutputFormat::Vtk => "vtk",
            OutputFormat::Hdf => "hdf",
            OutputFormat::Plt => "plt",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = StrError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vtk" => Ok(OutputFormat::Vtk),
            "hdf" => Ok(OutputFormat::Hdf),
            "plt" => Ok(OutputFormat::Plt),
            _ => Err("unknown output format (use vtk, hdf, or plt)"),
        }
    }
}

/// Defines the lateral boundary conditions
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LateralBoundaries {
    /// No flow across the lateral boundaries
    Closed,

    /// Head and temperature fixed to their initial values at the front and back boundaries
    Open,
}

impl FromStr for LateralBoundaries {
    type Err = StrError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "closed" => Ok(LateralBoundaries::Closed),
            "open" => Ok(LateralBoundaries::Open),
            _ => Err("unknown lateral boundaries condition (use closed or open)"),
        }
    }
}

/// Holds the options to export a SHEMAT-Suite input file
pub struct ExportConfig {
    /// Output files generated by the simulator
    pub output: Vec<OutputFormat>,

    /// Solve conductive heat transport only (otherwise temperature and head are coupled)
    pub conduction_only: bool,

    /// Basal heat flow in W/m² used when no heat-flow boundary file is given
    pub basal_heat_flow: f64,

    /// Lateral boundary conditions
    pub lateral_boundaries: LateralBoundaries,

    /// Directory where the input file is saved
    pub out_dir: String,

    /// Name of the input file (also used as the model title)
    pub filename: String,
}

impl ExportConfig {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        ExportConfig {
            output: vec![OutputFormat::Vtk, OutputFormat::Hdf],
            conduction_only: true,
            basal_heat_flow: DEFAULT_BASAL_HEAT_FLOW,
            lateral_boundaries: LateralBoundaries::Closed,
            out_dir: DEFAULT_OUT_DIR.to_string(),
            filename: "geo_model_SHEMAT_input_erode".to_string(),
        }
    }

    /// Sets the output file formats
    pub fn set_output(&mut self, formats: &[OutputFormat]) -> Result<&mut Self, StrError> {
        if formats.is_empty() {
            return Err("at least one output format is required");
        }
        self.output = formats.to_vec();
        Ok(self)
    }

    /// Sets conduction-only heat transport (otherwise coupled with flow)
    pub fn set_conduction_only(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        self.conduction_only = flag;
        Ok(self)
    }

    /// Sets the basal heat flow in W/m²
    pub fn set_basal_heat_flow(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if !value.is_finite() {
            return Err("basal heat flow must be finite");
        }
        self.basal_heat_flow = value;
        Ok(self)
    }

    /// Sets the lateral boundary conditions
    pub fn set_lateral_boundaries(&mut self, option: LateralBoundaries) -> Result<&mut Self, StrError> {
        self.lateral_boundaries = option;
        Ok(self)
    }

    /// Sets the output directory
    pub fn set_out_dir(&mut self, out_dir: &str) -> Result<&mut Self, StrError> {
        if out_dir.is_empty() {
            return Err("output directory must not be empty");
        }
        self.out_dir = out_dir.to_string();
        Ok(self)
    }

    /// Sets the filename (and title) of the input file
    pub fn set_filename(&mut self, filename: &str) -> Result<&mut Self, StrError> {
        if filename.is_empty() {
            return Err("filename must not be empty");
        }
        if filename.contains('/') {
            return Err("filename must not contain a directory separator");
        }
        self.filename = filename.to_string();
        Ok(self)
    }

    /// Returns the keywords of the `# file output` line, e.g., "vtk hdf"
    pub fn output_keywords(&self) -> String {
        self.output.iter().map(|f| f.keyword()).collect::<Vec<_>>().join(" ")
    }

    /// Returns the variables of the `# active` line
    pub fn active_variables(&self) -> &'static str {
        if self.conduction_only {
            "temp"
        } else {
            "temp head"
        }
    }

    /// Returns the full path of the input file
    pub fn path_input(&self) -> String {
        format!("{}/{}", self.out_dir, self.filename)
    }
}

impl fmt::Display for ExportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Export configuration\n").unwrap();
        write!(f, "====================\n").unwrap();
        write!(f, "output = {}\n", self.output_keywords()).unwrap();
        write!(f, "conduction_only = {:?}\n", self.conduction_only).unwrap();
        write!(f, "basal_heat_flow = {:?}\n", self.basal_heat_flow).unwrap();
        write!(f, "lateral_boundaries = {:?}\n", self.lateral_boundaries).unwrap();
        write!(f, "out_dir = {}\n", self.out_dir).unwrap();
        write!(f, "filename = {}\n", self.filename).unwrap();
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{ExportConfig, LateralBoundaries, OutputFormat};
    use crate::StrError;

    #[test]
    fn new_works() {
        let config = ExportConfig::new();
        assert_eq!(config.output_keywords(), "vtk hdf");
        assert_eq!(config.active_variables(), "temp");
        assert_eq!(config.basal_heat_flow, 0.07);
        assert_eq!(config.path_input(), "/tmp/openwf/results/geo_model_SHEMAT_input_erode");
    }

    #[test]
    fn setters_work() -> Result<(), StrError> {
        let mut config = ExportConfig::new();
        config
            .set_output(&[OutputFormat::Plt])?
            .set_conduction_only(false)?
            .set_basal_heat_flow(0.09)?
            .set_lateral_boundaries(LateralBoundaries::Open)?
            .set_out_dir("/tmp/openwf/models")?
            .set_filename("POC_base_model")?;
        assert_eq!(config.output_keywords(), "plt");
        assert_eq!(config.active_variables(), "temp head");
        assert_eq!(config.path_input(), "/tmp/openwf/models/POC_base_model");
        assert_eq!(
            format!("{}", config),
            "Export configuration\n\
             ====================\n\
             output = plt\n\
             conduction_only = false\n\
             basal_heat_flow = 0.09\n\
             lateral_boundaries = Open\n\
             out_dir = /tmp/openwf/models\n\
             filename = POC_base_model\n"
        );
        Ok(())
    }

    #[test]
    fn setters_capture_errors() {
        let mut config = ExportConfig::new();
        assert_eq!(config.set_output(&[]).err(), Some("at least one output format is required"));
        assert_eq!(config.set_basal_heat_flow(f64::NAN).err(), Some("basal heat flow must be finite"));
        assert_eq!(config.set_out_dir("").err(), Some("output directory must not be empty"));
        assert_eq!(config.set_filename("").err(), Some("filename must not be empty"));
        assert_eq!(
            config.set_filename("a/b").err(),
            Some("filename must not contain a directory separator")
        );
    }

    #[test]
    fn from_str_works() {
        assert_eq!("hdf".parse::<OutputFormat>(), Ok(OutputFormat::Hdf));
        assert_eq!("open".parse::<LateralBoundaries>(), Ok(LateralBoundaries::Open));
        assert_eq!(
            "semi".parse::<LateralBoundaries>().err(),
            Some("unknown lateral boundaries condition (use closed or open)")
        );
        assert_eq!(
            "csv".parse::<OutputFormat>().err(),
            Some("unknown output format (use vtk, hdf, or plt)")
        );
    }
}
