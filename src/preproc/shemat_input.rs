use super::{bc_records_string, encode_lithology, max_unit, uindex_string, BcRecord, ExportConfig};
use super::{LateralBoundaries, UnitTable};
use crate::base::{Grid3, Order, RegularGrid};
use crate::StrError;
use std::ffi::OsStr;
use std::fmt::Write;
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::Path;
use tracing::{info, warn};

/// Simulated time span in seconds (SHEMAT-Suite `tunit = 1`)
const TIME_SPAN: u64 = 60_000_000;

/// Number of output times
const N_OUTPUT_TIMES: u64 = 10;

/// Assembles a SHEMAT-Suite input file for a conductive heat-transport simulation
///
/// The sections are written in the fixed order required by SHEMAT-Suite:
/// general information and grid, solver controls, initial values, unit
/// description, boundary conditions, observed data, and finally the
/// run-length encoded `# uindex` block.
pub struct ShematInput<'a> {
    /// Regular grid of the geological model
    grid: RegularGrid,

    /// Lithology with indices `[x][y][z]`
    liths: &'a Grid3<usize>,

    /// Export options
    config: &'a ExportConfig,

    /// Petrophysical parameters of the units
    units: Option<&'a UnitTable>,

    /// Names used to fill a default units table
    unit_names: Vec<String>,

    /// Records of the (top) head Dirichlet condition
    head_bcs: Option<String>,

    /// Records of the top temperature Dirichlet condition
    top_temp_bcs: Option<String>,

    /// Values of the basal heat-flow Neumann condition
    heat_flow_bcs: Option<String>,

    /// Observed data (e.g., borehole temperatures), first line is the header
    data: Option<String>,

    /// Coordinates (x, y) of synthetic borehole logs
    borehole_logs: Vec<(f64, f64)>,
}

impl<'a> ShematInput<'a> {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `grid` -- the regular grid of the geological model
    /// * `liths` -- the (topography-masked) lithology with shape equal to the grid resolution
    /// * `config` -- export options
    pub fn new(grid: RegularGrid, liths: &'a Grid3<usize>, config: &'a ExportConfig) -> Result<Self, StrError> {
        if liths.shape() != grid.resolution {
            return Err("the lithology shape must equal the grid resolution");
        }
        Ok(ShematInput {
            grid,
            liths,
            config,
            units: None,
            unit_names: Vec::new(),
            head_bcs: None,
            top_temp_bcs: None,
            heat_flow_bcs: None,
            data: None,
            borehole_logs: Vec::new(),
        })
    }

    /// Sets the table of units
    pub fn set_units(&mut self, units: &'a UnitTable) -> &mut Self {
        self.units = Some(units);
        self
    }

    /// Sets the names of the units used when no table of units is available
    pub fn set_unit_names(&mut self, names: &[&str]) -> &mut Self {
        self.unit_names = names.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Sets the head boundary condition records
    pub fn set_head_bcs(&mut self, records: &[BcRecord]) -> &mut Self {
        self.head_bcs = Some(bc_records_string(records));
        self
    }

    /// Sets the top temperature boundary condition records
    pub fn set_top_temp_bcs(&mut self, records: &[BcRecord]) -> &mut Self {
        self.top_temp_bcs = Some(bc_records_string(records));
        self
    }

    /// Reads the head boundary condition records from a file
    pub fn set_head_bcs_file<P>(&mut self, full_path: &P) -> Result<&mut Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        self.head_bcs = Some(read_text(full_path)?);
        Ok(self)
    }

    /// Reads the top temperature boundary condition records from a file
    pub fn set_top_temp_bcs_file<P>(&mut self, full_path: &P) -> Result<&mut Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        self.top_temp_bcs = Some(read_text(full_path)?);
        Ok(self)
    }

    /// Reads the basal heat-flow values from a file
    pub fn set_heat_flow_bcs_file<P>(&mut self, full_path: &P) -> Result<&mut Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        self.heat_flow_bcs = Some(read_text(full_path)?);
        Ok(self)
    }

    /// Reads the observed data from a file whose first line is a header
    pub fn set_data_file<P>(&mut self, full_path: &P) -> Result<&mut Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let content = read_text(full_path)?;
        if content.lines().count() < 1 {
            return Err("data file must have at least a header line");
        }
        self.data = Some(content);
        Ok(self)
    }

    /// Sets the coordinates (x, y) of synthetic borehole logs
    pub fn set_borehole_logs(&mut self, coords: &[(f64, f64)]) -> &mut Self {
        self.borehole_logs = coords.to_vec();
        self
    }

    /// Generates the content of the input file
    pub fn render(&self) -> String {
        let [nx, ny, nz] = self.grid.resolution;
        let [delx, dely, delz] = self.grid.spacing();
        let title = &self.config.filename;
        let mut buffer = String::new();

        // general information
        write!(
            &mut buffer,
            "!==========>>>>> INFO\n\
             # Title\n\
             {}\n\n\
             # linfo\n\
             1 2 1 1\n\n\
             # runmode\n\
             1\n\n\
             # timestep control\n\
             0\n\
             1           1           0           0\n\n\
             # tunit\n\
             1\n\n\
             # time periods, records=1\n\
             0      {}    200      lin\n\n\
             # output times, records={}\n\
             1\n",
            title, TIME_SPAN, N_OUTPUT_TIMES
        )
        .unwrap();
        for n in 1..N_OUTPUT_TIMES {
            write!(&mut buffer, "{}\n", n * TIME_SPAN / N_OUTPUT_TIMES).unwrap();
        }
        write!(
            &mut buffer,
            "\n# file output: {}\n\n\
             # active {}\n\n\
             # PROPS=bas\n\n\
             # USER=none\n\n\n",
            self.config.output_keywords(),
            self.config.active_variables()
        )
        .unwrap();

        // grid
        write!(
            &mut buffer,
            "# grid\n\
             {} {} {}\n\n\
             # delx\n\
             {}*{:?}\n\n\
             # dely\n\
             {}*{:?}\n\n\
             # delz\n\
             {}*{:?}\n\n",
            nx, ny, nz, nx, delx, ny, dely, nz, delz
        )
        .unwrap();
        write!(&mut buffer, "{}\n\n", self.borehole_block()).unwrap();

        // solvers and initial values
        write!(
            &mut buffer,
            "!==========>>>>> NONLINEAR SOLVER\n\
             # nlsolve\n\
             50 0\n\n\
             !==========>>>>> FLOW\n\
             # lsolvef (linear solver control)\n\
             1.d-8 64 500\n\
             # nliterf (nonlinear iteration control)\n\
             1.0d-6 1.0\n\n\
             !==========>>>>> TEMPERATURE\n\
             # lsolvet (linear solver control)\n\
             1.d-4 64 500\n\
             # nlitert (nonlinear iteration control)\n\
             1.0d-2 1.0\n\n\
             !==========>>>>> INITIAL VALUES\n\
             # temp init HDF5=temp_init.h5\n\n\
             # head init HDF5=head_init.h5\n\n"
        )
        .unwrap();

        // units
        write!(
            &mut buffer,
            "!==========>>>>> UNIT DESCRIPTION\n\
             !!\n\
             # units\n\
             {}\n\n",
            self.units_block()
        )
        .unwrap();

        // boundary conditions
        write!(
            &mut buffer,
            "!==========>>>>>   define boundary properties\n\
             {}\n\n\
             {}\n\n\
             {}\n\n\
             {}\n\n\
             {}\n\n",
            self.top_temp_block(),
            self.heat_flow_block(),
            self.head_block(),
            self.lateral_block(),
            self.data_block()
        )
        .unwrap();

        // lithology
        let runs = encode_lithology(self.liths, Order::Fortran);
        write!(&mut buffer, "# uindex\n{}", uindex_string(&runs)).unwrap();
        buffer
    }

    /// Writes the input file to `config.out_dir/config.filename` and returns its path
    pub fn write(&self) -> Result<String, StrError> {
        fs::create_dir_all(&self.config.out_dir).map_err(|_| "cannot create output directory")?;
        let path = self.config.path_input();
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        file.write_all(self.render().as_bytes())
            .map_err(|_| "cannot write file")?;
        info!(path = %path, "wrote SHEMAT-Suite input file");
        Ok(path)
    }

    fn borehole_block(&self) -> String {
        if self.borehole_logs.is_empty() {
            return "!# borehole logs, records=0".to_string();
        }
        let mut buffer = format!("# borehole logs, records={} \n", self.borehole_logs.len());
        for (hole, (x, y)) in self.borehole_logs.iter().enumerate() {
            write!(&mut buffer, "{:?}, {:?}, borehole{} \n", x, y, hole).unwrap();
        }
        buffer
    }

    fn units_block(&self) -> String {
        match self.units {
            Some(table) => table.block(),
            None => {
                warn!("no units table found, filling in default values for petrophysical properties");
                let names: Vec<String> = if self.unit_names.is_empty() {
                    let n = max_unit(self.liths).unwrap_or(0);
                    (1..=n).map(|id| format!("unit{}", id)).collect()
                } else {
                    self.unit_names.clone()
                };
                let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
                UnitTable::with_defaults(&refs).block()
            }
        }
    }

    fn top_temp_block(&self) -> String {
        match &self.top_temp_bcs {
            Some(records) => format!("# temp bcd, records={}\n{}", records.lines().count(), records),
            None => "# temp bcd, simple=top, error=ignore, value=init".to_string(),
        }
    }

    fn heat_flow_block(&self) -> String {
        match &self.heat_flow_bcs {
            Some(values) => format!("# temp bcn, simple=base, error=ignore\n{}", values),
            None => {
                let [nx, ny, _] = self.grid.resolution;
                format!(
                    "# temp bcn, simple=base, error=ignore\n{}*{:?}",
                    nx * ny,
                    self.config.basal_heat_flow
                )
            }
        }
    }

    fn head_block(&self) -> String {
        match &self.head_bcs {
            Some(records) => format!("# head bcd, records={}\n{}", records.lines().count(), records),
            None => {
                let [nx, ny, nz] = self.grid.resolution;
                let delz = self.grid.spacing()[2];
                format!(
                    "# head bcd, simple=top, error=ignore\n{}*{:?}",
                    nx * ny,
                    nz as f64 * delz
                )
            }
        }
    }

    fn lateral_block(&self) -> String {
        match self.config.lateral_boundaries {
            LateralBoundaries::Closed => "!noflow lateral boundaries".to_string(),
            LateralBoundaries::Open => "# head bcd, simple=back, error=ignore, value=init\n\n\
                 # temp bcd, simple=back, error=ignore, value=init\n\n\
                 # head bcd, simple=front, error=ignore, value=init\n\n\
                 # temp bcd, simple=front, error=ignore, value=init"
                .to_string(),
        }
    }

    fn data_block(&self) -> String {
        match &self.data {
            // the header line is appended to the comment marker
            Some(content) => format!(
                "\n# data, records={}  !{}",
                content.lines().count().saturating_sub(1),
                content
            ),
            None => "!# data, records=0".to_string(),
        }
    }
}

/// Writes the job file listing the models to be run by SHEMAT-Suite
pub fn write_job_file<P>(full_path: &P, model_names: &[String]) -> Result<(), StrError>
where
    P: AsRef<OsStr> + ?Sized,
{
    let path = Path::new(full_path).to_path_buf();
    if let Some(p) = path.parent() {
        fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
    }
    let mut file = File::create(&path).map_err(|_| "cannot create file")?;
    file.write_all(model_names.join(" \n").as_bytes())
        .map_err(|_| "cannot write file")?;
    Ok(())
}

fn read_text<P>(full_path: &P) -> Result<String, StrError>
where
    P: AsRef<OsStr> + ?Sized,
{
    fs::read_to_string(Path::new(full_path)).map_err(|_| "cannot read file")
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
