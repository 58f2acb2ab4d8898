use crate::base::{Grid3, KELVIN_OFFSET, LAPSE_RATE, SEA_LEVEL_TEMPERATURE};
use crate::StrError;
use russell_lab::Matrix;
use std::ffi::OsStr;
use std::fmt::{self, Write as FmtWrite};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Holds a boundary condition assigned to a single cell
///
/// The indices are 1-based as required by SHEMAT-Suite (Fortran).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BcRecord {
    /// Cell index along x (1-based)
    pub i: usize,

    /// Cell index along y (1-based)
    pub j: usize,

    /// Cell index along z (1-based)
    pub k: usize,

    /// Prescribed value (e.g., hydraulic head or temperature)
    pub value: f64,

    /// Direction flag (0 means none)
    pub direction: i32,
}

impl fmt::Display for BcRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}, {:.3}, {}", self.i, self.j, self.k, self.value, self.direction)
    }
}

impl BcRecord {
    /// Parses a record such as `3, 4, 12, 453.120, 0`
    pub fn parse(line: &str) -> Result<Self, StrError> {
        let fields: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();
        if fields.len() != 5 {
            return Err("boundary condition record must have 5 fields");
        }
        let index = |s: &str| -> Result<usize, StrError> {
            let v: f64 = s.parse().map_err(|_| "cannot parse cell index of boundary condition")?;
            if v < 1.0 || v.fract() != 0.0 {
                return Err("cell index of boundary condition must be an integer ≥ 1");
            }
            Ok(v as usize)
        };
        let value = fields[3]
            .parse()
            .map_err(|_| "cannot parse value of boundary condition")?;
        let direction: f64 = fields[4]
            .parse()
            .map_err(|_| "cannot parse direction of boundary condition")?;
        Ok(BcRecord {
            i: index(fields[0])?,
            j: index(fields[1])?,
            k: index(fields[2])?,
            value,
            direction: direction as i32,
        })
    }
}

/// Returns the surface temperature in °C estimated from the elevation
///
/// ```text
/// T = (T_sea - L z) - 273.15
/// ```
///
/// where `L` is the atmospheric lapse rate (0.0065 K/m) and `T_sea = 288 K`.
pub fn surface_temperature(elevation: f64) -> f64 {
    (SEA_LEVEL_TEMPERATURE - LAPSE_RATE * elevation) - KELVIN_OFFSET
}

/// Computes the surface temperature for a map of elevations
pub fn surface_temperature_map(elevation: &Matrix) -> Matrix {
    let (m, n) = elevation.dims();
    let mut res = Matrix::new(m, n);
    for i in 0..m {
        for j in 0..n {
            res.set(i, j, surface_temperature(elevation.get(i, j)));
        }
    }
    res
}

/// Generates boundary conditions at all cells occupied by a given unit
///
/// This is used to prescribe values at the cells above the topography (air unit).
/// Each record takes the value at `(i, j)` from `surface` plus `offset`.
/// For instance, the hydraulic head is the elevation plus the model depth below
/// sea level, and the temperature is the surface temperature with zero offset.
///
/// # Input
///
/// * `liths` -- lithology with indices `[x][y][z]`
/// * `unit` -- the unit selecting the cells (e.g., the air)
/// * `surface` -- (nx, ny) map with the values at the surface
/// * `offset` -- value added to the surface value
///
/// The records follow the row-major order of the cells.
pub fn unit_boundary_records(
    liths: &Grid3<usize>,
    unit: usize,
    surface: &Matrix,
    offset: f64,
) -> Result<Vec<BcRecord>, StrError> {
    let [nx, ny, nz] = liths.shape();
    if surface.dims() != (nx, ny) {
        return Err("the surface map must have dimensions (nx, ny)");
    }
    let mut records = Vec::new();
    for i in 0..nx {
        for j in 0..ny {
            for k in 0..nz {
                if liths.get(i, j, k) == unit {
                    records.push(BcRecord {
                        i: i + 1,
                        j: j + 1,
                        k: k + 1,
                        value: surface.get(i, j) + offset,
                        direction: 0,
                    });
                }
            }
        }
    }
    Ok(records)
}

/// Returns the records as text, one per line
pub fn bc_records_string(records: &[BcRecord]) -> String {
    let mut buffer = String::new();
    for record in records {
        writeln!(&mut buffer, "{}", record).unwrap();
    }
    buffer
}

/// Writes a boundary condition file with one record per line
///
/// # Input
///
/// * `full_path` -- may be a String, &str, or Path
pub fn write_bc_file<P>(full_path: &P, records: &[BcRecord]) -> Result<(), StrError>
where
    P: AsRef<OsStr> + ?Sized,
{
    let path = Path::new(full_path).to_path_buf();
    if let Some(p) = path.parent() {
        fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
    }
    let mut file = File::create(&path).map_err(|_| "cannot create file")?;
    file.write_all(bc_records_string(records).as_bytes())
        .map_err(|_| "cannot write file")?;
    Ok(())
}

/// Reads a boundary condition file with one record per line
///
/// Empty lines are ignored.
pub fn read_bc_file<P>(full_path: &P) -> Result<Vec<BcRecord>, StrError>
where
    P: AsRef<OsStr> + ?Sized,
{
    let path = Path::new(full_path).to_path_buf();
    let file = File::open(path).map_err(|_| "cannot open file")?;
    let mut records = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|_| "cannot read line")?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(BcRecord::parse(&line)?);
    }
    Ok(records)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
