use super::{lithology_ids, topomask};
use crate::base::{Grid3, Order, RegularGrid};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds the solution of a geological model on a regular grid
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GeoModel {
    /// Number of cells along x, y, and z
    pub resolution: [usize; 3],

    /// Model extent `[xmin, xmax, ymin, ymax, zmin, zmax]`
    pub extent: [f64; 6],

    /// Unit IDs (as computed by the geological model) with indices `[x][y][z]` in row-major order
    pub lith_block: Vec<f64>,

    /// Topography mask (true above the surface)
    #[serde(default)]
    pub mask: Option<Vec<bool>>,

    /// Names of the units (the ID of the n-th name is n + 1)
    #[serde(default)]
    pub unit_names: Vec<String>,
}

impl GeoModel {
    /// Returns the regular grid of the model
    pub fn grid(&self) -> Result<RegularGrid, StrError> {
        RegularGrid::new(self.resolution, self.extent)
    }

    /// Returns the lithology, masked with the topography if available
    pub fn liths(&self) -> Result<Grid3<usize>, StrError> {
        match &self.mask {
            Some(mask) => topomask(&self.lith_block, mask, self.resolution),
            None => Grid3::from_vec_ordered(self.resolution, lithology_ids(&self.lith_block)?, Order::C),
        }
    }

    /// Reads a JSON file containing this struct
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let file = File::open(path).map_err(|_| "cannot open file")?;
        let buffered = BufReader::new(file);
        let model = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        Ok(model)
    }

    /// Writes a JSON file with this struct
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer_pretty(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
