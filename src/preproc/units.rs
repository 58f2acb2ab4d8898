use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fmt::Write;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Holds the petrophysical parameters of a geological unit
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct UnitProps {
    /// Name of the unit (surface name in the geological model)
    pub name: String,

    /// Unit ID as used in the `# uindex` block
    pub id: usize,

    /// Porosity
    pub porosity: f64,

    /// Permeability in m²
    pub permeability: f64,

    /// Thermal conductivity in W/(m·K)
    pub conductivity: f64,
}

impl UnitProps {
    /// Allocates a unit with default petrophysical parameters
    pub fn with_defaults(name: &str, id: usize) -> Self {
        UnitProps {
            name: name.to_string(),
            id,
            porosity: 0.01,
            permeability: 1e-14,
            conductivity: 3.74,
        }
    }

    /// Returns the line of the `# units` table
    ///
    /// Columns: porosity, compressibilities, permeability (kx ky kz use the
    /// anisotropy factors 1.d0), conductivity, heat production, heat capacity,
    /// and electrical parameters. The name is written as a comment.
    pub fn table_line(&self) -> String {
        format!(
            "{:?}    1.d0  1.d0  {:?}\t 1.e-10  1.d0  1.d0  {:?}\t0.  2077074.  10  2e-3\t!{} \n",
            self.porosity, self.permeability, self.conductivity, self.name
        )
    }
}

/// Holds the table of units of a SHEMAT-Suite model
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct UnitTable {
    /// Units sorted by ID
    pub units: Vec<UnitProps>,
}

impl UnitTable {
    /// Allocates an empty table
    pub fn new() -> Self {
        UnitTable { units: Vec::new() }
    }

    /// Allocates a table of units with default parameters, numbered from 1
    pub fn with_defaults(names: &[&str]) -> Self {
        UnitTable {
            units: names
                .iter()
                .enumerate()
                .map(|(i, name)| UnitProps::with_defaults(name, i + 1))
                .collect(),
        }
    }

    /// Inserts a unit keeping the table sorted by ID
    pub fn push(&mut self, unit: UnitProps) -> Result<&mut Self, StrError> {
        if unit.porosity < 0.0 || unit.porosity > 1.0 {
            return Err("porosity must be in [0, 1]");
        }
        if unit.permeability <= 0.0 {
            return Err("permeability must be > 0.0");
        }
        if unit.conductivity <= 0.0 {
            return Err("thermal conductivity must be > 0.0");
        }
        match self.units.binary_search_by_key(&unit.id, |u| u.id) {
            Ok(_) => Err("unit ID is already in the table"),
            Err(pos) => {
                self.units.insert(pos, unit);
                Ok(self)
            }
        }
    }

    /// Appends the unit representing the air above the topography
    ///
    /// The air receives a high thermal conductivity to mimic the long-wavelength
    /// radiation from the ground; a realistic (low) value would act as an insulator.
    /// Its ID is the largest unit ID plus one.
    pub fn push_air(&mut self) -> Result<usize, StrError> {
        let id = self.units.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        self.push(UnitProps {
            name: "air".to_string(),
            id,
            porosity: 1e-10,
            permeability: 1e-22,
            conductivity: 100.0,
        })?;
        Ok(id)
    }

    /// Returns the number of units
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns true if the table has no units
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Returns the body of the `# units` block
    ///
    /// The n-th line holds the unit with the n-th smallest ID.
    pub fn block(&self) -> String {
        let mut sorted: Vec<&UnitProps> = self.units.iter().collect();
        sorted.sort_by_key(|u| u.id);
        let mut buffer = String::new();
        for unit in sorted {
            write!(&mut buffer, "{}", unit.table_line()).unwrap();
        }
        buffer
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
        let raw: UnitTable = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        let mut table = UnitTable::new();
        for unit in raw.units {
            table.push(unit)?;
        }
        Ok(table)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
