use crate::base::{Axis, Grid3};
use crate::StrError;
use russell_lab::{Matrix, Vector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Lists the fields written by SHEMAT-Suite and their meaning
pub const FIELD_CATALOG: [(&str, &str); 32] = [
    ("comp", "compressibility"),
    ("delx", "discretization in x direction in meter"),
    ("dely", "discretization in y direction in meter"),
    ("delz", "discretization in z direction in meter"),
    ("df", "undocumented"),
    ("ec", "undocumented"),
    ("head", "hydraulic potential in meter"),
    ("itemp_bcd", "undocumented"),
    ("itemp_bcn", "undocumented"),
    ("kx", "log-permeability (square meter) in x direction"),
    ("ky", "log-permeability (square meter) in y direction"),
    ("kz", "log-permeability (square meter) in z direction"),
    ("lc", "undocumented"),
    ("lx", "thermal conductivity in x direction in watt per meter and kelvin"),
    ("ly", "thermal conductivity in y direction in watt per meter and kelvin"),
    ("lz", "thermal conductivity in z direction in watt per meter and kelvin"),
    ("por", "porosity"),
    ("pres", "pressure in megapascal"),
    ("q", "undocumented"),
    ("rc", "undocumented"),
    ("rhof", "density water in kilogram per cubic meter"),
    ("temp", "temperature in degrees celsius"),
    ("temp_bcd", "temperature dirichlet boundary condition in degrees celsius"),
    ("temp_bcn", "temperature neumann boundary condition in degrees celsius"),
    ("uindex", "rock unit index - geological unit present in the cell"),
    ("visf", "fluid viscosity"),
    ("vx", "velocity in x direction in meters per second"),
    ("vy", "velocity in y direction in meters per second"),
    ("vz", "velocity in z direction in meters per second"),
    ("x", "x coordinate in meters"),
    ("y", "y coordinate in meters"),
    ("z", "z coordinate in meters"),
];

/// Defines how parameters are extracted from a dataset
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Extract {
    /// The whole volume
    Volume,

    /// The plane through the middle of the model, normal to the given direction
    MidSlice(Axis),
}

/// Holds an extracted parameter
#[derive(Clone, Debug)]
pub enum Extracted {
    Volume(Grid3<f64>),
    Slice(Matrix),
}

/// Holds parameters extracted from a dataset together with the axis coordinates
#[derive(Clone, Debug)]
pub struct ParameterSet {
    /// x coordinates of the cell centers
    pub x: Vector,

    /// y coordinates of the cell centers
    pub y: Vector,

    /// z coordinates of the cell centers
    pub z: Vector,

    /// Extracted parameters
    pub values: BTreeMap<String, Extracted>,
}

/// Holds the named 3D fields of a SHEMAT-Suite simulation
///
/// All fields share the same shape and are indexed `[z][y][x]`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Dataset {
    fields: BTreeMap<String, Grid3<f64>>,
}

impl Dataset {
    /// Allocates an empty dataset
    pub fn new() -> Self {
        Dataset {
            fields: BTreeMap::new(),
        }
    }

    /// Adds a field to the dataset
    pub fn add_field(&mut self, name: &str, values: Grid3<f64>) -> Result<&mut Self, StrError> {
        if self.fields.contains_key(name) {
            return Err("a field with this name already exists in the dataset");
        }
        if let Some(first) = self.fields.values().next() {
            if !first.same_shape(&values) {
                return Err("all fields in the dataset must have the same shape");
            }
        }
        self.fields.insert(name.to_string(), values);
        Ok(self)
    }

    /// Returns the field with the given name
    pub fn field(&self, name: &str) -> Result<&Grid3<f64>, StrError> {
        self.fields
            .get(name)
            .ok_or("field does not exist in the dataset; see available_parameters for existing fields")
    }

    /// Returns true if the dataset has a field with the given name
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns the names of all fields (sorted)
    pub fn names(&self) -> Vec<&str> {
        self.fields.keys().map(|k| k.as_str()).collect()
    }

    /// Returns the shape shared by all fields
    pub fn shape(&self) -> Result<[usize; 3], StrError> {
        match self.fields.values().next() {
            Some(first) => Ok(first.shape()),
            None => Err("the dataset is empty"),
        }
    }

    /// Returns the known fields available in this dataset with a short description
    pub fn available_parameters(&self) -> Vec<(&'static str, &'static str)> {
        FIELD_CATALOG
            .iter()
            .filter(|(name, _)| self.fields.contains_key(*name))
            .copied()
            .collect()
    }

    /// Returns the coordinates of the cell centers along a direction
    ///
    /// The coordinates are taken from the first lane of the `x`, `y`, or `z` field.
    pub fn coords(&self, axis: Axis) -> Result<Vector, StrError> {
        let field = self.field(axis.label())?;
        let values = field.lane(axis.result_index(), 0, 0)?;
        Ok(Vector::from(&values))
    }

    /// Extracts parameters from the dataset
    pub fn extract_parameters(&self, names: &[&str], extract: Extract) -> Result<ParameterSet, StrError> {
        let mut values = BTreeMap::new();
        for name in names {
            let field = self.field(name)?;
            let value = match extract {
                Extract::Volume => Extracted::Volume(field.clone()),
                Extract::MidSlice(axis) => {
                    let index = axis.result_index();
                    let middle = field.axis_len(index)? / 2;
                    Extracted::Slice(field.plane(index, middle)?)
                }
            };
            values.insert(name.to_string(), value);
        }
        Ok(ParameterSet {
            x: self.coords(Axis::X)?,
            y: self.coords(Axis::Y)?,
            z: self.coords(Axis::Z)?,
            values,
        })
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
        let dataset: Dataset = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        let mut shapes = dataset.fields.values().map(|f| f.shape());
        if let Some(shape) = shapes.next() {
            if shapes.any(|s| s != shape) {
                return Err("all fields in the dataset must have the same shape");
            }
        }
        if dataset.fields.values().any(|f| f.as_slice().len() != f.shape().iter().product::<usize>()) {
            return Err("the number of values must equal the product of the shape");
        }
        Ok(dataset)
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
        serde_json::to_writer(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Dataset, Extract, Extracted};
    use crate::base::{Axis, Grid3, DEFAULT_TEST_DIR};
    use crate::StrError;

    // Returns a dataset with nz = 4, ny = 3, nx = 2 and cell centers at 50 m spacing
    fn sample() -> Result<Dataset, StrError> {
        let shape = [4, 3, 2];
        let mut data = Dataset::new();
        data.add_field("x", Grid3::from_fn(shape, |_, _, i| 25.0 + 50.0 * i as f64))?
            .add_field("y", Grid3::from_fn(shape, |_, j, _| 25.0 + 50.0 * j as f64))?
            .add_field("z", Grid3::from_fn(shape, |k, _, _| 25.0 + 50.0 * k as f64))?
            .add_field("temp", Grid3::from_fn(shape, |k, j, i| (100 * k + 10 * j + i) as f64))?;
        Ok(data)
    }

    #[test]
    fn add_field_captures_errors() -> Result<(), StrError> {
        let mut data = sample()?;
        assert_eq!(
            data.add_field("temp", Grid3::filled([4, 3, 2], 0.0)).err(),
            Some("a field with this name already exists in the dataset")
        );
        assert_eq!(
            data.add_field("pres", Grid3::filled([1, 1, 1], 0.0)).err(),
            Some("all fields in the dataset must have the same shape")
        );
        Ok(())
    }

    #[test]
    fn field_and_parameters_work() -> Result<(), StrError> {
        let data = sample()?;
        assert_eq!(data.shape()?, [4, 3, 2]);
        assert_eq!(data.names(), vec!["temp", "x", "y", "z"]);
        assert!(data.has_field("temp"));
        assert_eq!(
            data.field("lz").err(),
            Some("field does not exist in the dataset; see available_parameters for existing fields")
        );
        let available = data.available_parameters();
        assert_eq!(available.len(), 4);
        assert_eq!(available[0], ("temp", "temperature in degrees celsius"));
        assert_eq!(Dataset::new().shape().err(), Some("the dataset is empty"));
        Ok(())
    }

    #[test]
    fn coords_work() -> Result<(), StrError> {
        let data = sample()?;
        assert_eq!(data.coords(Axis::X)?.as_data(), &[25.0, 75.0]);
        assert_eq!(data.coords(Axis::Y)?.as_data(), &[25.0, 75.0, 125.0]);
        assert_eq!(data.coords(Axis::Z)?.as_data(), &[25.0, 75.0, 125.0, 175.0]);
        Ok(())
    }

    #[test]
    fn extract_parameters_works() -> Result<(), StrError> {
        let data = sample()?;
        let set = data.extract_parameters(&["temp"], Extract::Volume)?;
        match set.values.get("temp").unwrap() {
            Extracted::Volume(v) => assert_eq!(v.shape(), [4, 3, 2]),
            _ => panic!("volume expected"),
        }
        // slice normal to x at x = nx/2 = 1
        let set = data.extract_parameters(&["temp"], Extract::MidSlice(Axis::X))?;
        match set.values.get("temp").unwrap() {
            Extracted::Slice(m) => {
                assert_eq!(m.dims(), (4, 3));
                assert_eq!(m.get(2, 1), 211.0);
            }
            _ => panic!("slice expected"),
        }
        // slice normal to z at z = nz/2 = 2
        let set = data.extract_parameters(&["temp"], Extract::MidSlice(Axis::Z))?;
        match set.values.get("temp").unwrap() {
            Extracted::Slice(m) => {
                assert_eq!(m.dims(), (3, 2));
                assert_eq!(m.get(2, 1), 221.0);
            }
            _ => panic!("slice expected"),
        }
        assert_eq!(set.z.dim(), 4);
        assert!(data.extract_parameters(&["pres"], Extract::Volume).is_err());
        Ok(())
    }

    #[test]
    fn read_and_write_json_work() -> Result<(), StrError> {
        let data = sample()?;
        let path = format!("{}/dataset_read_write.json", DEFAULT_TEST_DIR);
        data.write_json(&path)?;
        let back = Dataset::read_json(&path)?;
        assert_eq!(back.names(), data.names());
        assert_eq!(back.field("temp")?, data.field("temp")?);
        assert_eq!(Dataset::read_json("/tmp/openwf/__does_not_exist__").err(), Some("cannot open file"));
        Ok(())
    }
}
