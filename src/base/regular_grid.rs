use crate::StrError;
use serde::{Deserialize, Serialize};

/// Defines the regular (equally spaced) grid of a geological model
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct RegularGrid {
    /// Number of cells along x, y, and z
    pub resolution: [usize; 3],

    /// Bounding box (xmin, xmax, ymin, ymax, zmin, zmax) in m
    pub extent: [f64; 6],
}

impl RegularGrid {
    /// Allocates a new instance
    pub fn new(resolution: [usize; 3], extent: [f64; 6]) -> Result<Self, StrError> {
        if resolution.iter().any(|n| *n == 0) {
            return Err("the resolution must be ≥ 1 along all directions");
        }
        for d in 0..3 {
            if extent[2 * d + 1] <= extent[2 * d] {
                return Err("the extent must satisfy max > min along all directions");
            }
        }
        Ok(RegularGrid { resolution, extent })
    }

    /// Returns the total number of cells
    pub fn ncell(&self) -> usize {
        self.resolution[0] * self.resolution[1] * self.resolution[2]
    }

    /// Returns the cell sizes (delx, dely, delz)
    pub fn spacing(&self) -> [f64; 3] {
        let [nx, ny, nz] = self.resolution;
        let [xmin, xmax, ymin, ymax, zmin, zmax] = self.extent;
        [
            (xmax - xmin) / nx as f64,
            (ymax - ymin) / ny as f64,
            (zmax - zmin) / nz as f64,
        ]
    }

    /// Returns the vertical extent of the model (zmax - zmin)
    pub fn height(&self) -> f64 {
        self.extent[5] - self.extent[4]
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::RegularGrid;
    use crate::StrError;

    #[test]
    fn new_captures_errors() {
        assert_eq!(
            RegularGrid::new([0, 1, 1], [0.0, 1.0, 0.0, 1.0, 0.0, 1.0]).err(),
            Some("the resolution must be ≥ 1 along all directions")
        );
        assert_eq!(
            RegularGrid::new([1, 1, 1], [0.0, 1.0, 0.0, 1.0, 1.0, 1.0]).err(),
            Some("the extent must satisfy max > min along all directions")
        );
    }

    #[test]
    fn spacing_works() -> Result<(), StrError> {
        let grid = RegularGrid::new([10, 20, 5], [0.0, 1000.0, 0.0, 500.0, -6000.0, 1000.0])?;
        assert_eq!(grid.ncell(), 1000);
        assert_eq!(grid.spacing(), [100.0, 25.0, 1400.0]);
        assert_eq!(grid.height(), 7000.0);
        Ok(())
    }
}
