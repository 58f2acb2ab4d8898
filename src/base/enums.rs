use serde::{Deserialize, Serialize};

/// Defines the order used to flatten (or reshape) a 3D array
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum Order {
    /// Row-major order; the last index varies fastest
    C,

    /// Column-major order; the first index varies fastest
    ///
    /// This is the layout expected by SHEMAT-Suite (Fortran) input files.
    Fortran,
}

/// Defines the spatial directions of the model
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Returns the array axis of this direction in SHEMAT-Suite result fields
    ///
    /// Result fields are stored as `[z][y][x]`, thus `Z → 0`, `Y → 1`, and `X → 2`.
    pub fn result_index(&self) -> usize {
        match self {
            Axis::X => 2,
            Axis::Y => 1,
            Axis::Z => 0,
        }
    }

    /// Returns the lowercase label used in field names (e.g., "x" in "delx")
    pub fn label(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Axis, Order};

    #[test]
    fn derive_works() {
        let order = Order::Fortran;
        let clone = order.clone();
        assert_eq!(format!("{:?}", clone), "Fortran");
        assert_eq!(Axis::X, Axis::X.clone());
    }

    #[test]
    fn result_index_works() {
        assert_eq!(Axis::X.result_index(), 2);
        assert_eq!(Axis::Y.result_index(), 1);
        assert_eq!(Axis::Z.result_index(), 0);
        assert_eq!(Axis::Z.label(), "z");
    }
}
