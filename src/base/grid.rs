use super::Order;
use crate::StrError;
use russell_lab::Matrix;
use serde::{Deserialize, Serialize};

/// Holds a scalar field over a regular 3D grid
///
/// The values are stored in row-major (C) order, i.e., the index `k` along
/// the third axis varies fastest. The meaning of the axes is defined by the
/// producer of the data:
///
/// * Geological models (lithology blocks) use `[x][y][z]`
/// * SHEMAT-Suite results use `[z][y][x]`; see [crate::base::Axis::result_index]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Grid3<T> {
    /// Number of entries along each axis
    shape: [usize; 3],

    /// All values in row-major order (len = shape[0] · shape[1] · shape[2])
    data: Vec<T>,
}

impl<T: Copy> Grid3<T> {
    /// Allocates a new instance with all entries equal to `value`
    pub fn filled(shape: [usize; 3], value: T) -> Self {
        Grid3 {
            shape,
            data: vec![value; shape[0] * shape[1] * shape[2]],
        }
    }

    /// Allocates a new instance by evaluating a function of the indices
    pub fn from_fn<F>(shape: [usize; 3], mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(shape[0] * shape[1] * shape[2]);
        for i in 0..shape[0] {
            for j in 0..shape[1] {
                for k in 0..shape[2] {
                    data.push(f(i, j, k));
                }
            }
        }
        Grid3 { shape, data }
    }

    /// Allocates a new instance from values given in row-major (C) order
    pub fn from_vec(shape: [usize; 3], data: Vec<T>) -> Result<Self, StrError> {
        Grid3::from_vec_ordered(shape, data, Order::C)
    }

    /// Allocates a new instance from flat values given in the specified order
    pub fn from_vec_ordered(shape: [usize; 3], data: Vec<T>, order: Order) -> Result<Self, StrError> {
        if data.len() != shape[0] * shape[1] * shape[2] {
            return Err("the number of values must equal the product of the shape");
        }
        match order {
            Order::C => Ok(Grid3 { shape, data }),
            Order::Fortran => {
                let (n0, n1) = (shape[0], shape[1]);
                Ok(Grid3::from_fn(shape, |i, j, k| data[i + n0 * (j + n1 * k)]))
            }
        }
    }

    /// Returns the number of entries along each axis
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Returns the total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the values in row-major (C) order
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the value at (i, j, k)
    ///
    /// # Panics
    ///
    /// Panics if the indices are out of bounds.
    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize) -> T {
        self.data[self.index(i, j, k)]
    }

    /// Sets the value at (i, j, k)
    ///
    /// # Panics
    ///
    /// Panics if the indices are out of bounds.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, k: usize, value: T) {
        let n = self.index(i, j, k);
        self.data[n] = value;
    }

    /// Returns the values flattened in the specified order
    pub fn flatten(&self, order: Order) -> Vec<T> {
        match order {
            Order::C => self.data.clone(),
            Order::Fortran => {
                let mut res = Vec::with_capacity(self.data.len());
                for k in 0..self.shape[2] {
                    for j in 0..self.shape[1] {
                        for i in 0..self.shape[0] {
                            res.push(self.get(i, j, k));
                        }
                    }
                }
                res
            }
        }
    }

    /// Returns a new grid with `f` applied to every value
    pub fn map<U, F>(&self, f: F) -> Grid3<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid3 {
            shape: self.shape,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Returns the sub-grid with indices `first..=last` along the first axis
    pub fn slab(&self, first: usize, last: usize) -> Result<Self, StrError> {
        if first > last {
            return Err("the first index of the slab must not exceed the last index");
        }
        if last >= self.shape[0] {
            return Err("the last index of the slab is out of bounds");
        }
        let stride = self.shape[1] * self.shape[2];
        Ok(Grid3 {
            shape: [last - first + 1, self.shape[1], self.shape[2]],
            data: self.data[first * stride..(last + 1) * stride].to_vec(),
        })
    }

    /// Returns the values along `axis` with the two other indices fixed to (a, b)
    ///
    /// The fixed indices are given in ascending axis order, e.g., for `axis = 1`
    /// the lane is `(a, 0..n1, b)`.
    pub fn lane(&self, axis: usize, a: usize, b: usize) -> Result<Vec<T>, StrError> {
        let n = self.axis_len(axis)?;
        Ok((0..n).map(|t| self.data[self.lane_index(axis, a, b, t)]).collect())
    }

    /// Returns the number of entries along `axis`
    pub fn axis_len(&self, axis: usize) -> Result<usize, StrError> {
        if axis > 2 {
            return Err("axis must be 0, 1, or 2");
        }
        Ok(self.shape[axis])
    }

    /// Returns true if the other grid has the same shape
    pub fn same_shape<U>(&self, other: &Grid3<U>) -> bool {
        self.shape == other.shape
    }

    #[inline]
    fn index(&self, i: usize, j: usize, k: usize) -> usize {
        assert!(i < self.shape[0] && j < self.shape[1] && k < self.shape[2]);
        (i * self.shape[1] + j) * self.shape[2] + k
    }

    #[inline]
    fn lane_index(&self, axis: usize, a: usize, b: usize, t: usize) -> usize {
        match axis {
            0 => self.index(t, a, b),
            1 => self.index(a, t, b),
            _ => self.index(a, b, t),
        }
    }

    /// Returns the shape of the two axes other than `axis`
    fn others(&self, axis: usize) -> (usize, usize) {
        match axis {
            0 => (self.shape[1], self.shape[2]),
            1 => (self.shape[0], self.shape[2]),
            _ => (self.shape[0], self.shape[1]),
        }
    }
}

impl Grid3<f64> {
    /// Computes the derivative along `axis` with unit spacing
    ///
    /// Uses second-order centered differences at interior points and first-order
    /// one-sided differences at the boundaries; see [gradient].
    pub fn gradient(&self, axis: usize) -> Result<Grid3<f64>, StrError> {
        self.axis_len(axis)?;
        let (na, nb) = self.others(axis);
        let mut res = Grid3::filled(self.shape, 0.0);
        for a in 0..na {
            for b in 0..nb {
                let lane = self.lane(axis, a, b)?;
                for (t, d) in gradient(&lane).into_iter().enumerate() {
                    let n = self.lane_index(axis, a, b, t);
                    res.data[n] = d;
                }
            }
        }
        Ok(res)
    }

    /// Combines two grids of the same shape entry by entry
    pub fn zip_with<F>(&self, other: &Grid3<f64>, mut f: F) -> Result<Grid3<f64>, StrError>
    where
        F: FnMut(f64, f64) -> f64,
    {
        if !self.same_shape(other) {
            return Err("grids must have the same shape");
        }
        Ok(Grid3 {
            shape: self.shape,
            data: self.data.iter().zip(&other.data).map(|(a, b)| f(*a, *b)).collect(),
        })
    }

    /// Sums the values along the first axis, returning a (shape[1], shape[2]) matrix
    pub fn sum_first_axis(&self) -> Matrix {
        let mut res = Matrix::new(self.shape[1], self.shape[2]);
        for i in 0..self.shape[0] {
            for j in 0..self.shape[1] {
                for k in 0..self.shape[2] {
                    res.add(j, k, self.get(i, j, k));
                }
            }
        }
        res
    }

    /// Returns the 2D plane normal to `axis` at position `index`
    ///
    /// The rows and columns of the matrix follow the remaining axes in ascending order.
    pub fn plane(&self, axis: usize, index: usize) -> Result<Matrix, StrError> {
        if index >= self.axis_len(axis)? {
            return Err("plane index is out of bounds");
        }
        let (na, nb) = self.others(axis);
        let mut res = Matrix::new(na, nb);
        for a in 0..na {
            for b in 0..nb {
                res.set(a, b, self.data[self.lane_index(axis, a, b, index)]);
            }
        }
        Ok(res)
    }
}

/// Computes the derivative of equally spaced samples (unit spacing)
///
/// ```text
/// d[0]   = f[1] - f[0]
/// d[i]   = (f[i+1] - f[i-1]) / 2     for 0 < i < n-1
/// d[n-1] = f[n-1] - f[n-2]
/// ```
///
/// A single sample has no neighbor, thus its derivative is zero.
pub fn gradient(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n < 2 {
        return vec![0.0; n];
    }
    let mut res = vec![0.0; n];
    res[0] = values[1] - values[0];
    res[n - 1] = values[n - 1] - values[n - 2];
    for i in 1..n - 1 {
        res[i] = (values[i + 1] - values[i - 1]) / 2.0;
    }
    res
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
