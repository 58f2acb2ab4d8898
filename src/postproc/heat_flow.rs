use super::Dataset;
use crate::base::{gradient, Axis, Grid3};
use crate::StrError;
use russell_lab::{Matrix, Vector};
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::path::Path;
use tracing::warn;

/// Holds the conductive heat flow components in W/m²
#[derive(Clone, Debug)]
pub struct HeatFlow {
    /// Heat flow along x
    pub qx: Grid3<f64>,

    /// Heat flow along y
    pub qy: Grid3<f64>,

    /// Heat flow along z
    pub qz: Grid3<f64>,
}

/// Holds a map of the heat flow over a depth interval, as written to JSON files
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HeatFlowMap {
    /// Bounds of the interval in m above sea level
    pub depth_interval: [f64; 2],

    /// Whether the direction of the flow is kept
    pub signed: bool,

    /// Heat flow values with rows along y and columns along x
    pub values: Vec<Vec<f64>>,
}

impl HeatFlowMap {
    /// Allocates a new instance from a (ny, nx) matrix
    pub fn new(depth_interval: [f64; 2], signed: bool, hf: &Matrix) -> Self {
        let (ny, nx) = hf.dims();
        HeatFlowMap {
            depth_interval,
            signed,
            values: (0..ny).map(|j| (0..nx).map(|i| hf.get(j, i)).collect()).collect(),
        }
    }

    /// Writes a JSON file with this struct
    ///
    /// Non-finite values are written as `null`.
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

/// Returns the index of the entry closest to `value`
///
/// Ties are resolved in favor of the first occurrence.
pub fn find_nearest(values: &[f64], value: f64) -> Result<usize, StrError> {
    if values.is_empty() {
        return Err("cannot find the nearest value in an empty array");
    }
    let mut best = 0;
    let mut best_distance = f64::abs(values[0] - value);
    for (i, v) in values.iter().enumerate().skip(1) {
        let distance = f64::abs(v - value);
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }
    Ok(best)
}

/// Computes the harmonic mean `n / Σ(1/aᵢ)`
pub fn harmonic_mean(values: &[f64]) -> f64 {
    let sum: f64 = values.iter().map(|v| 1.0 / v).sum();
    values.len() as f64 / sum
}

/// Computes the harmonic mean along the first axis, returning a (shape[1], shape[2]) matrix
pub fn harmonic_mean_first_axis(grid: &Grid3<f64>) -> Result<Matrix, StrError> {
    let [_, n1, n2] = grid.shape();
    let mut res = Matrix::new(n1, n2);
    for j in 0..n1 {
        for k in 0..n2 {
            res.set(j, k, harmonic_mean(&grid.lane(0, j, k)?));
        }
    }
    Ok(res)
}

/// Calculates the conductive heat flow along one direction
///
/// ```text
/// q = -λ ∂T/∂a
/// ```
///
/// where the derivative is computed with centered differences at interior cells
/// and one-sided differences at the boundaries, divided by the cell size.
/// Requires the fields `temp`, `l{a}`, and `del{a}` (e.g., `lx` and `delx`).
pub fn calc_cond_hf_along(data: &Dataset, axis: Axis) -> Result<Grid3<f64>, StrError> {
    let temp = data.field("temp")?;
    let (conductivity, spacing) = match axis {
        Axis::X => (data.field("lx")?, data.field("delx")?),
        Axis::Y => (data.field("ly")?, data.field("dely")?),
        Axis::Z => (data.field("lz")?, data.field("delz")?),
    };
    let dtemp = temp.gradient(axis.result_index())?;
    let slope = dtemp.zip_with(spacing, |dt, del| dt / del)?;
    conductivity.zip_with(&slope, |lambda, s| -lambda * s)
}

/// Calculates the conductive heat flow for the whole model in x, y, and z directions
pub fn calc_cond_hf(data: &Dataset) -> Result<HeatFlow, StrError> {
    Ok(HeatFlow {
        qx: calc_cond_hf_along(data, Axis::X)?,
        qy: calc_cond_hf_along(data, Axis::Y)?,
        qz: calc_cond_hf_along(data, Axis::Z)?,
    })
}

/// Calculates the vertical conductive heat flow over a depth interval
///
/// The bounds of the interval are snapped to the nearest cell elevation
/// (no interpolation). Then, for each (y, x) column:
///
/// ```text
/// q = -λₕ ΣΔT / ΣΔz
/// ```
///
/// where the sums run over the vertical gradients within the interval and
/// `λₕ` is the harmonic mean of `lz` over the interval.
///
/// # Input
///
/// * `data` -- dataset with `temp`, `lz`, and `z`
/// * `depth_interval` -- the two bounds in m above sea level (e.g., `[-3000.0, -1000.0]`)
/// * `model_depth` -- vertical extent of the model below sea level (positive)
/// * `signed` -- keep the direction of the heat flow (negative for outward flow); otherwise return the magnitude
///
/// # Output
///
/// Returns a (ny, nx) matrix. If both bounds snap to the same cell, the elevation
/// difference is zero and the result is not finite.
pub fn calc_cond_hf_over_interval(
    data: &Dataset,
    depth_interval: [f64; 2],
    model_depth: f64,
    signed: bool,
) -> Result<Matrix, StrError> {
    let z = data.coords(Axis::Z)?;
    let zasl: Vec<f64> = z.as_data().iter().map(|v| v - model_depth).collect();
    let a = find_nearest(&zasl, depth_interval[0])?;
    let b = find_nearest(&zasl, depth_interval[1])?;
    let (first, last) = if a <= b { (a, b) } else { (b, a) };
    if first == last {
        warn!(index = first, "depth interval bounds snap to the same cell");
    }

    let temp = data.field("temp")?.slab(first, last)?;
    let temp_diff = temp.gradient(0)?.sum_first_axis();
    let lambda = harmonic_mean_first_axis(&data.field("lz")?.slab(first, last)?)?;
    let z_diff: f64 = gradient(&zasl[first..=last]).iter().sum();

    let (m, n) = temp_diff.dims();
    let mut hf = Matrix::new(m, n);
    for i in 0..m {
        for j in 0..n {
            let q = -lambda.get(i, j) * (temp_diff.get(i, j) / z_diff);
            hf.set(i, j, if signed { q } else { f64::abs(q) });
        }
    }
    Ok(hf)
}

/// Calculates the vertical temperature gradient in K/m
///
/// ```text
/// ∇T = -∂T/∂z
/// ```
///
/// The gradient is positive when the temperature increases with depth. If
/// `signed` is false, the magnitude is returned.
pub fn calc_tgradient(data: &Dataset, signed: bool) -> Result<Grid3<f64>, StrError> {
    let temp = data.field("temp")?;
    let z = data.coords(Axis::Z)?;
    let dz = Vector::from(&gradient(z.as_data()));
    let dtemp = temp.gradient(0)?;
    let [nz, ny, nx] = temp.shape();
    let mut res = Grid3::filled([nz, ny, nx], 0.0);
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let g = -dtemp.get(k, j, i) / dz[k];
                res.set(k, j, i, if signed { g } else { f64::abs(g) });
            }
        }
    }
    Ok(res)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
