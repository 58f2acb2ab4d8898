use crate::StrError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use russell_lab::{Matrix, Vector};
use tracing::info;

/// Holds the result of the rejection sampling
#[derive(Clone, Debug, PartialEq)]
pub struct Rejection {
    /// Indices of the accepted realizations
    pub accepted: Vec<usize>,

    /// Acceptance probabilities of the realizations accepted despite a larger error
    pub probabilities: Vec<f64>,
}

/// Converts a temperature from Fahrenheit to Celsius
///
/// If `difference` is true, the value is a temperature difference and no offset is applied.
pub fn fahrenheit_to_celsius(temp_fahrenheit: f64, difference: bool) -> f64 {
    if difference {
        temp_fahrenheit * 5.0 / 9.0
    } else {
        (temp_fahrenheit - 32.0) * 5.0 / 9.0
    }
}

/// Computes the median of the values
pub fn median(values: &[f64]) -> Result<f64, StrError> {
    if values.is_empty() {
        return Err("cannot compute the median of an empty array");
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 1 {
        Ok(sorted[n / 2])
    } else {
        Ok((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// Computes the root-mean-square error of each realization
///
/// # Input
///
/// * `predicted` -- (n_data, n_realization) matrix with the simulated values
/// * `target` -- (n_data) vector with the observed values
///
/// # Output
///
/// Returns a (n_realization) vector with the RMSE of each column.
pub fn c_rmse(predicted: &Matrix, target: &Vector) -> Result<Vector, StrError> {
    let (nrow, ncol) = predicted.dims();
    if target.dim() != nrow {
        return Err("the number of target values must equal the number of rows of the predictions");
    }
    if nrow == 0 {
        return Err("at least one data point is required");
    }
    let mut rmse = Vector::new(ncol);
    for j in 0..ncol {
        let mut sum = 0.0;
        for i in 0..nrow {
            let diff = predicted.get(i, j) - target[i];
            sum += diff * diff;
        }
        rmse[j] = f64::sqrt(sum / nrow as f64);
    }
    Ok(rmse)
}

/// Selects realizations of an ensemble by rejection sampling on their errors
///
/// A realization is accepted if its error is smaller than the reference error,
/// or else with probability `exp(-(rmse - reference) / u_g)`. Every accepted
/// realization becomes the new reference.
///
/// # Input
///
/// * `rmse` -- the error of each realization
/// * `u_g` -- the uncertainty controlling the acceptance of worse realizations
/// * `use_median` -- start with the median error as reference (and test all realizations);
///   otherwise start with the first error (and test the remaining ones)
/// * `seed` -- seed of the random number generator
pub fn rejection(rmse: &[f64], u_g: f64, use_median: bool, seed: u64) -> Result<Rejection, StrError> {
    if rmse.is_empty() {
        return Err("at least one realization is required");
    }
    if u_g <= 0.0 {
        return Err("the uncertainty u_g must be > 0.0");
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let (mut reference, start) = if use_median {
        (median(rmse)?, 0)
    } else {
        (rmse[0], 1)
    };
    let mut accepted = Vec::new();
    let mut probabilities = Vec::new();
    for (i, value) in rmse.iter().enumerate().skip(start) {
        if *value < reference {
            reference = *value;
            accepted.push(i);
        } else {
            let probability = f64::exp(-(value - reference) / u_g);
            if rng.random::<f64>() < probability {
                probabilities.push(probability);
                reference = *value;
                accepted.push(i);
            }
        }
    }
    info!(count = accepted.len(), "realizations were accepted");
    Ok(Rejection {
        accepted,
        probabilities,
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
