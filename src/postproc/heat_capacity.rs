use super::Dataset;
use crate::base::Grid3;
use crate::StrError;

// coefficients of the numerator of the enthalpy approximation
const YY: [f64; 10] = [
    0.25623465e-3,
    0.10184405e-2,
    0.22554970e-4,
    0.34836663e-7,
    0.41769866e-2,
    -0.21244879e-4,
    0.25493516e-7,
    0.89557885e-4,
    0.10855046e-6,
    -0.21720560e-6,
];

// coefficients of the denominator of the enthalpy approximation
const ZZ: [f64; 10] = [
    0.10000000e+1,
    0.23513278e-1,
    0.48716386e-4,
    -0.19935046e-8,
    -0.50770309e-2,
    0.57780287e-5,
    0.90972916e-9,
    -0.58981537e-4,
    -0.12990752e-7,
    0.45872518e-8,
];

/// Calculates the specific isobaric heat capacity of water in J/(kg K)
///
/// Uses the rational function approximation of the enthalpy given by
/// Zyvoloski et al. (1997) and differentiates it with respect to temperature.
///
/// # Input
///
/// * `t` -- temperature in °C
/// * `p` -- pressure in MPa
///
/// # Reference
///
/// Zyvoloski GA, Robinson BA, Dash ZV, Trease LL (1997) Summary of the models and
/// methods for the FEHM application -- a finite-element heat- and mass-transfer code.
pub fn water_heat_capacity(t: f64, p: f64) -> f64 {
    let (p2, t2) = (p * p, t * t);
    let (p3, t3) = (p2 * p, t2 * t);
    let (tp, tp2, t2p) = (t * p, t * p2, t2 * p);

    let ta = YY[0] + YY[1] * p + YY[2] * p2 + YY[3] * p3 + YY[4] * t
        + YY[5] * t2 + YY[6] * t3 + YY[7] * tp + YY[8] * tp2 + YY[9] * t2p;
    let tb = ZZ[0] + ZZ[1] * p + ZZ[2] * p2 + ZZ[3] * p3 + ZZ[4] * t
        + ZZ[5] * t2 + ZZ[6] * t3 + ZZ[7] * tp + ZZ[8] * tp2 + ZZ[9] * t2p;

    // derivatives with respect to temperature
    let da = YY[4] + 2.0 * YY[5] * t + 3.0 * YY[6] * t2 + YY[7] * p + YY[8] * p2 + 2.0 * YY[9] * tp;
    let db = ZZ[4] + 2.0 * ZZ[5] * t + 3.0 * ZZ[6] * t2 + ZZ[7] * p + ZZ[8] * p2 + 2.0 * ZZ[9] * tp;

    // quotient rule; the enthalpy is in MJ/kg
    let denth_dt = da / tb - ta * db / (tb * tb);
    denth_dt * 1.0e6
}

/// Calculates the heat capacity of water for all cells
///
/// Requires the fields `temp` (°C) and `pres` (Pa).
pub fn heatcapacity(data: &Dataset) -> Result<Grid3<f64>, StrError> {
    let temp = data.field("temp")?;
    let pres = data.field("pres")?;
    temp.zip_with(pres, |t, p| water_heat_capacity(t, p * 1e-6))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{heatcapacity, water_heat_capacity};
    use crate::base::Grid3;
    use crate::postproc::Dataset;
    use crate::StrError;

    #[test]
    fn water_heat_capacity_is_realistic() {
        // liquid water between 10 and 150 °C at 10 MPa: 4.1 to 4.3 kJ/(kg K)
        for t in [10.0, 50.0, 100.0, 150.0] {
            let cp = water_heat_capacity(t, 10.0);
            assert!(cp > 4000.0 && cp < 4400.0, "cp({}) = {}", t, cp);
        }
    }

    #[test]
    fn heatcapacity_works() -> Result<(), StrError> {
        let mut data = Dataset::new();
        data.add_field("temp", Grid3::filled([1, 1, 2], 60.0))?
            .add_field("pres", Grid3::filled([1, 1, 2], 20e6))?;
        let cp = heatcapacity(&data)?;
        assert_eq!(cp.get(0, 0, 1), water_heat_capacity(60.0, 20.0));
        Ok(())
    }
}
