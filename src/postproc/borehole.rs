use super::InvData;
use crate::StrError;

/// Holds the simulated and observed temperatures along a borehole
#[derive(Clone, Debug, PartialEq)]
pub struct BoreholeLog {
    /// Cell index along x (as written by SHEMAT-Suite, 1-based)
    pub i: usize,

    /// Cell index along y (as written by SHEMAT-Suite, 1-based)
    pub j: usize,

    /// Elevation of each data point in m (negative below the model top)
    pub depth: Vec<f64>,

    /// Simulated values
    pub calc: Vec<f64>,

    /// Observed values
    pub obs: Vec<f64>,

    /// Unit at each data point
    pub units: Vec<usize>,
}

/// Holds a depth interval occupied by one unit
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LithSpan {
    /// Elevation of the first data point of the unit in m
    pub top: f64,

    /// Elevation where the next unit starts (or of the last data point) in m
    pub bottom: f64,

    /// Unit ID
    pub unit: usize,
}

/// Returns the indices `n` where `units[n] != units[n+1]`
pub fn lithology_changes(units: &[usize]) -> Vec<usize> {
    units
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] != w[1])
        .map(|(n, _)| n)
        .collect()
}

/// Converts vertical cell indices into elevations relative to the model top
///
/// ```text
/// depth = k · delz - (z_extent - delz / 2)
/// ```
pub fn log_depths(k: &[f64], delz: f64, z_extent: f64) -> Vec<f64> {
    k.iter().map(|k| k * delz - (z_extent - delz / 2.0)).collect()
}

/// Returns the (i, j) cell indices of the boreholes in order of first appearance
pub fn boreholes(data: &InvData) -> Result<Vec<(usize, usize)>, StrError> {
    let ii = data.column("i")?;
    let jj = data.column("j")?;
    let mut res: Vec<(usize, usize)> = Vec::new();
    for (i, j) in ii.iter().zip(&jj) {
        let pair = (*i as usize, *j as usize);
        if !res.contains(&pair) {
            res.push(pair);
        }
    }
    Ok(res)
}

/// Extracts the log of a borehole from a data table
///
/// # Input
///
/// * `data` -- table with the columns `i j k unit calc obs`
/// * `borehole` -- index of the borehole in the list returned by [boreholes]
/// * `delz` -- vertical cell size in m
/// * `z_extent` -- vertical extent of the model in m
pub fn borehole_log(data: &InvData, borehole: usize, delz: f64, z_extent: f64) -> Result<BoreholeLog, StrError> {
    let list = boreholes(data)?;
    let (i, j) = *list.get(borehole).ok_or("borehole index is out of range")?;
    let ci = data.column("i")?;
    let cj = data.column("j")?;
    let ck = data.column("k")?;
    let cunit = data.column("unit")?;
    let ccalc = data.column("calc")?;
    let cobs = data.column("obs")?;
    let mut k = Vec::new();
    let mut log = BoreholeLog {
        i,
        j,
        depth: Vec::new(),
        calc: Vec::new(),
        obs: Vec::new(),
        units: Vec::new(),
    };
    for n in 0..ci.len() {
        if ci[n] as usize == i && cj[n] as usize == j {
            k.push(ck[n]);
            log.calc.push(ccalc[n]);
            log.obs.push(cobs[n]);
            log.units.push(cunit[n] as usize);
        }
    }
    log.depth = log_depths(&k, delz, z_extent);
    Ok(log)
}

impl BoreholeLog {
    /// Returns the contiguous depth intervals of each unit along the borehole
    pub fn lithology_spans(&self) -> Vec<LithSpan> {
        let mut spans = Vec::new();
        if self.units.is_empty() {
            return spans;
        }
        let mut start = 0;
        for n in lithology_changes(&self.units) {
            spans.push(LithSpan {
                top: self.depth[start],
                bottom: self.depth[n + 1],
                unit: self.units[n],
            });
            start = n + 1;
        }
        let last = self.units.len() - 1;
        spans.push(LithSpan {
            top: self.depth[start],
            bottom: self.depth[last],
            unit: self.units[last],
        });
        spans
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use russell_lab::approx_eq;

    fn sample() -> Result<InvData, StrError> {
        InvData::parse(
            "data\n\
             records\n\
             % i j k unit calc obs\n\
             3 4 10 2 45.5 46.0\n\
             3 4 11 2 40.1 40.0\n\
             5 1 11 3 38.2 37.9\n\
             3 4 12 5 35.0 34.5\n\
             3 4 13 5 30.0 30.5\n",
        )
    }

    #[test]
    fn lithology_changes_works() {
        assert_eq!(lithology_changes(&[]), Vec::<usize>::new());
        assert_eq!(lithology_changes(&[1, 1, 1]), Vec::<usize>::new());
        assert_eq!(lithology_changes(&[1, 1, 2, 2, 3]), vec![1, 3]);
    }

    #[test]
    fn log_depths_works() {
        let d = log_depths(&[0.0, 1.0, 10.0], 100.0, 1000.0);
        approx_eq(d[0], -950.0, 1e-15);
        approx_eq(d[1], -850.0, 1e-15);
        approx_eq(d[2], 50.0, 1e-15);
    }

    #[test]
    fn borehole_log_works() -> Result<(), StrError> {
        let data = sample()?;
        assert_eq!(boreholes(&data)?, vec![(3, 4), (5, 1)]);
        let log = borehole_log(&data, 0, 100.0, 2000.0)?;
        assert_eq!((log.i, log.j), (3, 4));
        assert_eq!(log.calc, vec![45.5, 40.1, 35.0, 30.0]);
        assert_eq!(log.units, vec![2, 2, 5, 5]);
        approx_eq(log.depth[0], -950.0, 1e-15);
        let spans = log.lithology_spans();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].unit, 2);
        approx_eq(spans[0].top, -950.0, 1e-15);
        approx_eq(spans[1].top, -750.0, 1e-15);
        approx_eq(spans[0].bottom, -750.0, 1e-15);
        assert_eq!(spans[1].unit, 5);
        approx_eq(spans[1].bottom, -650.0, 1e-15);

        let other = borehole_log(&data, 1, 100.0, 2000.0)?;
        assert_eq!(other.obs, vec![37.9]);
        assert_eq!(other.lithology_spans().len(), 1);
        assert_eq!(borehole_log(&data, 2, 100.0, 2000.0).err(), Some("borehole index is out of range"));
        Ok(())
    }
}
