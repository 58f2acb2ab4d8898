use crate::base::{Grid3, Order};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Holds a run of consecutive cells occupied by the same geological unit
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct UnitRun {
    /// Number of consecutive cells
    pub count: usize,

    /// Unit ID shared by the cells
    pub unit: usize,
}

impl fmt::Display for UnitRun {
    /// Writes the run using the repeat syntax of SHEMAT-Suite, e.g., `120*3`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*{}", self.count, self.unit)
    }
}

impl FromStr for UnitRun {
    type Err = StrError;
    /// Parses `count*unit`; a single number is a run of one cell
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |t: &str| t.trim().parse::<usize>().map_err(|_| "cannot parse run of unit IDs");
        match s.split_once('*') {
            Some((count, unit)) => Ok(UnitRun {
                count: parse(count)?,
                unit: parse(unit)?,
            }),
            None => Ok(UnitRun {
                count: 1,
                unit: parse(s)?,
            }),
        }
    }
}

/// Run-length encodes a sequence of unit IDs
pub fn encode_sequence(ids: &[usize]) -> Vec<UnitRun> {
    let mut runs: Vec<UnitRun> = Vec::new();
    for id in ids {
        match runs.last_mut() {
            Some(run) if run.unit == *id => run.count += 1,
            _ => runs.push(UnitRun { count: 1, unit: *id }),
        }
    }
    runs
}

/// Run-length encodes a lithology grid flattened in the given order
///
/// The sum of the counts equals the number of cells and the runs preserve the
/// flattened order. SHEMAT-Suite requires [Order::Fortran].
pub fn encode_lithology(liths: &Grid3<usize>, order: Order) -> Vec<UnitRun> {
    encode_sequence(&liths.flatten(order))
}

/// Expands run-length encoded unit IDs back into the flat sequence
pub fn decode_runs(runs: &[UnitRun]) -> Vec<usize> {
    let total = runs.iter().map(|r| r.count).sum();
    let mut ids = Vec::with_capacity(total);
    for run in runs {
        ids.extend(std::iter::repeat(run.unit).take(run.count));
    }
    ids
}

/// Reconstructs the lithology grid from run-length encoded unit IDs
pub fn decode_lithology(runs: &[UnitRun], shape: [usize; 3], order: Order) -> Result<Grid3<usize>, StrError> {
    Grid3::from_vec_ordered(shape, decode_runs(runs), order)
}

/// Generates the content of the `# uindex` block, e.g., `8*1 4*2 12*3`
pub fn uindex_string(runs: &[UnitRun]) -> String {
    runs.iter().map(|r| r.to_string()).collect::<Vec<_>>().join(" ")
}

/// Parses the content of a `# uindex` block
pub fn parse_uindex(text: &str) -> Result<Vec<UnitRun>, StrError> {
    text.split_whitespace().map(|t| t.parse()).collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{decode_lithology, decode_runs, encode_lithology, encode_sequence, parse_uindex, uindex_string, UnitRun};
    use crate::base::{Grid3, Order};
    use crate::StrError;

    #[test]
    fn uniform_block_gives_a_single_run() {
        let liths = Grid3::filled([2, 2, 2], 3);
        let runs = encode_lithology(&liths, Order::Fortran);
        assert_eq!(runs, vec![UnitRun { count: 8, unit: 3 }]);
        assert_eq!(uindex_string(&runs), "8*3");
    }

    #[test]
    fn alternating_sequence_works() {
        let ids = vec![1, 2, 1, 2, 1];
        let runs = encode_sequence(&ids);
        assert_eq!(runs.len(), 5);
        assert!(runs.iter().all(|r| r.count == 1));
        assert_eq!(decode_runs(&runs), ids);
        assert_eq!(uindex_string(&runs), "1*1 1*2 1*1 1*2 1*1");
        assert_eq!(encode_sequence(&[]), Vec::new());
        assert_eq!(uindex_string(&[]), "");
    }

    #[test]
    fn layered_block_uses_column_major_order() -> Result<(), StrError> {
        // two horizontal layers: unit 1 at the bottom (k = 0) and unit 2 at the top (k = 1)
        let liths = Grid3::from_fn([3, 2, 2], |_, _, k| k + 1);
        let runs = encode_lithology(&liths, Order::Fortran);
        assert_eq!(runs, vec![UnitRun { count: 6, unit: 1 }, UnitRun { count: 6, unit: 2 }]);

        // the same block in row-major order alternates
        let runs_c = encode_lithology(&liths, Order::C);
        assert_eq!(runs_c.len(), 12);

        // decoding reconstructs the grid
        let back = decode_lithology(&runs, [3, 2, 2], Order::Fortran)?;
        assert_eq!(back, liths);
        Ok(())
    }

    #[test]
    fn counts_sum_to_the_number_of_cells() {
        for shape in [[1, 1, 1], [4, 3, 2], [5, 1, 7], [2, 9, 3]] {
            let liths = Grid3::from_fn(shape, |i, j, k| (i * 7 + j * 3 + k) % 4 / 2);
            let runs = encode_lithology(&liths, Order::Fortran);
            let total: usize = runs.iter().map(|r| r.count).sum();
            assert_eq!(total, liths.len());
            assert_eq!(decode_runs(&runs), liths.flatten(Order::Fortran));
            for pair in runs.windows(2) {
                assert_ne!(pair[0].unit, pair[1].unit);
            }
        }
    }

    #[test]
    fn parse_uindex_works() -> Result<(), StrError> {
        let runs = parse_uindex("8*1 4*2\n 3 12*3")?;
        assert_eq!(
            runs,
            vec![
                UnitRun { count: 8, unit: 1 },
                UnitRun { count: 4, unit: 2 },
                UnitRun { count: 1, unit: 3 },
                UnitRun { count: 12, unit: 3 },
            ]
        );
        assert_eq!(parse_uindex("4*x").err(), Some("cannot parse run of unit IDs"));
        Ok(())
    }
}
