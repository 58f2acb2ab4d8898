use openwf::postproc::{c_rmse, rejection};
use openwf::preproc::{conc_lithblocks, topomask, write_ensemble_json};
use openwf::StrError;
use russell_lab::{approx_eq, Matrix, Vector};
use std::fs;

#[test]
fn test_ensemble_selection() -> Result<(), StrError> {
    // two files with realizations of a 1 x 1 x 3 model
    let dir = format!("{}/ensemble_selection", openwf::base::DEFAULT_TEST_DIR);
    let _ = fs::remove_dir_all(&dir);
    write_ensemble_json(&format!("{}/part_0.json", dir), &vec![vec![1.0, 1.0, 2.0], vec![1.0, 2.0, 2.0]])?;
    write_ensemble_json(&format!("{}/part_1.json", dir), &vec![vec![1.0, 1.0, 1.0]])?;
    let blocks = conc_lithblocks(&dir)?;
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[2], vec![1.0, 1.0, 1.0]);

    // every realization is masked with the same topography
    let mask = [false, false, true];
    for block in &blocks {
        let liths = topomask(block, &mask, [1, 1, 3])?;
        assert_eq!(liths.get(0, 0, 2), liths.as_slice().iter().copied().max().unwrap_or(0));
    }

    // simulated temperatures at two observation points (rows) for each realization (columns)
    let predicted = Matrix::from(&[[41.0, 40.0, 44.0], [52.0, 50.5, 47.0]]);
    let observed = Vector::from(&[40.0, 50.0]);
    let rmse = c_rmse(&predicted, &observed)?;
    approx_eq(rmse[0], f64::sqrt((1.0 + 4.0) / 2.0), 1e-15);
    approx_eq(rmse[1], f64::sqrt(0.25 / 2.0), 1e-15);

    // realizations with smaller error are always accepted
    let selected = rejection(rmse.as_data(), 1e-9, false, 7)?;
    assert_eq!(selected.accepted, vec![1]);
    Ok(())
}
