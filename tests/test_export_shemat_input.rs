use openwf::prelude::*;
use openwf::preproc::{decode_lithology, parse_uindex, write_job_file, GeoModel};
use openwf::StrError;
use std::fs;

// Returns a model with two units below a topography cutting the top layer at i = 0
fn sample_model() -> GeoModel {
    let resolution = [3, 2, 4];
    let lith = Grid3::from_fn(resolution, |_, _, k| if k < 2 { 1.0 } else { 2.0 });
    let mask = Grid3::from_fn(resolution, |i, _, k| i == 0 && k == 3);
    GeoModel {
        resolution,
        extent: [0.0, 300.0, 0.0, 200.0, -3000.0, 1000.0],
        lith_block: lith.as_slice().to_vec(),
        mask: Some(mask.as_slice().to_vec()),
        unit_names: vec!["Basement".to_string(), "Cover".to_string()],
    }
}

#[test]
fn test_export_shemat_input() -> Result<(), StrError> {
    let dir = format!("{}/export_shemat_input", DEFAULT_TEST_DIR);
    let _ = fs::remove_dir_all(&dir);

    // geological model
    let model_path = format!("{}/model.json", dir);
    sample_model().write_json(&model_path)?;
    let model = GeoModel::read_json(&model_path)?;
    let grid = model.grid()?;
    let liths = model.liths()?;
    assert_eq!(liths.get(0, 1, 3), 3);
    assert_eq!(liths.get(1, 1, 3), 2);

    // configuration
    let mut config = ExportConfig::new();
    config.set_out_dir(&dir)?.set_filename("model_0")?;

    // input file
    let mut input = ShematInput::new(grid, &liths, &config)?;
    let names: Vec<&str> = model.unit_names.iter().map(|s| s.as_str()).collect();
    input.set_unit_names(&names);
    let path = input.write()?;
    assert_eq!(path, format!("{}/model_0", dir));

    // check the file
    let content = fs::read_to_string(&path).map_err(|_| "cannot read file")?;
    assert!(content.contains("# grid\n3 2 4\n"));
    assert!(content.contains("# delz\n4*1000.0\n"));
    assert!(content.contains("# head bcd, simple=top, error=ignore\n6*4000.0\n"));
    assert!(content.contains("!Basement \n"));
    assert!(content.contains("!Cover \n"));
    let (_, uindex) = content.split_once("# uindex\n").ok_or("uindex block is missing")?;
    let runs = parse_uindex(uindex)?;
    let total: usize = runs.iter().map(|r| r.count).sum();
    assert_eq!(total, 24);
    let back = decode_lithology(&runs, [3, 2, 4], Order::Fortran)?;
    assert_eq!(back, liths);

    // job file
    let job = format!("{}/shemat.job", dir);
    write_job_file(&job, &["model_0".to_string(), "model_1".to_string()])?;
    let text = fs::read_to_string(&job).map_err(|_| "cannot read file")?;
    assert_eq!(text, "model_0 \nmodel_1");
    Ok(())
}
