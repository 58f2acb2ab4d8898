use crate::StrError;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Holds the lithology blocks of an ensemble of geological models (one block per realization)
pub type LithEnsemble = Vec<Vec<f64>>;

/// Reads a JSON file with an ensemble of lithology blocks
pub fn read_ensemble_json<P>(full_path: &P) -> Result<LithEnsemble, StrError>
where
    P: AsRef<OsStr> + ?Sized,
{
    let path = Path::new(full_path).to_path_buf();
    let file = File::open(path).map_err(|_| "cannot open file")?;
    let buffered = BufReader::new(file);
    let blocks = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
    Ok(blocks)
}

/// Writes a JSON file with an ensemble of lithology blocks
pub fn write_ensemble_json<P>(full_path: &P, blocks: &LithEnsemble) -> Result<(), StrError>
where
    P: AsRef<OsStr> + ?Sized,
{
    let path = Path::new(full_path).to_path_buf();
    if let Some(p) = path.parent() {
        fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
    }
    let mut file = File::create(&path).map_err(|_| "cannot create file")?;
    serde_json::to_writer(&mut file, blocks).map_err(|_| "cannot write file")?;
    Ok(())
}

/// Concatenates all ensembles stored as JSON files in a directory
///
/// The files are processed in lexicographic order of their names and all
/// blocks must have the same number of cells.
pub fn conc_lithblocks<P>(directory: &P) -> Result<LithEnsemble, StrError>
where
    P: AsRef<OsStr> + ?Sized,
{
    let entries = fs::read_dir(Path::new(directory)).map_err(|_| "cannot read directory")?;
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path = entry.map_err(|_| "cannot read directory entry")?.path();
        if path.extension().map_or(false, |ext| ext == "json") {
            paths.push(path);
        }
    }
    if paths.is_empty() {
        return Err("there are no JSON files with lithology blocks in the directory");
    }
    paths.sort();
    let mut all = LithEnsemble::new();
    for path in &paths {
        debug!(path = %path.display(), "reading lithology blocks");
        all.extend(read_ensemble_json(path)?);
    }
    let ncell = match all.first() {
        Some(block) => block.len(),
        None => return Err("there are no lithology blocks in the directory"),
    };
    if all.iter().any(|b| b.len() != ncell) {
        return Err("all lithology blocks must have the same number of cells");
    }
    Ok(all)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
