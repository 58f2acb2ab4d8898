use crate::base::{Grid3, Order};
use crate::StrError;

/// Converts the (floating point) solution of a geological model into unit IDs
///
/// The values are rounded to the nearest integer. Non-finite, negative, or
/// values too large for a `usize` are rejected.
pub fn lithology_ids(values: &[f64]) -> Result<Vec<usize>, StrError> {
    values
        .iter()
        .map(|v| {
            let id = v.round();
            if !id.is_finite() || id < 0.0 {
                Err("lithology values must be finite and non-negative")
            } else if id >= usize::MAX as f64 {
                Err("lithology value is too large for a unit ID")
            } else {
                Ok(id as usize)
            }
        })
        .collect()
}

/// Returns the largest unit ID in the lithology grid
pub fn max_unit(liths: &Grid3<usize>) -> Option<usize> {
    liths.as_slice().iter().copied().max()
}

/// Masks a lithology block with the model topography
///
/// Cells above the topography (`mask = true`) are assigned to a new unit
/// representing the air, whose ID is the largest existing ID plus one.
///
/// # Input
///
/// * `lith_block` -- unit IDs (as computed by the geological model) in row-major order
/// * `mask` -- topography mask with the same length as `lith_block`
/// * `resolution` -- number of cells along x, y, and z
///
/// # Output
///
/// Returns the masked lithology with shape `resolution` and indices `[x][y][z]`.
pub fn topomask(lith_block: &[f64], mask: &[bool], resolution: [usize; 3]) -> Result<Grid3<usize>, StrError> {
    if mask.len() != lith_block.len() {
        return Err("the topography mask must have the same size as the lithology block");
    }
    let ids = lithology_ids(lith_block)?;
    let mut liths = Grid3::from_vec_ordered(resolution, ids, Order::C)?;
    let air = match max_unit(&liths) {
        Some(m) => m.checked_add(1).ok_or("the air unit ID overflows")?,
        None => return Err("the lithology block is empty"),
    };
    let masked = Grid3::from_vec_ordered(resolution, mask.to_vec(), Order::C)?;
    let [nx, ny, nz] = resolution;
    for i in 0..nx {
        for j in 0..ny {
            for k in 0..nz {
                if masked.get(i, j, k) {
                    liths.set(i, j, k, air);
                }
            }
        }
    }
    Ok(liths)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
