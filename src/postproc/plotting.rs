use super::{BoreholeLog, Dataset};
use crate::base::Axis;
use crate::StrError;
use plotpy::{Canvas, Contour, Curve, Legend, Plot};
use russell_lab::{Matrix, Vector};

/// Background color of units without an assigned color
pub const DEFAULT_UNIT_COLOR: &str = "#ffffff";

// (unit ID, color) of the units in borehole logs
const UNIT_COLORS: [(usize, &str); 14] = [
    (7, "#fbf379"),
    (8, "#fbf379"),
    (9, "#92d2ec"),
    (10, "#47c4e2"),
    (11, "#b0ac67"),
    (12, "#7f76b4"),
    (13, "#ffe19f"),
    (14, "#ffcf59"),
    (15, "#f9ee3a"),
    (16, "#97ca68"),
    (17, "#609133"),
    (18, "#efad83"),
    (19, "#fffafa"),
    (20, "#efad00"),
];

/// Returns the background color of a unit in borehole logs
pub fn unit_color(unit: usize) -> &'static str {
    UNIT_COLORS
        .iter()
        .find(|(id, _)| *id == unit)
        .map_or(DEFAULT_UNIT_COLOR, |(_, color)| *color)
}

/// Plots a slice of a parameter through the model with the unit boundaries on top
///
/// # Input
///
/// * `data` -- dataset with the parameter, `uindex`, `x`, `y`, and `z`
/// * `parameter` -- name of the field to plot (e.g., `temp`)
/// * `axis` -- the slice is normal to this direction
/// * `cell` -- cell index of the slice along `axis`
/// * `model_depth` -- vertical extent of the model below sea level; if None,
///   it is taken as the sum of the first and last cell elevations
pub fn plot_slice(
    data: &Dataset,
    parameter: &str,
    axis: Axis,
    cell: usize,
    model_depth: Option<f64>,
) -> Result<Plot, StrError> {
    let field = data.field(parameter)?;
    let uindex = data.field("uindex")?;
    let x = data.coords(Axis::X)?;
    let y = data.coords(Axis::Y)?;
    let z = data.coords(Axis::Z)?;
    let nz = z.dim();
    if nz == 0 {
        return Err("the dataset has no cells along z");
    }
    let z_extent = model_depth.unwrap_or(z[0] + z[nz - 1]);
    let elevation = Vector::from(&z.as_data().iter().map(|v| v - z_extent).collect::<Vec<_>>());

    let index = axis.result_index();
    let values = field.plane(index, cell)?;
    let units = uindex.plane(index, cell)?;
    let (horizontal, vertical, xlabel, ylabel, title) = match axis {
        Axis::X => (&y, &elevation, "y [m]", "elevation [m]", format!("{}, x-direction, cell {}", parameter, cell)),
        Axis::Y => (&x, &elevation, "x [m]", "elevation [m]", format!("{}, y-direction, cell {}", parameter, cell)),
        Axis::Z => (&x, &y, "x [m]", "y [m]", format!("{}, z-direction, {} m a.s.l.", parameter, elevation[cell])),
    };
    let (xx, yy) = mesh(horizontal, vertical);

    let mut contour = Contour::new();
    contour
        .set_colormap_name("viridis")
        .set_no_lines(true)
        .set_no_labels(true)
        .set_colorbar_label(parameter)
        .draw(&xx, &yy, &to_rows(&values));

    // unit boundaries lie half way between consecutive unit indices
    let (min_unit, max_unit) = min_max(&units);
    let levels: Vec<f64> = (min_unit as usize..max_unit as usize).map(|u| u as f64 + 0.5).collect();
    let mut plot = Plot::new();
    plot.add(&contour);
    if !levels.is_empty() {
        let mut boundaries = Contour::new();
        boundaries
            .set_colors(&["none"])
            .set_levels(&levels)
            .set_line_color("#222222")
            .set_no_labels(true)
            .set_no_colorbar(true)
            .draw(&xx, &yy, &to_rows(&units));
        plot.add(&boundaries);
    }
    plot.set_title(&title).grid_and_labels(xlabel, ylabel);
    Ok(plot)
}

/// Plots the simulated and observed values along a borehole with the units as background
pub fn plot_log(log: &BoreholeLog) -> Plot {
    let mut plot = Plot::new();
    let (tmin, tmax) = log
        .calc
        .iter()
        .chain(&log.obs)
        .fold((f64::MAX, f64::MIN), |(a, b), v| (f64::min(a, *v), f64::max(b, *v)));
    for span in log.lithology_spans() {
        let mut rect = Canvas::new();
        rect.set_face_color(unit_color(span.unit))
            .set_edge_color("none")
            .draw_polyline(
                &vec![
                    vec![tmin, span.top],
                    vec![tmax, span.top],
                    vec![tmax, span.bottom],
                    vec![tmin, span.bottom],
                ],
                true,
            );
        plot.add(&rect);
    }

    let mut calc = Curve::new();
    calc.set_label("simulated")
        .set_line_style("None")
        .set_marker_style("o")
        .set_marker_color("#055ff4")
        .set_marker_size(8.0)
        .draw(&log.calc, &log.depth);
    let mut obs = Curve::new();
    obs.set_label("observed")
        .set_line_style("None")
        .set_marker_style("+")
        .set_marker_color("black")
        .set_marker_size(10.0)
        .draw(&log.obs, &log.depth);
    let mut legend = Legend::new();
    legend.draw();
    plot.add(&calc)
        .add(&obs)
        .add(&legend)
        .set_title(&format!("borehole at cell ({}, {})", log.i, log.j))
        .grid_and_labels("temperature [°C]", "elevation [m]");
    plot
}

// Returns the coordinate matrices of a rectangular mesh with rows along `v` and columns along `h`
fn mesh(h: &Vector, v: &Vector) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let xx = (0..v.dim()).map(|_| h.as_data().to_vec()).collect();
    let yy = (0..v.dim()).map(|r| vec![v[r]; h.dim()]).collect();
    (xx, yy)
}

fn to_rows(m: &Matrix) -> Vec<Vec<f64>> {
    let (nrow, ncol) = m.dims();
    (0..nrow).map(|i| (0..ncol).map(|j| m.get(i, j)).collect()).collect()
}

fn min_max(m: &Matrix) -> (f64, f64) {
    m.as_data()
        .iter()
        .fold((f64::MAX, f64::MIN), |(a, b), v| (f64::min(a, *v), f64::max(b, *v)))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Grid3;
    use crate::postproc::{borehole_log, InvData};

    fn sample() -> Result<Dataset, StrError> {
        let shape = [4, 3, 2];
        let mut data = Dataset::new();
        data.add_field("x", Grid3::from_fn(shape, |_, _, i| 50.0 + 100.0 * i as f64))?
            .add_field("y", Grid3::from_fn(shape, |_, j, _| 50.0 + 100.0 * j as f64))?
            .add_field("z", Grid3::from_fn(shape, |k, _, _| 50.0 + 100.0 * k as f64))?
            .add_field("temp", Grid3::from_fn(shape, |k, _, _| 80.0 - 10.0 * k as f64))?
            .add_field("uindex", Grid3::from_fn(shape, |k, _, _| if k < 2 { 1.0 } else { 2.0 }))?;
        Ok(data)
    }

    #[test]
    fn mesh_works() {
        let (xx, yy) = mesh(&Vector::from(&[1.0, 2.0, 3.0]), &Vector::from(&[10.0, 20.0]));
        assert_eq!(xx, vec![vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]]);
        assert_eq!(yy, vec![vec![10.0, 10.0, 10.0], vec![20.0, 20.0, 20.0]]);
    }

    #[test]
    fn plot_slice_works() -> Result<(), StrError> {
        let data = sample()?;
        plot_slice(&data, "temp", Axis::X, 1, None)?;
        plot_slice(&data, "temp", Axis::Y, 2, Some(400.0))?;
        plot_slice(&data, "temp", Axis::Z, 0, Some(400.0))?;
        assert_eq!(
            plot_slice(&data, "lz", Axis::X, 0, None).err(),
            Some("field does not exist in the dataset; see available_parameters for existing fields")
        );
        assert_eq!(
            plot_slice(&data, "temp", Axis::X, 2, None).err(),
            Some("plane index is out of bounds")
        );
        Ok(())
    }

    #[test]
    fn plot_log_works() -> Result<(), StrError> {
        let data = InvData::parse("a\nb\n% i j k unit calc obs\n1 1 1 2 40 41\n1 1 2 3 35 34\n")?;
        let log = borehole_log(&data, 0, 100.0, 1000.0)?;
        plot_log(&log);
        assert_eq!(unit_color(13), "#ffe19f");
        assert_eq!(unit_color(7), "#fbf379");
        assert_eq!(unit_color(20), "#efad00");
        assert_eq!(unit_color(6), DEFAULT_UNIT_COLOR);
        assert_eq!(unit_color(34), DEFAULT_UNIT_COLOR);
        Ok(())
    }
}
