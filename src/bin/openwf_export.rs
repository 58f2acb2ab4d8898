use openwf::prelude::*;
use openwf::preproc::{GeoModel, OutputFormat};
use openwf::StrError;
use structopt::StructOpt;
use tracing::info;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "openwf_export",
    about = "Generates a SHEMAT-Suite input file from a geological model"
)]
struct Options {
    /// JSON file with the geological model (grid, lithology block, topography mask)
    model: String,

    /// JSON file with the petrophysical parameters of the units
    #[structopt(long)]
    units: Option<String>,

    /// Directory where the input file is saved
    #[structopt(long, default_value = "/tmp/openwf/results")]
    out_dir: String,

    /// Name of the input file
    #[structopt(long, default_value = "geo_model_SHEMAT_input_erode")]
    filename: String,

    /// Output formats written by SHEMAT-Suite
    #[structopt(long, use_delimiter = true, default_value = "vtk,hdf")]
    output: Vec<OutputFormat>,

    /// Couple heat transport with groundwater flow
    #[structopt(long)]
    coupled: bool,

    /// Basal heat flow in W/m²
    #[structopt(long, default_value = "0.07")]
    basal_heat_flow: f64,

    /// Lateral boundary conditions (closed or open)
    #[structopt(long, default_value = "closed")]
    lateral: LateralBoundaries,

    /// File with the head boundary condition records
    #[structopt(long)]
    head_bcs: Option<String>,

    /// File with the top temperature boundary condition records
    #[structopt(long)]
    temp_bcs: Option<String>,

    /// File with the basal heat-flow values
    #[structopt(long)]
    heat_flow_bcs: Option<String>,

    /// File with the observed data
    #[structopt(long)]
    data: Option<String>,
}

fn main() -> Result<(), StrError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // parse options
    let options = Options::from_args();

    // configuration
    let mut config = ExportConfig::new();
    config
        .set_output(&options.output)?
        .set_conduction_only(!options.coupled)?
        .set_basal_heat_flow(options.basal_heat_flow)?
        .set_lateral_boundaries(options.lateral)?
        .set_out_dir(&options.out_dir)?
        .set_filename(&options.filename)?;
    info!("{}", config);

    // load data
    let model = GeoModel::read_json(&options.model)?;
    let grid = model.grid()?;
    let liths = model.liths()?;
    let units = match &options.units {
        Some(path) => Some(UnitTable::read_json(path)?),
        None => None,
    };

    // assemble input file
    let mut input = ShematInput::new(grid, &liths, &config)?;
    let names: Vec<&str> = model.unit_names.iter().map(|s| s.as_str()).collect();
    input.set_unit_names(&names);
    if let Some(table) = &units {
        input.set_units(table);
    }
    if let Some(path) = &options.head_bcs {
        input.set_head_bcs_file(path)?;
    }
    if let Some(path) = &options.temp_bcs {
        input.set_top_temp_bcs_file(path)?;
    }
    if let Some(path) = &options.heat_flow_bcs {
        input.set_heat_flow_bcs_file(path)?;
    }
    if let Some(path) = &options.data {
        input.set_data_file(path)?;
    }
    let path = input.write()?;

    // message
    let thin_line = format!("{:─^1$}", "", path.len());
    println!("\n\n{}", thin_line);
    println!("SHEMAT-Suite input file generated:");
    println!("{}", path);
    println!("{}\n\n", thin_line);
    Ok(())
}
