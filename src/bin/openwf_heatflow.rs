use openwf::base::DEFAULT_MODEL_DEPTH;
use openwf::postproc::{calc_cond_hf_over_interval, Dataset, HeatFlowMap};
use openwf::StrError;
use structopt::StructOpt;
use tracing::info;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "openwf_heatflow",
    about = "Computes the conductive heat flow over a depth interval of SHEMAT-Suite results"
)]
struct Options {
    /// JSON file with the SHEMAT-Suite results (temp, lz, and z fields)
    dataset: String,

    /// JSON file where the heat-flow map is saved
    output: String,

    /// Upper bound of the interval in m above sea level
    #[structopt(long, allow_hyphen_values = true)]
    top: f64,

    /// Lower bound of the interval in m above sea level
    #[structopt(long, allow_hyphen_values = true)]
    bottom: f64,

    /// Vertical extent of the model below sea level in m (default 6000)
    #[structopt(long)]
    model_depth: Option<f64>,

    /// Keep the direction of the heat flow (otherwise the magnitude is saved)
    #[structopt(long)]
    signed: bool,
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

    // load data
    let data = Dataset::read_json(&options.dataset)?;
    info!(fields = ?data.names(), "loaded dataset");

    // compute and save
    let interval = [options.bottom, options.top];
    let model_depth = options.model_depth.unwrap_or(DEFAULT_MODEL_DEPTH);
    let hf = calc_cond_hf_over_interval(&data, interval, model_depth, options.signed)?;
    let map = HeatFlowMap::new(interval, options.signed, &hf);
    map.write_json(&options.output)?;

    // message
    let thin_line = format!("{:─^1$}", "", options.output.len());
    println!("\n\n{}", thin_line);
    println!("heat-flow map generated:");
    println!("{}", options.output);
    println!("{}\n\n", thin_line);
    Ok(())
}
