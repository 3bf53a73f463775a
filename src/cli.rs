//! The command line interface for the simulation.
use crate::chart::{CHART_FILE_NAME, write_chart};
use crate::log;
use crate::output::{create_output_directory, get_output_dir};
use crate::parameters::{
    DEFAULT_INFECTED_0, DEFAULT_INFECTION_RATE, DEFAULT_RECOVERED_0, DEFAULT_RECOVERY_RATE,
    DEFAULT_TIMESPAN_DAYS, ModelParameters,
};
use crate::settings::Settings;
use crate::simulation::Trajectory;
use ::log::{info, warn};
use anyhow::{Context, Result};
use clap::{Args, Parser};
use std::path::{Path, PathBuf};

/// Simulate an SIR epidemic and plot the results.
#[derive(Parser)]
#[command(version, about, allow_negative_numbers = true)]
struct Cli {
    /// The model parameters
    #[command(flatten)]
    model: ModelArgs,
    /// Other run options
    #[command(flatten)]
    opts: RunOpts,
    /// Flag to provide the CLI docs as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// Parameters for the model
#[derive(Args, Debug, PartialEq)]
pub struct ModelArgs {
    /// Total number of individuals in the population
    #[arg(required_unless_present = "markdown_help")]
    pub population: Option<i64>,
    /// Infection rate /day
    #[arg(short, long, default_value_t = DEFAULT_INFECTION_RATE)]
    pub beta: f64,
    /// Recovery rate /day
    #[arg(short, long, default_value_t = DEFAULT_RECOVERY_RATE)]
    pub gamma: f64,
    /// Number of infected at day 0
    #[arg(
        short,
        long = "infected_0",
        alias = "infected-0",
        default_value_t = DEFAULT_INFECTED_0
    )]
    pub infected_0: i64,
    /// Number of 'recovered' at day 0
    #[arg(
        short,
        long = "recovered_0",
        alias = "recovered-0",
        default_value_t = DEFAULT_RECOVERED_0
    )]
    pub recovered_0: i64,
    /// Number of days to sweep
    #[arg(short, long, default_value_t = DEFAULT_TIMESPAN_DAYS)]
    pub timespan: i64,
}

impl ModelArgs {
    /// Convert to [`ModelParameters`], if a population was given
    fn into_parameters(self) -> Option<ModelParameters> {
        Some(ModelParameters {
            population: self.population?,
            infection_rate: self.beta,
            recovery_rate: self.gamma,
            infected_0: self.infected_0,
            recovered_0: self.recovered_0,
            timespan_days: self.timespan,
        })
    }
}

/// Options for the run
#[derive(Args, Debug, Default, PartialEq)]
pub struct RunOpts {
    /// Directory for output files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Whether to overwrite the output directory if it already exists
    #[arg(long)]
    pub overwrite: bool,
}

/// Parse CLI arguments and start the simulation
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Invoked as: `$ sir --markdown-help`
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let params = cli
        .model
        .into_parameters()
        .context("No population given")?;

    handle_run_command(&params, &cli.opts, None).map(|_| ())
}

/// Run the simulation and write the chart to the output folder.
///
/// # Arguments
///
/// * `params` - The model parameters
/// * `opts` - Other run options
/// * `settings` - Program settings; if `None`, these are loaded from the settings file
///
/// # Returns
///
/// The simulated trajectory
pub fn handle_run_command(
    params: &ModelParameters,
    opts: &RunOpts,
    settings: Option<Settings>,
) -> Result<Trajectory> {
    // Load program settings, if not provided
    let settings = if let Some(settings) = settings {
        settings
    } else {
        Settings::load().context("Failed to load settings.")?
    };

    // Get path to output folder
    let pathbuf: PathBuf;
    let output_path = if let Some(p) = opts.output_dir.as_deref() {
        p
    } else {
        pathbuf = get_output_dir();
        &pathbuf
    };

    let overwrite = create_output_directory(output_path, opts.overwrite || settings.overwrite)
        .with_context(|| {
            format!(
                "Failed to create output directory: {}",
                output_path.display()
            )
        })?;

    // Initialise program logger
    log::init(Some(settings.log_level.as_str()), Some(output_path))
        .context("Failed to initialise logging.")?;
    info!("Output folder: {}", output_path.display());

    // NB: We have to wait until the logger is initialised to display this warning
    if overwrite {
        warn!("Output folder will be overwritten");
    }

    let trajectory = crate::simulation::run(params, &settings.solver_settings())?;
    write_chart_to_dir(&trajectory, params.population, output_path)?;
    info!("Simulation complete!");

    Ok(trajectory)
}

/// Write the chart into the output folder, logging where it was saved
fn write_chart_to_dir(
    trajectory: &Trajectory,
    population: i64,
    output_path: &Path,
) -> Result<()> {
    let file_path = output_path.join(CHART_FILE_NAME);
    write_chart(trajectory, population, &file_path)?;
    info!("Chart saved to {}", file_path.display());

    Ok(())
}
