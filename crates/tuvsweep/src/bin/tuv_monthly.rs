//! Month-of-year sweep with the stock example settings: local noon on the
//! first of each month, 205-420 nm, aerosols off.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use tuvsweep::logging::init_logging;
use tuvsweep::{ProcessSimulator, SimulatorSettings, SweepDefinition, run_sweep};

#[derive(Parser, Debug)]
#[command(name = "tuv-monthly")]
#[command(about = "Run TUV once for each month of the year")]
struct Args {
    /// Settings file (default: ~/.tuvsweep/settings.yaml if present)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Archive label under the output root
    #[arg(long, default_value = "example-1-output")]
    label: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let settings = SimulatorSettings::load_or_default(args.settings.as_deref())?;
    init_logging(&settings.output_root_path(), &args.log_level)?;

    let definition = SweepDefinition::monthly_example(args.label);
    let mut simulator = ProcessSimulator::from_settings(&settings)
        .wrap_err("failed to resolve the simulator executable")?;

    let summary = run_sweep(&definition, &settings, &mut simulator)?;
    println!(
        "Completed {}/{} runs in {}",
        summary.completed,
        summary.total,
        summary.sweep_dir.display()
    );
    Ok(())
}
