use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use tuvsweep::logging::init_logging;
use tuvsweep::{
    ProcessSimulator, SimulatorSettings, SweepDefinition, check_reference, parse_override,
    patch_input, plan_sweep, run_sweep,
};
use tuvsweep_core::{CATALOG, ParamValue};

#[derive(Parser, Debug)]
#[command(name = "tuvsweep")]
#[command(about = "Batch parameter sweeps for the TUV radiative-transfer model")]
struct Args {
    /// Settings file (default: ~/.tuvsweep/settings.yaml if present)
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every point of a sweep definition
    Run {
        /// Sweep definition YAML
        definition: PathBuf,

        /// Archive label, replacing the one in the definition
        #[arg(long)]
        label: Option<String>,
    },
    /// List a sweep's points without running anything
    Plan {
        /// Sweep definition YAML
        definition: PathBuf,
    },
    /// Write the input file once with the given overrides
    Patch {
        /// Parameter override, e.g. `--set imonth=7`
        #[arg(long = "set", value_parser = parse_override, required = true)]
        overrides: Vec<(String, ParamValue)>,
    },
    /// Print the parameter catalog
    Catalog {
        /// Compare the catalog against the reference input file
        #[arg(long)]
        check: bool,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let settings = SimulatorSettings::load_or_default(args.settings.as_deref())?;

    match args.command {
        Command::Run { definition, label } => {
            let mut definition = SweepDefinition::load(&definition)?;
            if let Some(label) = label {
                definition.label = label;
            }

            init_logging(&settings.output_root_path(), &args.log_level)?;
            let mut simulator = ProcessSimulator::from_settings(&settings)
                .wrap_err("failed to resolve the simulator executable")?;

            let summary = run_sweep(&definition, &settings, &mut simulator)?;
            println!(
                "Completed {}/{} runs ({} skipped) in {}",
                summary.completed,
                summary.total,
                summary.skipped.len(),
                summary.sweep_dir.display()
            );
        }
        Command::Plan { definition } => {
            let definition = SweepDefinition::load(&definition)?;
            for point in plan_sweep(&definition)? {
                let coords: Vec<String> = point
                    .assignments
                    .iter()
                    .map(|(name, value)| format!("{name}={value}"))
                    .collect();
                let note = if point.skip { "  (skipped)" } else { "" };
                println!(
                    "{:>4}  {:<10} {}{note}",
                    point.ordinal + 1,
                    point.label,
                    coords.join(" ")
                );
            }
        }
        Command::Patch { overrides } => {
            init_logging(&settings.output_root_path(), &args.log_level)?;
            let path = patch_input(&settings, &overrides)?;
            println!("Wrote {}", path.display());
        }
        Command::Catalog { check } => {
            for (name, kind) in CATALOG {
                println!("{name:<8} {kind}");
            }

            if check {
                let discrepancies = check_reference(&settings)?;
                if discrepancies.is_empty() {
                    println!("Reference input agrees with the catalog");
                }
                for d in discrepancies {
                    match d.declared {
                        Some(declared) => println!(
                            "{}: catalog says {declared}, reference reads as {}",
                            d.name, d.inferred
                        ),
                        None => println!("{}: not in the catalog", d.name),
                    }
                }
            }
        }
    }

    Ok(())
}
