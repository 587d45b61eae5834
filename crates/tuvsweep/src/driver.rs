//! Batch driver: patch the input file, run the simulator, file the results
//!
//! A sweep is strictly sequential. Each run overwrites the simulator's
//! fixed-path outputs, so they are moved into the archive before the next run
//! starts. Any failure ends the sweep; a point whose coordinates contain NaN
//! is skipped and the sweep carries on.

use std::fs;
use std::path::PathBuf;

use tuvsweep_core::{
    CatalogError, InputDeck, InputFile, InputFileError, ParamKind, ParamValue, SweepPlan, catalog,
    format_value,
};

use crate::definition::SweepDefinition;
use crate::error::SweepError;
use crate::layout::{RunLayout, SweepManifest};
use crate::settings::SimulatorSettings;
use crate::simulator::Simulator;
use crate::util::io::atomic_write;

/// Outcome of a completed sweep
#[derive(Debug, Clone, PartialEq)]
pub struct SweepSummary {
    pub total: usize,
    pub completed: usize,
    /// Zero-based ordinals of skipped points
    pub skipped: Vec<usize>,
    pub sweep_dir: PathBuf,
}

/// One point of a sweep as it would run
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPoint {
    pub ordinal: usize,
    pub label: String,
    pub assignments: Vec<(String, f64)>,
    /// Set when a coordinate is NaN and the point would be skipped
    pub skip: bool,
}

/// A field whose text in the reference file disagrees with the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogDiscrepancy {
    pub name: String,
    /// `None` when the file has a field the catalog does not know
    pub declared: Option<ParamKind>,
    pub inferred: ParamKind,
}

fn read_reference(settings: &SimulatorSettings) -> Result<InputFile, SweepError> {
    let path = settings.reference_input_path();
    let text = fs::read_to_string(&path).map_err(SweepError::io(format!(
        "failed to read reference input {}",
        path.display()
    )))?;
    InputFile::parse(&text).map_err(|source| SweepError::Reference { path, source })
}

/// Patch the reference file with `deck` and write it where the simulator reads
fn write_input(
    reference: &InputFile,
    deck: &InputDeck,
    settings: &SimulatorSettings,
) -> Result<PathBuf, SweepError> {
    let mut input = reference.clone();
    input.apply(deck)?;

    let path = settings.input_path();
    atomic_write(&path, &input.render())
        .map_err(SweepError::io(format!("failed to write {}", path.display())))?;
    Ok(path)
}

/// Format every constant and coordinate the sweep will write, so a value the
/// input file cannot hold fails before the archive directory exists
fn check_writable(
    reference: &InputFile,
    deck: &InputDeck,
    plan: &SweepPlan,
) -> Result<(), SweepError> {
    reference.clone().apply(deck)?;

    for axis in plan.axes().iter().chain(plan.paired()) {
        let kind = catalog::kind_of(&axis.name)?;
        for &v in axis.values.iter().filter(|v| !v.is_nan()) {
            format_value(kind, &ParamValue::Float(v)).map_err(|source| {
                InputFileError::Value {
                    name: axis.name.clone(),
                    source,
                }
            })?;
        }
    }
    Ok(())
}

/// Run every point of a sweep definition.
///
/// All parameter names and values are checked before anything is written, so
/// a bad definition leaves the simulator directory and output root untouched.
pub fn run_sweep<S: Simulator>(
    definition: &SweepDefinition,
    settings: &SimulatorSettings,
    simulator: &mut S,
) -> Result<SweepSummary, SweepError> {
    let started = jiff::Timestamp::now();

    let mut deck = definition.base_deck()?;
    let plan = definition.to_plan()?;
    let reference = read_reference(settings)?;
    check_writable(&reference, &deck, &plan)?;

    let layout = RunLayout::new(settings.output_root_path(), &definition.label);
    layout.prepare()?;

    let total = plan.len();
    let mut manifest = SweepManifest::new(&definition.label, started, total);
    tracing::info!(
        label = %definition.label,
        total,
        axes = ?plan.names().collect::<Vec<_>>(),
        "Starting sweep"
    );

    for point in plan.iter() {
        let run = point.ordinal + 1;
        point.assign_into(&mut deck)?;

        if let Some((name, value)) = point.nan_assignment() {
            println!("..{name}={value}, skipping iteration {run}");
            tracing::warn!(point = %point.label(), parameter = name, "Skipping NaN coordinate");
            manifest.record_skip(&point, name);
            continue;
        }

        println!("{:^20}", format!("TUV Run: {run}/{total}"));
        tracing::info!(point = %point.label(), run, total, "Running simulator");

        write_input(&reference, &deck, settings)?;
        simulator.run()?;
        let archived = layout.archive(
            &point.label(),
            &settings.output_file_path(),
            &settings.log_file_path(),
        )?;
        tracing::debug!(output = %archived.output.display(), "Archived run");
        manifest.record_run(&point, archived);
    }

    manifest.finish(jiff::Timestamp::now());
    layout.write_manifest(&manifest)?;

    let summary = SweepSummary {
        total,
        completed: manifest.runs.len(),
        skipped: manifest.skipped.iter().map(|s| s.ordinal).collect(),
        sweep_dir: layout.sweep_dir(),
    };
    tracing::info!(
        completed = summary.completed,
        skipped = summary.skipped.len(),
        "Sweep finished"
    );
    Ok(summary)
}

/// List a sweep's points without touching the simulator installation
pub fn plan_sweep(definition: &SweepDefinition) -> Result<Vec<PlannedPoint>, SweepError> {
    definition.base_deck()?;
    let plan = definition.to_plan()?;

    Ok(plan
        .iter()
        .map(|point| PlannedPoint {
            ordinal: point.ordinal,
            label: point.label(),
            assignments: point
                .assignments
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
            skip: point.nan_assignment().is_some(),
        })
        .collect())
}

/// Patch the input file once. Only the named fields change.
pub fn patch_input(
    settings: &SimulatorSettings,
    overrides: &[(String, ParamValue)],
) -> Result<PathBuf, SweepError> {
    let mut deck = InputDeck::new();
    deck.merge(overrides.iter().map(|(name, value)| (name.as_str(), value)))?;

    let reference = read_reference(settings)?;
    let path = write_input(&reference, &deck, settings)?;
    for (name, value) in deck.iter() {
        tracing::info!(parameter = name, value = %value, "Set input");
    }
    Ok(path)
}

/// Compare the kinds implied by the reference file against the catalog
pub fn check_reference(settings: &SimulatorSettings) -> Result<Vec<CatalogDiscrepancy>, SweepError> {
    let reference = read_reference(settings)?;
    let discrepancies = reference
        .inferred_kinds()
        .into_iter()
        .filter_map(|(name, inferred)| match catalog::kind_of(name) {
            Ok(declared) if declared == inferred => None,
            Ok(declared) => Some(CatalogDiscrepancy {
                name: name.to_string(),
                declared: Some(declared),
                inferred,
            }),
            Err(CatalogError::UnknownParameter(_)) => Some(CatalogDiscrepancy {
                name: name.to_string(),
                declared: None,
                inferred,
            }),
        })
        .collect();
    Ok(discrepancies)
}
