//! TUV batch sweep driver
//!
//! Runs the TUV radiative-transfer model once per point of a parameter sweep:
//! - Sweep definitions and simulator settings loaded from YAML
//! - Patching the reference `usrinp` file for each point
//! - Launching the simulator and waiting for it
//! - Filing each run's fixed-path outputs under a per-sweep archive
//! - A manifest of what ran and what was skipped

// ============================================================================
// Core modules
// ============================================================================

pub mod driver;
pub mod layout;
pub mod simulator;

// ============================================================================
// Configuration modules
// ============================================================================

pub mod definition;
pub mod settings;

// ============================================================================
// Support modules
// ============================================================================

pub mod error;
pub mod logging;
pub mod util;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use definition::{AxisSpec, RangeSpec, SweepDefinition, parse_override};
pub use driver::{
    CatalogDiscrepancy, PlannedPoint, SweepSummary, check_reference, patch_input, plan_sweep,
    run_sweep,
};
pub use error::{SettingsError, SimulatorError, SweepError};
pub use layout::{ArchivedRun, RunLayout, SweepManifest};
pub use settings::SimulatorSettings;
pub use simulator::{ProcessSimulator, Simulator};
