//! TUV input deck and sweep library
//!
//! This crate holds everything about a TUV batch run that does not touch the
//! filesystem or the simulator process:
//! - The static catalog of input parameters and their kinds
//! - Fixed-width value formatting and the matching parse
//! - The working deck of parameter values
//! - Reading, patching and rendering the `usrinp` input file
//! - Building the Cartesian mesh of a multi-parameter sweep
//!
//! ```ignore
//! use tuvsweep_core::{InputFile, SweepAxis, SweepPlan, default_inputs};
//!
//! let mut deck = default_inputs();
//! deck.set("nt", 1)?;
//! let plan = SweepPlan::new(vec![SweepAxis::range("imonth", 1.0, 12.0, 1.0)?], None)?;
//! for point in plan.iter() {
//!     point.assign_into(&mut deck)?;
//!     let mut file = InputFile::parse(&reference)?;
//!     file.apply(&deck)?;
//!     std::fs::write("INPUTS/usrinp", file.render())?;
//! }
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod catalog;
pub mod deck;
pub mod error;
pub mod mesh;
pub mod usrinp;
pub mod value;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use catalog::{CATALOG, ParamKind, default_inputs, kind_of};
pub use deck::InputDeck;
pub use error::{CatalogError, InputFileError, MeshError, ParseError, ValueError};
pub use mesh::{SweepAxis, SweepPlan, SweepPoint};
pub use usrinp::InputFile;
pub use value::{ParamValue, format_value, parse_value};
