//! Driver tests against a scratch simulator installation
//!
//! Tests are organized by topic:
//! - `sweeps` - Full sweeps through a recording simulator
//! - `patching` - One-off input patches and reference checks

mod patching;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::SimulatorError;
use crate::settings::SimulatorSettings;
use crate::simulator::Simulator;

pub(crate) const REFERENCE_USRINP: &str = include_str!("usrinp_backup");

/// A temporary TUV installation with the stock reference input
pub(crate) struct Installation {
    pub dir: TempDir,
    pub settings: SimulatorSettings,
}

impl Installation {
    pub fn new() -> Self {
        Self::with_reference(REFERENCE_USRINP)
    }

    pub fn with_reference(reference: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("INPUTS")).unwrap();
        fs::write(dir.path().join("INPUTS/usrinp_backup"), reference).unwrap();
        let settings = SimulatorSettings::with_home(dir.path());
        Self { dir, settings }
    }

    pub fn home(&self) -> &Path {
        self.dir.path()
    }

    pub fn input(&self) -> Option<String> {
        fs::read_to_string(self.settings.input_path()).ok()
    }
}

/// Stands in for TUV: remembers each input file it was run against and
/// writes the two fixed-path outputs
pub(crate) struct RecordingSimulator {
    home: PathBuf,
    pub inputs: Vec<String>,
    /// Fail on this 1-based run
    pub fail_on: Option<usize>,
}

impl RecordingSimulator {
    pub fn new(home: &Path) -> Self {
        Self {
            home: home.to_path_buf(),
            inputs: Vec::new(),
            fail_on: None,
        }
    }

    pub fn runs(&self) -> usize {
        self.inputs.len()
    }
}

impl Simulator for RecordingSimulator {
    fn run(&mut self) -> Result<(), SimulatorError> {
        let input = fs::read_to_string(self.home.join("INPUTS/usrinp")).unwrap();
        self.inputs.push(input);
        let n = self.inputs.len();

        if self.fail_on == Some(n) {
            return Err(SimulatorError::Spawn {
                program: self.home.join("tuv"),
                source: io::Error::other("simulated crash"),
            });
        }

        fs::write(self.home.join("usrout.txt"), format!("output {n}\n")).unwrap();
        fs::write(self.home.join("tuvlog.txt"), format!("log {n}\n")).unwrap();
        Ok(())
    }
}

/// Value text of `name` in a rendered input file
pub(crate) fn field(input: &str, name: &str) -> String {
    tuvsweep_core::InputFile::parse(input)
        .unwrap()
        .get(name)
        .unwrap()
        .to_string()
}
