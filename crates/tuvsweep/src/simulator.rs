//! Running the external simulator

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::SimulatorError;
use crate::settings::SimulatorSettings;

/// One invocation of the simulator against the current input file.
///
/// The driver only needs "run once and wait"; where the program lives and
/// how it is launched is up to the implementation.
pub trait Simulator {
    fn run(&mut self) -> Result<(), SimulatorError>;
}

/// Launches the simulator executable as a child process and waits for it
#[derive(Debug, Clone)]
pub struct ProcessSimulator {
    program: PathBuf,
    arguments: Vec<String>,
    working_dir: PathBuf,
}

impl ProcessSimulator {
    pub fn new(program: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            arguments: Vec::new(),
            working_dir: working_dir.into(),
        }
    }

    pub fn with_arguments(mut self, arguments: Vec<String>) -> Self {
        self.arguments = arguments;
        self
    }

    /// The executable named by `settings`, run from the installation directory
    pub fn from_settings(settings: &SimulatorSettings) -> std::io::Result<Self> {
        // Made absolute so the program path does not depend on `current_dir`
        let program = std::path::absolute(settings.executable_path())?;
        Ok(Self::new(program, &settings.home).with_arguments(settings.arguments.clone()))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Simulator for ProcessSimulator {
    fn run(&mut self) -> Result<(), SimulatorError> {
        tracing::debug!(program = %self.program.display(), "Starting simulator");

        let output = Command::new(&self.program)
            .args(&self.arguments)
            .current_dir(&self.working_dir)
            .stdin(Stdio::inherit())
            .output()
            .map_err(|source| SimulatorError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        for line in stdout.lines() {
            tracing::trace!(target: "tuvsweep::simulator", "{line}");
        }

        if !output.status.success() {
            return Err(SimulatorError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        tracing::debug!(
            status = %output.status,
            stdout_lines = stdout.lines().count(),
            "Simulator finished"
        );
        Ok(())
    }
}
