use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use tuvsweep_core::{CatalogError, InputFileError, MeshError, ParseError};

/// Error types for loading YAML settings and sweep definitions
#[derive(Debug)]
pub enum SettingsError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, message: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            SettingsError::Parse { path, message } => {
                write!(f, "failed to parse {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io { source, .. } => Some(source),
            SettingsError::Parse { .. } => None,
        }
    }
}

/// Errors from running the simulator executable
#[derive(Debug)]
pub enum SimulatorError {
    Spawn {
        program: PathBuf,
        source: io::Error,
    },
    Failed {
        program: PathBuf,
        status: ExitStatus,
        stderr: String,
    },
}

impl fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulatorError::Spawn { program, source } => {
                write!(f, "could not start {}: {source}", program.display())
            }
            SimulatorError::Failed {
                program,
                status,
                stderr,
            } => {
                write!(f, "{} exited with {status}", program.display())?;
                if !stderr.trim().is_empty() {
                    write!(f, ": {}", stderr.trim())?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for SimulatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulatorError::Spawn { source, .. } => Some(source),
            SimulatorError::Failed { .. } => None,
        }
    }
}

/// Everything that can abort a sweep or a single patch
#[derive(Debug)]
pub enum SweepError {
    Settings(SettingsError),
    /// An axis must give exactly one of `values` or `range`
    AxisValues(String),
    Catalog(CatalogError),
    Mesh(MeshError),
    Reference { path: PathBuf, source: ParseError },
    InputFile(InputFileError),
    Simulator(SimulatorError),
    /// The sweep label already has an archive directory
    ArchiveExists(PathBuf),
    Io { context: String, source: io::Error },
}

impl SweepError {
    pub(crate) fn io(context: impl Into<String>) -> impl FnOnce(io::Error) -> SweepError {
        let context = context.into();
        move |source| SweepError::Io { context, source }
    }
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepError::Settings(e) => write!(f, "{e}"),
            SweepError::AxisValues(name) => {
                write!(f, "iterable {name} needs exactly one of `values` or `range`")
            }
            SweepError::Catalog(e) => write!(f, "{e}"),
            SweepError::Mesh(e) => write!(f, "{e}"),
            SweepError::Reference { path, source } => {
                write!(f, "reference input {}: {source}", path.display())
            }
            SweepError::InputFile(e) => write!(f, "{e}"),
            SweepError::Simulator(e) => write!(f, "{e}"),
            SweepError::ArchiveExists(path) => {
                write!(f, "output directory {} already exists", path.display())
            }
            SweepError::Io { context, source } => write!(f, "{context}: {source}"),
        }
    }
}

impl std::error::Error for SweepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SweepError::Settings(e) => Some(e),
            SweepError::Catalog(e) => Some(e),
            SweepError::Mesh(e) => Some(e),
            SweepError::Reference { source, .. } => Some(source),
            SweepError::InputFile(e) => Some(e),
            SweepError::Simulator(e) => Some(e),
            SweepError::Io { source, .. } => Some(source),
            SweepError::AxisValues(_) | SweepError::ArchiveExists(_) => None,
        }
    }
}

impl From<SettingsError> for SweepError {
    fn from(err: SettingsError) -> Self {
        SweepError::Settings(err)
    }
}

impl From<CatalogError> for SweepError {
    fn from(err: CatalogError) -> Self {
        SweepError::Catalog(err)
    }
}

impl From<MeshError> for SweepError {
    fn from(err: MeshError) -> Self {
        SweepError::Mesh(err)
    }
}

impl From<InputFileError> for SweepError {
    fn from(err: InputFileError) -> Self {
        SweepError::InputFile(err)
    }
}

impl From<SimulatorError> for SweepError {
    fn from(err: SimulatorError) -> Self {
        SweepError::Simulator(err)
    }
}
