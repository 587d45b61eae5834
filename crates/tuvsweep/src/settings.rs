//! Simulator installation settings
//!
//! Settings describe where the TUV installation lives and which fixed paths
//! it reads and writes. Relative paths resolve against `home`.
//!
//! ```yaml
//! home: /data/TUV-V5.4
//! executable: ./tuv
//! reference_input: INPUTS/usrinp_backup
//! input: INPUTS/usrinp
//! output_file: usrout.txt
//! log_file: tuvlog.txt
//! output_root: OUTPUT
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorSettings {
    /// TUV installation directory, also the simulator's working directory
    #[serde(default = "default_home")]
    pub home: PathBuf,

    #[serde(default = "default_executable")]
    pub executable: PathBuf,

    /// Extra command-line arguments; TUV itself takes none
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,

    /// Pristine input file every patch starts from
    #[serde(default = "default_reference_input")]
    pub reference_input: PathBuf,

    /// Input file the simulator reads
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Fixed-path result file written by each run
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// Fixed-path log file written by each run
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Directory under which each sweep label gets its archive
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,
}

fn default_home() -> PathBuf {
    PathBuf::from(".")
}

fn default_executable() -> PathBuf {
    PathBuf::from("./tuv")
}

fn default_reference_input() -> PathBuf {
    PathBuf::from("INPUTS/usrinp_backup")
}

fn default_input() -> PathBuf {
    PathBuf::from("INPUTS/usrinp")
}

fn default_output_file() -> PathBuf {
    PathBuf::from("usrout.txt")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tuvlog.txt")
}

fn default_output_root() -> PathBuf {
    PathBuf::from("OUTPUT")
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            home: default_home(),
            executable: default_executable(),
            arguments: Vec::new(),
            reference_input: default_reference_input(),
            input: default_input(),
            output_file: default_output_file(),
            log_file: default_log_file(),
            output_root: default_output_root(),
        }
    }
}

impl SimulatorSettings {
    /// Settings rooted at a TUV installation, all other paths default
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            ..Default::default()
        }
    }

    /// Get the default settings path (~/.tuvsweep/settings.yaml)
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tuvsweep")
            .join("settings.yaml")
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load an explicit file, else the default file if present, else defaults
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let path = Self::default_path();
        if path.exists() {
            tracing::debug!(path = %path.display(), "Loading default settings");
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.home.join(path)
        }
    }

    pub fn executable_path(&self) -> PathBuf {
        self.resolve(&self.executable)
    }

    pub fn reference_input_path(&self) -> PathBuf {
        self.resolve(&self.reference_input)
    }

    pub fn input_path(&self) -> PathBuf {
        self.resolve(&self.input)
    }

    pub fn output_file_path(&self) -> PathBuf {
        self.resolve(&self.output_file)
    }

    pub fn log_file_path(&self) -> PathBuf {
        self.resolve(&self.log_file)
    }

    pub fn output_root_path(&self) -> PathBuf {
        self.resolve(&self.output_root)
    }
}
