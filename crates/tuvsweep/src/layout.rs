//! Per-sweep archive directory
//!
//! Directory structure:
//! <output_root>/
//!   tuvsweep.log
//!   <label>/
//!     manifest.yaml
//!     data/
//!       usrout-0.txt
//!       usrout-1.txt
//!     log/
//!       tuvlog-0.txt
//!       tuvlog-1.txt
//!
//! Two-axis sweeps name their files `usrout-{i}-{j}.txt`.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tuvsweep_core::SweepPoint;

use crate::error::SweepError;
use crate::util::io::atomic_write;

/// Where one sweep's results are filed
#[derive(Debug, Clone)]
pub struct RunLayout {
    root: PathBuf,
    label: String,
}

/// Final locations of one run's two output files
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchivedRun {
    pub output: PathBuf,
    pub log: PathBuf,
}

impl RunLayout {
    pub fn new(root: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            label: label.into(),
        }
    }

    pub fn sweep_dir(&self) -> PathBuf {
        self.root.join(&self.label)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.sweep_dir().join("data")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.sweep_dir().join("log")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.sweep_dir().join("manifest.yaml")
    }

    pub fn output_path(&self, point_label: &str) -> PathBuf {
        self.data_dir().join(format!("usrout-{point_label}.txt"))
    }

    pub fn log_path(&self, point_label: &str) -> PathBuf {
        self.log_dir().join(format!("tuvlog-{point_label}.txt"))
    }

    /// Create the archive directories. The label directory must be new so
    /// an earlier sweep is never overwritten.
    pub fn prepare(&self) -> Result<(), SweepError> {
        fs::create_dir_all(&self.root).map_err(SweepError::io(format!(
            "failed to create output root {}",
            self.root.display()
        )))?;

        let sweep_dir = self.sweep_dir();
        match fs::create_dir(&sweep_dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(SweepError::ArchiveExists(sweep_dir));
            }
            Err(e) => {
                return Err(SweepError::Io {
                    context: format!("failed to create {}", sweep_dir.display()),
                    source: e,
                });
            }
        }

        for dir in [self.data_dir(), self.log_dir()] {
            fs::create_dir(&dir)
                .map_err(SweepError::io(format!("failed to create {}", dir.display())))?;
        }
        Ok(())
    }

    /// Move the simulator's fixed-path outputs into this sweep's archive
    pub fn archive(
        &self,
        point_label: &str,
        output_file: &Path,
        log_file: &Path,
    ) -> Result<ArchivedRun, SweepError> {
        let archived = ArchivedRun {
            output: self.output_path(point_label),
            log: self.log_path(point_label),
        };
        for (from, to) in [(output_file, &archived.output), (log_file, &archived.log)] {
            fs::rename(from, to).map_err(SweepError::io(format!(
                "failed to move {} to {}",
                from.display(),
                to.display()
            )))?;
        }
        Ok(archived)
    }

    pub fn write_manifest(&self, manifest: &SweepManifest) -> Result<(), SweepError> {
        let yaml = serde_saphyr::to_string(manifest).map_err(|e| SweepError::Io {
            context: "failed to serialize manifest".to_string(),
            source: io::Error::other(e.to_string()),
        })?;
        let path = self.manifest_path();
        atomic_write(&path, &yaml)
            .map_err(SweepError::io(format!("failed to write {}", path.display())))
    }
}

/// Record of a finished sweep, written next to its data
#[derive(Debug, Clone, Serialize)]
pub struct SweepManifest {
    pub label: String,
    pub started: jiff::Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished: Option<jiff::Timestamp>,
    pub total_points: usize,
    pub runs: Vec<ManifestRun>,
    pub skipped: Vec<ManifestSkip>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManifestRun {
    pub point: String,
    pub ordinal: usize,
    pub assignments: BTreeMap<String, f64>,
    pub files: ArchivedRun,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManifestSkip {
    pub point: String,
    pub ordinal: usize,
    /// Parameter whose coordinate was NaN
    pub parameter: String,
}

impl SweepManifest {
    pub fn new(label: impl Into<String>, started: jiff::Timestamp, total_points: usize) -> Self {
        Self {
            label: label.into(),
            started,
            finished: None,
            total_points,
            runs: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn record_run(&mut self, point: &SweepPoint<'_>, files: ArchivedRun) {
        self.runs.push(ManifestRun {
            point: point.label(),
            ordinal: point.ordinal,
            assignments: point
                .assignments
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
            files,
        });
    }

    pub fn record_skip(&mut self, point: &SweepPoint<'_>, parameter: &str) {
        self.skipped.push(ManifestSkip {
            point: point.label(),
            ordinal: point.ordinal,
            parameter: parameter.to_string(),
        });
    }

    pub fn finish(&mut self, at: jiff::Timestamp) {
        self.finished = Some(at);
    }
}
