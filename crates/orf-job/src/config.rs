//! Job file schema and loading.

use std::fs;
use std::path::Path;

use orf_core::{ErrorInfo, OrfError};
use serde::{Deserialize, Serialize};

/// YAML-configurable description of a single overlap reduction job.
///
/// Detectors and sampling are optional at parse time so that an incomplete
/// job file is reported as a missing reference when the job is resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct OverlapJob {
    /// First detector of the pair.
    #[serde(default)]
    pub one: Option<DetectorSpec>,
    /// Second detector of the pair.
    #[serde(default)]
    pub two: Option<DetectorSpec>,
    /// Frequency grid to evaluate on.
    #[serde(default)]
    pub sampling: Option<SamplingConfig>,
    /// Evaluate frequency bins on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
}

/// How a detector is referenced in a job file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetectorSpec {
    /// A cached site, by prefix, name or catalogue index.
    Site {
        /// Site reference.
        site: SiteKey,
    },
    /// Explicit Earth-fixed geometry.
    Explicit {
        /// Vertex location in metres.
        location: [f64; 3],
        /// Response tensor, row major.
        response: [[f64; 3]; 3],
        /// Optional label carried into the report provenance.
        #[serde(default)]
        label: Option<String>,
    },
}

/// Site reference accepted in job files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SiteKey {
    /// Catalogue index.
    Index(usize),
    /// Prefix (`H1`) or site name (`LHO_4k`).
    Name(String),
}

/// Uniform frequency grid settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplingConfig {
    /// Start frequency in Hz.
    #[serde(default = "default_f0")]
    pub f0: f64,
    /// Frequency spacing in Hz.
    pub delta_f: f64,
    /// Number of bins.
    pub length: usize,
}

fn default_f0() -> f64 {
    0.0
}

fn config_error(code: &str, message: impl Into<String>) -> OrfError {
    OrfError::Config(ErrorInfo::new(code, message))
}

/// Parses a job from YAML text.
pub fn job_from_yaml(text: &str) -> Result<OverlapJob, OrfError> {
    serde_yaml::from_str(text).map_err(|err| {
        let error = ErrorInfo::new("job-parse", err.to_string());
        let error = match err.location() {
            Some(location) => error
                .with_context("line", location.line().to_string())
                .with_context("column", location.column().to_string()),
            None => error,
        };
        OrfError::Config(error)
    })
}

/// Reads and parses a job file.
pub fn load_job(path: &Path) -> Result<OverlapJob, OrfError> {
    log::info!("Loading {:?}...", path);
    let text = fs::read_to_string(path).map_err(|err| {
        OrfError::Config(
            ErrorInfo::new("job-read", format!("failed to read job file: {err}"))
                .with_context("path", path.display().to_string()),
        )
    })?;
    job_from_yaml(&text).map_err(|err| match err {
        OrfError::Config(info) => {
            OrfError::Config(info.with_context("path", path.display().to_string()))
        }
        other => other,
    })
}

impl OverlapJob {
    /// Serializes the job back to YAML.
    pub fn to_yaml(&self) -> Result<String, OrfError> {
        serde_yaml::to_string(self).map_err(|err| config_error("job-serialize", err.to_string()))
    }
}
