//! Resolution and execution of overlap reduction jobs.

use std::collections::BTreeMap;

use nalgebra::{Matrix3, Vector3};
use orf_core::{
    stable_hash_string, to_canonical_json_bytes, Detector, DetectorPair, ErrorInfo,
    FrequencySampling, JobProvenance, OrfError, SchemaVersion,
};
use orf_kernel::{overlap_reduction, overlap_reduction_parallel, OverlapSeries};
use orf_sites::Site;
use serde::{Deserialize, Serialize};

use crate::config::{DetectorSpec, OverlapJob, SiteKey};

/// Schema version of [`OverlapReport`] payloads.
pub const REPORT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// A job whose references have all been resolved to concrete inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedJob {
    /// Detector pair to correlate.
    pub pair: DetectorPair,
    /// Frequency grid.
    pub sampling: FrequencySampling,
    /// Labels of the two detectors when known.
    pub labels: [Option<String>; 2],
}

/// Result of running a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapReport {
    /// Payload schema version.
    pub schema: SchemaVersion,
    /// Inputs hash and tool versions.
    pub provenance: JobProvenance,
    /// Computed overlap reduction function.
    pub series: OverlapSeries,
}

impl OverlapReport {
    /// Canonical JSON encoding of the report.
    pub fn to_canonical_json(&self) -> Result<Vec<u8>, OrfError> {
        to_canonical_json_bytes(self)
    }
}

#[derive(Serialize)]
struct HashedInputs<'a> {
    pair: &'a DetectorPair,
    sampling: &'a FrequencySampling,
}

fn missing(field: &str) -> OrfError {
    OrfError::InvalidReference(
        ErrorInfo::new("missing-input", format!("job does not define `{field}`"))
            .with_context("field", field),
    )
}

fn resolve_site(key: &SiteKey) -> Result<Site, OrfError> {
    match key {
        SiteKey::Index(index) => Site::from_index(*index),
        SiteKey::Name(name) => name.parse(),
    }
}

fn resolve_detector(
    field: &str,
    spec: Option<&DetectorSpec>,
) -> Result<(Detector, Option<String>), OrfError> {
    match spec.ok_or_else(|| missing(field))? {
        DetectorSpec::Site { site } => {
            let site = resolve_site(site).map_err(|err| match err {
                OrfError::InvalidReference(info) => {
                    OrfError::InvalidReference(info.with_context("field", field))
                }
                other => other,
            })?;
            log::debug!("detector {field} resolved to site {site}");
            Ok((site.detector(), Some(site.prefix().to_string())))
        }
        DetectorSpec::Explicit {
            location,
            response,
            label,
        } => {
            let location = Vector3::from(*location);
            let response = Matrix3::from_fn(|row, column| response[row][column]);
            Ok((Detector::new(location, response), label.clone()))
        }
    }
}

/// Resolves site references and checks that every input is present.
///
/// Sampling values themselves are validated by the kernel.
pub fn resolve_job(job: &OverlapJob) -> Result<ResolvedJob, OrfError> {
    let (one, one_label) = resolve_detector("one", job.one.as_ref())?;
    let (two, two_label) = resolve_detector("two", job.two.as_ref())?;
    let sampling = job.sampling.ok_or_else(|| missing("sampling"))?;
    Ok(ResolvedJob {
        pair: DetectorPair::new(one, two),
        sampling: FrequencySampling::new(sampling.f0, sampling.delta_f, sampling.length),
        labels: [one_label, two_label],
    })
}

/// Runs a job and wraps the series in a report with provenance.
///
/// The report depends only on the job contents, so running the same job
/// twice yields identical reports.
pub fn run_job(job: &OverlapJob) -> Result<OverlapReport, OrfError> {
    let resolved = resolve_job(job)?;
    let input_hash = stable_hash_string(&HashedInputs {
        pair: &resolved.pair,
        sampling: &resolved.sampling,
    })?;
    log::info!(
        "computing {} bins for {:?} (inputs {})",
        resolved.sampling.length,
        resolved.labels,
        input_hash
    );
    let series = if job.parallel {
        overlap_reduction_parallel(&resolved.pair, &resolved.sampling)?
    } else {
        overlap_reduction(&resolved.pair, &resolved.sampling)?
    };
    let mut tool_versions = BTreeMap::new();
    tool_versions.insert(
        env!("CARGO_PKG_NAME").to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    );
    Ok(OverlapReport {
        schema: REPORT_SCHEMA,
        provenance: JobProvenance {
            input_hash,
            labels: resolved.labels,
            tool_versions,
        },
        series,
    })
}
