#![deny(missing_docs)]
#![doc = "Caller layer for overlap reduction jobs: YAML configuration, detector resolution and reports."]

pub mod config;
pub mod run;

pub use config::{job_from_yaml, load_job, DetectorSpec, OverlapJob, SamplingConfig, SiteKey};
pub use run::{resolve_job, run_job, OverlapReport, ResolvedJob, REPORT_SCHEMA};
