#![deny(missing_docs)]
#![doc = "Core data model and error taxonomy for overlap reduction function computations."]

pub mod canonical;
pub mod errors;
pub mod provenance;
mod types;

pub use canonical::{from_json_slice, stable_hash_string, to_canonical_json_bytes};
pub use errors::{ErrorInfo, OrfError};
pub use provenance::{JobProvenance, SchemaVersion};
pub use types::{Detector, DetectorPair, FrequencySampling};

/// Speed of light in vacuum, m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;
