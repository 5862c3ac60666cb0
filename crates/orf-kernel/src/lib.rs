#![deny(missing_docs)]
#![doc = "Overlap reduction function between two gravitational-wave detectors."]

pub mod bessel;
pub mod invariants;
pub mod overlap;
mod series;

pub use bessel::{reduced_spherical_bessel, spherical_bessel, BesselOrder};
pub use invariants::{invariants, DirectionalInvariants, TensorInvariants, TraceFreeInvariants};
pub use overlap::{
    bessel_argument, multipole_weights, overlap_reduction, overlap_reduction_into,
    overlap_reduction_parallel, COINCIDENT_WEIGHT, SYMMETRY_TOLERANCE,
};
pub use series::OverlapSeries;
