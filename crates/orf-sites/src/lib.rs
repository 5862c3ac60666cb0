#![deny(missing_docs)]
#![doc = "Cached ground-based interferometer sites and their geodetic conversion to ORF detectors."]

pub mod catalog;
pub mod geodetic;

pub use catalog::Site;
pub use geodetic::{detector_from_frame, FrameDetector, WGS84_SEMI_MAJOR, WGS84_SEMI_MINOR};
