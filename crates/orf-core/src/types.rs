use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, OrfError};

/// Geometric description of a single gravitational-wave detector.
///
/// `location` is the detector vertex in metres in an Earth-fixed frame shared
/// by both detectors of a pair. `response` is the dimensionless detector
/// response tensor; it must be symmetric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detector {
    /// Vertex position in metres.
    pub location: Vector3<f64>,
    /// Symmetric response tensor.
    pub response: Matrix3<f64>,
}

impl Detector {
    /// Creates a detector from its vertex position and response tensor.
    pub fn new(location: Vector3<f64>, response: Matrix3<f64>) -> Self {
        Self { location, response }
    }

    /// Creates a detector located at the origin of the frame.
    pub fn at_origin(response: Matrix3<f64>) -> Self {
        Self::new(Vector3::zeros(), response)
    }

    /// Returns a copy of the detector moved to `location`.
    pub fn translated_to(&self, location: Vector3<f64>) -> Self {
        Self::new(location, self.response)
    }

    /// Largest absolute difference between mirrored off-diagonal entries.
    ///
    /// Returns NaN when any entry of the tensor is NaN or infinite, since
    /// symmetry cannot be established for such a tensor.
    pub fn asymmetry(&self) -> f64 {
        let t = &self.response;
        if !self.has_finite_response() {
            return f64::NAN;
        }
        let mut worst = 0.0_f64;
        for i in 0..3 {
            for j in (i + 1)..3 {
                worst = worst.max((t[(i, j)] - t[(j, i)]).abs());
            }
        }
        worst
    }

    /// True when every entry of the response tensor is finite.
    pub fn has_finite_response(&self) -> bool {
        self.response.iter().all(|entry| entry.is_finite())
    }

    /// True when every coordinate of the vertex is finite.
    pub fn has_finite_location(&self) -> bool {
        self.location.iter().all(|coordinate| coordinate.is_finite())
    }

    /// Largest absolute entry of the response tensor.
    pub fn response_scale(&self) -> f64 {
        self.response.amax()
    }
}

/// The two detectors whose cross-correlation is being weighted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorPair {
    /// First detector.
    pub one: Detector,
    /// Second detector.
    pub two: Detector,
}

impl DetectorPair {
    /// Creates a pair from two detectors.
    pub fn new(one: Detector, two: Detector) -> Self {
        Self { one, two }
    }

    /// A pair made of two copies of the same detector.
    pub fn coincident(detector: Detector) -> Self {
        Self::new(detector, detector)
    }

    /// Separation vector pointing from detector one to detector two.
    pub fn separation(&self) -> Vector3<f64> {
        self.two.location - self.one.location
    }

    /// The same pair with the roles of the detectors exchanged.
    pub fn swapped(&self) -> Self {
        Self::new(self.two, self.one)
    }
}

/// Uniform frequency grid `f0 + i * delta_f` for `i` in `0..length`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencySampling {
    /// Start frequency in Hz.
    pub f0: f64,
    /// Frequency spacing in Hz.
    pub delta_f: f64,
    /// Number of frequency bins.
    pub length: usize,
}

impl FrequencySampling {
    /// Creates a sampling descriptor without validating it.
    pub fn new(f0: f64, delta_f: f64, length: usize) -> Self {
        Self {
            f0,
            delta_f,
            length,
        }
    }

    /// Frequency of bin `index` in Hz.
    pub fn frequency(&self, index: usize) -> f64 {
        self.f0 + index as f64 * self.delta_f
    }

    /// Iterator over every frequency of the grid.
    pub fn frequencies(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        (0..self.length).map(move |index| self.frequency(index))
    }

    /// Checks length, spacing and start frequency, in that order.
    ///
    /// Spacing and start frequency must also be finite, and so must the
    /// highest frequency of the grid.
    pub fn validate(&self) -> Result<(), OrfError> {
        if self.length == 0 {
            return Err(OrfError::ZeroLength(
                ErrorInfo::new("zero-length", "frequency series must have at least one bin")
                    .with_context("length", "0"),
            ));
        }
        // NaN fails both comparisons below.
        if !(self.delta_f > 0.0) {
            return Err(OrfError::NonPositiveSpacing(
                ErrorInfo::new("non-positive-delta-f", "frequency spacing must be positive")
                    .with_context("delta_f", self.delta_f.to_string()),
            ));
        }
        if !self.delta_f.is_finite() {
            return Err(OrfError::NonPositiveSpacing(
                ErrorInfo::new("non-finite-delta-f", "frequency spacing must be finite")
                    .with_context("delta_f", self.delta_f.to_string()),
            ));
        }
        if !(self.f0 >= 0.0) {
            return Err(OrfError::NegativeStartFrequency(
                ErrorInfo::new("negative-f0", "start frequency must be non-negative")
                    .with_context("f0", self.f0.to_string()),
            ));
        }
        if !self.f0.is_finite() {
            return Err(OrfError::NegativeStartFrequency(
                ErrorInfo::new("non-finite-f0", "start frequency must be finite")
                    .with_context("f0", self.f0.to_string()),
            ));
        }
        let highest = self.frequency(self.length - 1);
        if !highest.is_finite() {
            return Err(OrfError::NonPositiveSpacing(
                ErrorInfo::new("non-finite-grid", "highest grid frequency overflows")
                    .with_context("delta_f", self.delta_f.to_string())
                    .with_context("length", self.length.to_string()),
            ));
        }
        Ok(())
    }
}
