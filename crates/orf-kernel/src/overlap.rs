//! Overlap reduction function of a detector pair.
//!
//! For an isotropic, unpolarized background the sky integral defining
//! `gamma(f)` reduces to
//!
//! ```text
//! gamma = rho1(a) D1:D2 + rho2(a) s.D1.D2.s + rho3(a) (s.D1.s)(s.D2.s)
//! ```
//!
//! with `a = 2 pi f |dx| / c`, `s = dx / |dx|`, `D` the trace-free response
//! tensors and `rho` fixed combinations of `j_n(a) / a^n` for `n = 0, 1, 2`.
//! The normalization makes `gamma = 1` for coincident, coaligned
//! interferometers.

use std::f64::consts::PI;

use nalgebra::Unit;
use orf_core::{Detector, DetectorPair, ErrorInfo, FrequencySampling, OrfError, SPEED_OF_LIGHT};
use rayon::prelude::*;

use crate::bessel::reduced_triple;
use crate::invariants::{invariants, TraceFreeInvariants};
use crate::series::OverlapSeries;

/// Largest tolerated `|T_ij - T_ji|`, relative to the largest entry of `T`
/// when that exceeds one.
pub const SYMMETRY_TOLERANCE: f64 = 1e-6;

/// `rho1(0)`: sky average weight of `D1:D2` for coincident detectors.
pub const COINCIDENT_WEIGHT: f64 = 2.0;

/// Multipole weights `[rho1, rho2, rho3]` at Bessel argument `alpha`.
///
/// At `alpha = 0` these are `[2, 0, 0]`.
pub fn multipole_weights(alpha: f64) -> [f64; 3] {
    let [r0, r1, r2] = reduced_triple(alpha);
    [
        5.0 * r0 - 10.0 * r1 + 5.0 * r2,
        -10.0 * r0 + 40.0 * r1 - 50.0 * r2,
        2.5 * r0 - 25.0 * r1 + 87.5 * r2,
    ]
}

/// Bessel argument `2 pi f d / c` for a frequency in Hz and a distance in metres.
pub fn bessel_argument(frequency: f64, distance: f64) -> f64 {
    2.0 * PI * frequency * distance / SPEED_OF_LIGHT
}

/// Upper bound on `|rho1| + |rho2| + |rho3|` over all arguments, from
/// `|j_n(x) / x^n| <= 1 / (2n + 1)!!`.
const MULTIPOLE_BOUND: f64 = 27.0;

/// Frequency independent part of the computation, prepared once per call.
#[derive(Debug, Clone, Copy)]
struct PreparedPair {
    distance: f64,
    invariants: TraceFreeInvariants,
}

impl PreparedPair {
    /// Fails when the separation, the invariants or the largest Bessel
    /// argument of the grid overflow.
    fn new(pair: &DetectorPair, sampling: &FrequencySampling) -> Result<Self, ErrorInfo> {
        let separation = pair.separation();
        let distance = separation.norm();
        if !distance.is_finite() {
            return Err(ErrorInfo::new("non-finite-separation", "detector separation overflows")
                .with_context("distance", distance.to_string()));
        }
        let direction = Unit::try_new(separation, 0.0);
        let invariants =
            invariants(&pair.one.response, &pair.two.response, direction.as_ref()).trace_free();
        let magnitude = invariants.contraction.abs()
            + invariants.cross.map_or(0.0, f64::abs)
            + invariants.along_product.map_or(0.0, f64::abs);
        if !(MULTIPOLE_BOUND * magnitude).is_finite() {
            return Err(ErrorInfo::new("non-finite-invariants", "tensor invariants overflow")
                .with_context("magnitude", magnitude.to_string()));
        }
        let top = sampling.frequency(sampling.length - 1);
        let alpha = bessel_argument(top, distance);
        if !alpha.is_finite() {
            return Err(ErrorInfo::new("non-finite-phase", "Bessel argument overflows")
                .with_context("frequency", top.to_string())
                .with_context("distance", distance.to_string()));
        }
        Ok(Self {
            distance,
            invariants,
        })
    }

    fn evaluate(&self, frequency: f64) -> f64 {
        let tf = &self.invariants;
        match (tf.cross, tf.along_product) {
            (Some(cross), Some(along_product)) => {
                let [rho1, rho2, rho3] =
                    multipole_weights(bessel_argument(frequency, self.distance));
                rho1 * tf.contraction + rho2 * cross + rho3 * along_product
            }
            // No phase term: the result does not depend on frequency.
            _ => COINCIDENT_WEIGHT * tf.contraction,
        }
    }
}

fn check_symmetric(label: &str, detector: &Detector) -> Result<(), OrfError> {
    if !detector.has_finite_response() {
        return Err(OrfError::AsymmetricTensor(
            ErrorInfo::new(
                "non-finite-response",
                "response tensor has a non-finite entry, symmetry is undefined",
            )
            .with_context("detector", label),
        ));
    }
    let asymmetry = detector.asymmetry();
    let tolerance = SYMMETRY_TOLERANCE * detector.response_scale().max(1.0);
    if !(asymmetry <= tolerance) {
        return Err(OrfError::AsymmetricTensor(
            ErrorInfo::new("asymmetric-response", "response tensor is not symmetric")
                .with_context("detector", label)
                .with_context("asymmetry", asymmetry.to_string())
                .with_context("tolerance", tolerance.to_string()),
        ));
    }
    Ok(())
}

fn check_location(label: &str, detector: &Detector) -> Result<(), OrfError> {
    if !detector.has_finite_location() {
        return Err(OrfError::NonFiniteInput(
            ErrorInfo::new("non-finite-location", "detector location must be finite")
                .with_context("detector", label)
                .with_context("location", format!("{:?}", detector.location.as_slice())),
        ));
    }
    Ok(())
}

/// Runs every input check and prepares the frequency independent terms.
fn prepare(
    pair: &DetectorPair,
    sampling: &FrequencySampling,
    output_len: Option<usize>,
) -> Result<PreparedPair, OrfError> {
    sampling.validate()?;
    if let Some(actual) = output_len {
        if actual != sampling.length {
            return Err(OrfError::LengthMismatch(
                ErrorInfo::new(
                    "output-length-mismatch",
                    "output storage length differs from the requested length",
                )
                .with_context("expected", sampling.length.to_string())
                .with_context("actual", actual.to_string()),
            ));
        }
    }
    check_symmetric("one", &pair.one)?;
    check_symmetric("two", &pair.two)?;
    check_location("one", &pair.one)?;
    check_location("two", &pair.two)?;
    PreparedPair::new(pair, sampling).map_err(OrfError::NonFiniteInput)
}

/// Computes the overlap reduction function on the requested frequency grid.
///
/// Inputs are validated in a fixed order (length, spacing, start frequency,
/// tensor symmetry, finite geometry) and the first failure is returned.
pub fn overlap_reduction(
    pair: &DetectorPair,
    sampling: &FrequencySampling,
) -> Result<OverlapSeries, OrfError> {
    let prepared = prepare(pair, sampling, None)?;
    let values = sampling
        .frequencies()
        .map(|frequency| prepared.evaluate(frequency))
        .collect();
    Ok(OverlapSeries::new(*sampling, values))
}

/// Fills caller supplied storage with the overlap reduction function.
///
/// `out` must hold exactly `sampling.length` values; a mismatch is reported
/// after the sampling checks and before the symmetry checks. On error `out`
/// is left untouched.
pub fn overlap_reduction_into(
    pair: &DetectorPair,
    sampling: &FrequencySampling,
    out: &mut [f64],
) -> Result<(), OrfError> {
    let prepared = prepare(pair, sampling, Some(out.len()))?;
    for (index, slot) in out.iter_mut().enumerate() {
        *slot = prepared.evaluate(sampling.frequency(index));
    }
    Ok(())
}

/// Same as [`overlap_reduction`] with frequency bins evaluated in parallel.
///
/// Every bin is computed independently, so the output is identical to the
/// serial version.
pub fn overlap_reduction_parallel(
    pair: &DetectorPair,
    sampling: &FrequencySampling,
) -> Result<OverlapSeries, OrfError> {
    let prepared = prepare(pair, sampling, None)?;
    let mut values = vec![0.0; sampling.length];
    values
        .par_iter_mut()
        .enumerate()
        .for_each(|(index, slot)| *slot = prepared.evaluate(sampling.frequency(index)));
    Ok(OverlapSeries::new(*sampling, values))
}
