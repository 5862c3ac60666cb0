//! Rotational invariants of a pair of response tensors and a unit direction.
//!
//! The overlap reduction function of two detectors is a scalar under joint
//! rotations of both tensors and the separation. Its multipole form only
//! needs the five invariants bilinear in the two tensors and even in the
//! direction `s`:
//!
//! | invariant       | definition                           |
//! |-----------------|--------------------------------------|
//! | `contraction`   | `d1:d2`                              |
//! | `trace_product` | `tr d1 * tr d2`                      |
//! | `cross`         | `s.d1.d2.s`                          |
//! | `along_product` | `(s.d1.s)(s.d2.s)`                   |
//! | `mixed_trace`   | `tr d1 (s.d2.s) + tr d2 (s.d1.s)`    |
//!
//! The last three need a direction and are absent for coincident detectors.

use nalgebra::{Matrix3, Unit, Vector3};
use serde::{Deserialize, Serialize};

/// Invariants that depend on the separation direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalInvariants {
    /// `s.d1.d2.s`.
    pub cross: f64,
    /// `(s.d1.s)(s.d2.s)`.
    pub along_product: f64,
    /// `tr d1 (s.d2.s) + tr d2 (s.d1.s)`.
    pub mixed_trace: f64,
}

/// The full invariant set of a detector pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TensorInvariants {
    /// `d1:d2`, the full double contraction.
    pub contraction: f64,
    /// `tr d1 * tr d2`.
    pub trace_product: f64,
    /// `None` when the separation direction is undefined.
    pub directional: Option<DirectionalInvariants>,
}

/// Invariants of the trace-free parts `D = d - (tr d / 3) I`.
///
/// Only the trace-free part of a response tensor couples to a transverse
/// traceless wave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceFreeInvariants {
    /// `D1:D2`.
    pub contraction: f64,
    /// `s.D1.D2.s`, when a direction exists.
    pub cross: Option<f64>,
    /// `(s.D1.s)(s.D2.s)`, when a direction exists.
    pub along_product: Option<f64>,
}

/// Computes the invariant set for two response tensors.
///
/// `direction` must be a unit vector or `None` for zero separation.
pub fn invariants(
    one: &Matrix3<f64>,
    two: &Matrix3<f64>,
    direction: Option<&Unit<Vector3<f64>>>,
) -> TensorInvariants {
    let trace_one = one.trace();
    let trace_two = two.trace();
    let directional = direction.map(|s| {
        let s = s.into_inner();
        let one_s = one * s;
        let two_s = two * s;
        let along_one = s.dot(&one_s);
        let along_two = s.dot(&two_s);
        DirectionalInvariants {
            cross: one_s.dot(&two_s),
            along_product: along_one * along_two,
            mixed_trace: trace_one * along_two + trace_two * along_one,
        }
    });
    TensorInvariants {
        contraction: one.component_mul(two).sum(),
        trace_product: trace_one * trace_two,
        directional,
    }
}

impl TensorInvariants {
    /// Maps the invariants onto those of the trace-free tensors.
    pub fn trace_free(&self) -> TraceFreeInvariants {
        let traces = self.trace_product;
        let directional = self.directional.map(|d| {
            (
                d.cross - d.mixed_trace / 3.0 + traces / 9.0,
                d.along_product - d.mixed_trace / 3.0 + traces / 9.0,
            )
        });
        TraceFreeInvariants {
            contraction: self.contraction - traces / 3.0,
            cross: directional.map(|(cross, _)| cross),
            along_product: directional.map(|(_, along)| along),
        }
    }
}
