//! Spherical Bessel functions of the first kind, orders 0 through 2.
//!
//! Above [`SERIES_THRESHOLD`] the closed trigonometric forms are used. Below
//! it the closed forms lose most of their digits to cancellation, so a short
//! power series is summed instead; the series also yields the finite limits
//! at `x = 0` without dividing by zero.

use serde::{Deserialize, Serialize};

/// Arguments with `|x|` below this value are evaluated from the power series.
pub const SERIES_THRESHOLD: f64 = 0.5;

const SERIES_TERMS: usize = 6;

/// Supported orders of the spherical Bessel function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BesselOrder {
    /// `j0(x) = sin x / x`.
    Zero,
    /// `j1(x) = sin x / x^2 - cos x / x`.
    One,
    /// `j2(x) = (3 / x^2 - 1) sin x / x - 3 cos x / x^2`.
    Two,
}

impl BesselOrder {
    /// All supported orders, lowest first.
    pub const ALL: [BesselOrder; 3] = [BesselOrder::Zero, BesselOrder::One, BesselOrder::Two];

    /// Integer order `n`.
    pub fn degree(self) -> u32 {
        match self {
            BesselOrder::Zero => 0,
            BesselOrder::One => 1,
            BesselOrder::Two => 2,
        }
    }

    /// Double factorial `(2n + 1)!!`, the limit of `x^n / j_n(x)` at zero.
    fn double_factorial(self) -> f64 {
        match self {
            BesselOrder::Zero => 1.0,
            BesselOrder::One => 3.0,
            BesselOrder::Two => 15.0,
        }
    }
}

/// Evaluates `j_n(x)`.
///
/// At `x = 0` this returns the removable-singularity limits `1`, `0`, `0`.
pub fn spherical_bessel(order: BesselOrder, x: f64) -> f64 {
    if x.abs() < SERIES_THRESHOLD {
        return reduced_series(order, x) * x.powi(order.degree() as i32);
    }
    let (s, c) = x.sin_cos();
    match order {
        BesselOrder::Zero => s / x,
        BesselOrder::One => s / (x * x) - c / x,
        BesselOrder::Two => (3.0 / (x * x) - 1.0) * s / x - 3.0 * c / (x * x),
    }
}

/// Evaluates `j_n(x) / x^n`, which stays finite at `x = 0`.
///
/// The limits at zero are `1`, `1/3` and `1/15`.
pub fn reduced_spherical_bessel(order: BesselOrder, x: f64) -> f64 {
    if x.abs() < SERIES_THRESHOLD {
        return reduced_series(order, x);
    }
    spherical_bessel(order, x) / x.powi(order.degree() as i32)
}

/// The reduced functions `[j0, j1 / x, j2 / x^2]` at a single argument.
pub fn reduced_triple(x: f64) -> [f64; 3] {
    BesselOrder::ALL.map(|order| reduced_spherical_bessel(order, x))
}

// j_n(x) / x^n = 1/(2n+1)!! * sum_k (-x^2/2)^k / (k! (2n+3)(2n+5)...(2n+2k+1))
fn reduced_series(order: BesselOrder, x: f64) -> f64 {
    let half_square = -0.5 * x * x;
    let n = order.degree() as f64;
    let mut term = 1.0;
    let mut sum = 1.0;
    for k in 1..SERIES_TERMS {
        let k = k as f64;
        term *= half_square / (k * (2.0 * n + 2.0 * k + 1.0));
        sum += term;
    }
    sum / order.double_factorial()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_at_zero() {
        assert_eq!(spherical_bessel(BesselOrder::Zero, 0.0), 1.0);
        assert_eq!(spherical_bessel(BesselOrder::One, 0.0), 0.0);
        assert_eq!(spherical_bessel(BesselOrder::Two, 0.0), 0.0);
        assert_eq!(reduced_triple(0.0), [1.0, 1.0 / 3.0, 1.0 / 15.0]);
    }

    #[test]
    fn series_and_closed_form_agree_at_threshold() {
        for order in BesselOrder::ALL {
            let below = reduced_series(order, SERIES_THRESHOLD);
            let above = reduced_spherical_bessel(order, SERIES_THRESHOLD);
            assert!(
                (below - above).abs() < 1e-12,
                "{order:?}: series {below} vs closed {above}"
            );
        }
    }

    #[test]
    fn parity_follows_order() {
        for x in [0.2, 3.7] {
            for order in BesselOrder::ALL {
                let sign = if order.degree() % 2 == 0 { 1.0 } else { -1.0 };
                let flipped = spherical_bessel(order, -x);
                let expected = sign * spherical_bessel(order, x);
                assert!((flipped - expected).abs() < 1e-15, "{order:?} at {x}");
            }
        }
    }
}
