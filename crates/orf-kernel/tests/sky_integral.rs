//! Compares the closed form against a direct quadrature of
//! `gamma = 5/(8 pi) sum_A int dOmega cos(2 pi f Omega.dx / c) F1_A F2_A`.

use std::f64::consts::PI;

use nalgebra::{Matrix3, Vector3};
use orf_core::{Detector, DetectorPair, FrequencySampling, SPEED_OF_LIGHT};
use orf_kernel::overlap_reduction;

/// Gauss-Legendre nodes and weights on [-1, 1].
fn gauss_legendre(n: usize) -> Vec<(f64, f64)> {
    let legendre = |x: f64| {
        let (mut p0, mut p1) = (1.0, x);
        for k in 2..=n {
            let k = k as f64;
            let p2 = ((2.0 * k - 1.0) * x * p1 - (k - 1.0) * p0) / k;
            p0 = p1;
            p1 = p2;
        }
        let derivative = n as f64 * (x * p1 - p0) / (x * x - 1.0);
        (p1, derivative)
    };
    (1..=n)
        .map(|i| {
            let mut x = (PI * (i as f64 - 0.25) / (n as f64 + 0.5)).cos();
            for _ in 0..100 {
                let (p, dp) = legendre(x);
                let step = p / dp;
                x -= step;
                if step.abs() < 1e-15 {
                    break;
                }
            }
            let (_, dp) = legendre(x);
            (x, 2.0 / ((1.0 - x * x) * dp * dp))
        })
        .collect()
}

fn sky_integral(pair: &DetectorPair, frequency: f64) -> f64 {
    let separation = pair.separation();
    let azimuths = 96;
    let mut total = 0.0;
    for (cos_theta, weight) in gauss_legendre(48) {
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
        for step in 0..azimuths {
            let phi = step as f64 * 2.0 * PI / azimuths as f64;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let omega = Vector3::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta);
            let m = Vector3::new(cos_theta * cos_phi, cos_theta * sin_phi, -sin_theta);
            let n = Vector3::new(-sin_phi, cos_phi, 0.0);
            let plus = m * m.transpose() - n * n.transpose();
            let cross = m * n.transpose() + n * m.transpose();
            let phase = (2.0 * PI * frequency * omega.dot(&separation) / SPEED_OF_LIGHT).cos();
            for polarization in [plus, cross] {
                let f1 = pair.one.response.component_mul(&polarization).sum();
                let f2 = pair.two.response.component_mul(&polarization).sum();
                total += weight * phase * f1 * f2;
            }
        }
    }
    5.0 / (8.0 * PI) * total * 2.0 * PI / azimuths as f64
}

fn generic_pair() -> DetectorPair {
    // Deliberately not trace free.
    let one = Matrix3::new(1.0, 0.2, -0.3, 0.2, 0.4, 0.1, -0.3, 0.1, 0.7);
    let two = Matrix3::new(-0.2, 0.5, 0.0, 0.5, 0.3, 0.6, 0.0, 0.6, 1.1);
    DetectorPair::new(
        Detector::at_origin(one),
        Detector::new(Vector3::new(1.2e6, -2.5e6, 3.1e6), two),
    )
}

#[test]
fn closed_form_matches_quadrature_for_generic_tensors() {
    let pair = generic_pair();
    let sampling = FrequencySampling::new(0.0, 25.0, 8);
    let series = overlap_reduction(&pair, &sampling).expect("overlap");
    for (frequency, gamma) in series.iter() {
        let reference = sky_integral(&pair, frequency);
        assert!(
            (gamma - reference).abs() < 1e-9,
            "f={frequency}: closed {gamma} vs quadrature {reference}"
        );
    }
}

#[test]
fn coincident_limit_is_the_sky_average() {
    let moved = generic_pair();
    let pair = DetectorPair::new(moved.one, moved.two.translated_to(Vector3::zeros()));
    let sampling = FrequencySampling::new(10.0, 100.0, 4);
    let series = overlap_reduction(&pair, &sampling).expect("overlap");
    let reference = sky_integral(&pair, 0.0);
    for gamma in series.values() {
        assert!((gamma - reference).abs() < 1e-9);
    }
}
