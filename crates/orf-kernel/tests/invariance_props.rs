use nalgebra::{Matrix3, Rotation3, Vector3};
use orf_core::{Detector, DetectorPair, FrequencySampling};
use orf_kernel::{overlap_reduction, overlap_reduction_parallel, OverlapSeries};
use proptest::prelude::*;

fn symmetric(entries: [f64; 6]) -> Matrix3<f64> {
    let [xx, yy, zz, xy, xz, yz] = entries;
    Matrix3::new(xx, xy, xz, xy, yy, yz, xz, yz, zz)
}

fn rotate(detector: &Detector, rotation: &Rotation3<f64>) -> Detector {
    let r = rotation.matrix();
    Detector::new(rotation * detector.location, r * detector.response * r.transpose())
}

fn assert_close(a: &OverlapSeries, b: &OverlapSeries, tolerance: f64) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.values().iter().zip(b.values()) {
        assert!((x - y).abs() <= tolerance, "{x} vs {y}");
    }
}

fn tensor() -> impl Strategy<Value = Matrix3<f64>> {
    prop::array::uniform6(-1.0f64..1.0).prop_map(symmetric)
}

fn location() -> impl Strategy<Value = Vector3<f64>> {
    prop::array::uniform3(-6e6f64..6e6).prop_map(Vector3::from)
}

fn sampling() -> impl Strategy<Value = FrequencySampling> {
    (0.0f64..100.0, 0.5f64..200.0, 1usize..24)
        .prop_map(|(f0, delta_f, length)| FrequencySampling::new(f0, delta_f, length))
}

proptest! {
    #[test]
    fn invariant_under_joint_rotation(
        one in tensor(),
        two in tensor(),
        a in location(),
        b in location(),
        angles in prop::array::uniform3(-3.0f64..3.0),
        grid in sampling(),
    ) {
        let pair = DetectorPair::new(Detector::new(a, one), Detector::new(b, two));
        let rotation = Rotation3::from_euler_angles(angles[0], angles[1], angles[2]);
        let rotated = DetectorPair::new(rotate(&pair.one, &rotation), rotate(&pair.two, &rotation));
        let original = overlap_reduction(&pair, &grid).unwrap();
        let turned = overlap_reduction(&rotated, &grid).unwrap();
        assert_close(&original, &turned, 1e-9);
    }

    #[test]
    fn symmetric_under_detector_exchange(
        one in tensor(),
        two in tensor(),
        a in location(),
        b in location(),
        grid in sampling(),
    ) {
        let pair = DetectorPair::new(Detector::new(a, one), Detector::new(b, two));
        let forward = overlap_reduction(&pair, &grid).unwrap();
        let backward = overlap_reduction(&pair.swapped(), &grid).unwrap();
        assert_close(&forward, &backward, 1e-12);
    }

    #[test]
    fn repeated_and_parallel_calls_are_identical(
        one in tensor(),
        two in tensor(),
        a in location(),
        b in location(),
        grid in sampling(),
    ) {
        let pair = DetectorPair::new(Detector::new(a, one), Detector::new(b, two));
        let first = overlap_reduction(&pair, &grid).unwrap();
        let second = overlap_reduction(&pair, &grid).unwrap();
        let parallel = overlap_reduction_parallel(&pair, &grid).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &parallel);
        prop_assert!(first.values().iter().all(|value| value.is_finite()));
    }

    #[test]
    fn autocorrelation_of_interferometer_is_unity(
        angles in prop::array::uniform3(-3.0f64..3.0),
        a in location(),
        grid in sampling(),
    ) {
        let plus = Matrix3::new(0.5, 0.0, 0.0, 0.0, -0.5, 0.0, 0.0, 0.0, 0.0);
        let rotation = Rotation3::from_euler_angles(angles[0], angles[1], angles[2]);
        let detector = rotate(&Detector::new(a, plus), &rotation);
        let series = overlap_reduction(&DetectorPair::coincident(detector), &grid).unwrap();
        for gamma in series.values() {
            prop_assert!((gamma - 1.0).abs() < 1e-12);
        }
    }
}

#[test]
fn separated_series_is_bounded_and_oscillates() {
    let plus = Matrix3::new(0.5, 0.0, 0.0, 0.0, -0.5, 0.0, 0.0, 0.0, 0.0);
    let one = Detector::at_origin(plus);
    let pair = DetectorPair::new(one, one.translated_to(Vector3::new(0.0, 0.0, 5e6)));
    let series = overlap_reduction(&pair, &FrequencySampling::new(0.0, 5.0, 400)).unwrap();
    assert!(series.values().iter().all(|gamma| gamma.abs() <= 1.0 + 1e-12));
    let sign_changes = series
        .values()
        .windows(2)
        .filter(|pair| pair[0].signum() != pair[1].signum())
        .count();
    assert!(sign_changes > 10);
    // Envelope decays roughly as 1/alpha.
    let tail = series.values()[300..].iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    assert!(tail < 0.05, "tail amplitude {tail}");
}
