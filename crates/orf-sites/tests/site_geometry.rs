use orf_core::{DetectorPair, FrequencySampling, OrfError};
use orf_kernel::overlap_reduction;
use orf_sites::Site;

#[test]
fn hanford_vertex_matches_earth_fixed_coordinates() {
    let location = Site::Lho4k.detector().location;
    assert!((location.x - -2_161_414.93).abs() < 0.1, "{location}");
    assert!((location.y - -3_834_695.18).abs() < 0.1, "{location}");
    assert!((location.z - 4_600_350.23).abs() < 0.1, "{location}");
}

#[test]
fn cached_responses_are_symmetric_and_nearly_trace_free() {
    for site in Site::ALL {
        let detector = site.detector();
        assert!(detector.asymmetry() < 1e-15, "{site}");
        assert!(detector.response.trace().abs() < 1e-3, "{site}");
        let norm = detector.response.norm();
        assert!((norm - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-3, "{site}: {norm}");
    }
}

#[test]
fn hanford_livingston_overlap() {
    let pair = DetectorPair::new(Site::Lho4k.detector(), Site::Llo4k.detector());
    let series = overlap_reduction(&pair, &FrequencySampling::new(0.0, 50.0, 3)).unwrap();
    let expected = [-0.8907, -0.2005, 0.0698];
    for (gamma, want) in series.values().iter().zip(expected) {
        assert!((gamma - want).abs() < 1e-3, "{gamma} vs {want}");
    }
}

#[test]
fn static_limits_for_other_baselines() {
    let cases = [
        (Site::Lho4k, Site::Virgo, -0.0157),
        (Site::Llo4k, Site::Virgo, -0.2471),
        (Site::Lho4k, Site::Geo600, 0.4205),
    ];
    let sampling = FrequencySampling::new(0.0, 1.0, 1);
    for (one, two, want) in cases {
        let pair = DetectorPair::new(one.detector(), two.detector());
        let gamma = overlap_reduction(&pair, &sampling).unwrap().values()[0];
        assert!((gamma - want).abs() < 1e-3, "{one}-{two}: {gamma}");
    }
}

#[test]
fn unknown_sites_are_invalid_references() {
    let err = Site::from_index(5).unwrap_err();
    assert!(matches!(err, OrfError::InvalidReference(_)));
    assert_eq!(err.info().code, "unknown-site-index");
    assert_eq!(err.info().context.get("index").map(String::as_str), Some("5"));

    let err = "K1".parse::<Site>().unwrap_err();
    assert!(matches!(err, OrfError::InvalidReference(_)));
    assert_eq!(err.info().code, "unknown-site");
}

#[test]
fn site_serializes_in_kebab_case() {
    let json = serde_json::to_string(&Site::Geo600).unwrap();
    assert_eq!(json, "\"geo600\"");
    let back: Site = serde_json::from_str("\"lho4k\"").unwrap();
    assert_eq!(back, Site::Lho4k);
}

#[test]
fn frame_carries_only_geometry_used_by_the_response() {
    let frame = Site::Virgo.frame();
    let value = serde_json::to_value(&frame).unwrap();
    let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        [
            "name",
            "prefix",
            "vertex_elevation",
            "vertex_latitude",
            "vertex_longitude",
            "x_arm_altitude",
            "x_arm_azimuth",
            "y_arm_altitude",
            "y_arm_azimuth",
        ]
    );
    let back: orf_sites::FrameDetector = serde_json::from_value(value).unwrap();
    assert_eq!(orf_sites::detector_from_frame(&back), Site::Virgo.detector());
}
