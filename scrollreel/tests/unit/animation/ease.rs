use super::*;

const CSS_SNAP: Ease = Ease::CubicBezier {
    x1: 0.16,
    y1: 1.0,
    x2: 0.3,
    y2: 1.0,
};

fn all() -> [Ease; 10] {
    [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InExpo,
        Ease::OutExpo,
        CSS_SNAP,
    ]
}

#[test]
fn endpoints_are_stable() {
    for ease in all() {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in all() {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a <= b, "{ease:?}");
        assert!(b <= c, "{ease:?}");
    }
}

#[test]
fn out_quad_matches_t_times_two_minus_t() {
    for t in [0.1, 0.3, 0.6, 0.9] {
        assert!((Ease::OutQuad.apply(t) - t * (2.0 - t)).abs() < 1e-12);
    }
}

#[test]
fn in_expo_matches_closed_form() {
    assert!((Ease::InExpo.apply(0.5) - 2f64.powf(-5.0)).abs() < 1e-12);
}

#[test]
fn linear_bezier_is_identity() {
    let lin = Ease::CubicBezier {
        x1: 0.25,
        y1: 0.25,
        x2: 0.75,
        y2: 0.75,
    };
    for t in [0.1, 0.33, 0.5, 0.8] {
        assert!((lin.apply(t) - t).abs() < 1e-6);
    }
}

#[test]
fn snap_bezier_front_loads_progress() {
    assert!(CSS_SNAP.apply(0.2) > 0.6);
}

#[test]
fn input_outside_unit_interval_is_clamped() {
    for ease in all() {
        assert_eq!(ease.apply(-1.0), 0.0);
        assert!((ease.apply(2.0) - 1.0).abs() < 1e-12);
        assert_eq!(ease.apply(f64::NAN), 0.0);
    }
}

#[test]
fn validate_rejects_out_of_range_bezier() {
    assert!(CSS_SNAP.validate().is_ok());
    let bad = Ease::CubicBezier {
        x1: 0.2,
        y1: 1.6,
        x2: 0.3,
        y2: 1.0,
    };
    assert!(bad.validate().is_err());
    assert!(Ease::Linear.validate().is_ok());
}

#[test]
fn serde_uses_variant_names() {
    let json = serde_json::to_string(&Ease::OutCubic).unwrap();
    assert_eq!(json, "\"OutCubic\"");
    let json = r#"{"CubicBezier":{"x1":0.16,"y1":1.0,"x2":0.3,"y2":1.0}}"#;
    let back: Ease = serde_json::from_str(json).unwrap();
    assert_eq!(back, CSS_SNAP);
}
