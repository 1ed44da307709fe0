use super::*;

#[test]
fn clamp01_maps_nan_to_zero() {
    assert_eq!(clamp01(f64::NAN), 0.0);
    assert_eq!(clamp01(-3.0), 0.0);
    assert_eq!(clamp01(7.0), 1.0);
    assert_eq!(clamp01(0.25), 0.25);
}

#[test]
fn map_range_clamps_outside_window() {
    assert_eq!(map_range(0.2, 0.4, 0.1), 0.0);
    assert!((map_range(0.2, 0.4, 0.3) - 0.5).abs() < 1e-12);
    assert_eq!(map_range(0.2, 0.4, 0.5), 1.0);
}

#[test]
fn map_range_zero_width_is_a_step() {
    assert_eq!(map_range(0.5, 0.5, 0.49), 0.0);
    assert_eq!(map_range(0.5, 0.5, 0.5), 1.0);
    assert_eq!(map_range(0.5, 0.5, 0.9), 1.0);
}

#[test]
fn map_range_non_finite_input_never_yields_nan() {
    assert_eq!(map_range(0.0, 1.0, f64::NAN), 0.0);
    assert_eq!(map_range(0.0, 1.0, f64::INFINITY), 1.0);
    assert_eq!(map_range(0.0, 1.0, f64::NEG_INFINITY), 0.0);
}

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp(-20.0, 120.0, 0.0), -20.0);
    assert_eq!(lerp(-20.0, 120.0, 1.0), 120.0);
}
