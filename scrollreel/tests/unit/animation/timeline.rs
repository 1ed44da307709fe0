use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn local_progress_inside_and_outside_window() {
    let phases = [Phase::new("a", 0.2, 0.4)];
    assert_eq!(evaluate(0.1, &phases).value("a"), 0.0);
    assert!(approx(evaluate(0.3, &phases).value("a"), 0.5));
    assert_eq!(evaluate(0.5, &phases).value("a"), 1.0);
}

#[test]
fn evaluate_is_pure() {
    let phases = [
        Phase::new("a", 0.0, 0.5).with_ease(Ease::InOutCubic),
        Phase::new("b", 0.25, 0.9).with_ease(Ease::InExpo),
    ];
    for p in [0.0, 0.13, 0.5, 0.77, 1.0] {
        assert_eq!(evaluate(p, &phases), evaluate(p, &phases));
    }
}

#[test]
fn pulse_rises_then_falls() {
    let phases = [Phase::new("a", 0.15, 0.25), Phase::new("b", 0.25, 0.35)];
    assert!(approx(evaluate(0.20, &phases).difference("a", "b"), 0.5));
    assert!(approx(evaluate(0.25, &phases).pulse("a", "b"), 1.0));
    assert!(approx(evaluate(0.30, &phases).pulse("a", "b"), 0.5));
    assert!(approx(evaluate(0.40, &phases).pulse("a", "b"), 0.0));
}

#[test]
fn pulse_with_fast_rise_is_fully_lit_mid_window() {
    // Rise completes before the fall window opens.
    let phases = [Phase::new("a", 0.15, 0.20), Phase::new("b", 0.25, 0.35)];
    assert!(approx(evaluate(0.20, &phases).pulse("a", "b"), 1.0));
    assert!(approx(evaluate(0.30, &phases).pulse("a", "b"), 0.5));
    assert!(approx(evaluate(0.40, &phases).pulse("a", "b"), 0.0));
}

#[test]
fn zero_width_phase_is_a_step() {
    let phases = [Phase::new("cut", 0.5, 0.5)];
    assert_eq!(evaluate(0.49, &phases).value("cut"), 0.0);
    assert_eq!(evaluate(0.5, &phases).value("cut"), 1.0);
    assert_eq!(evaluate(0.9, &phases).value("cut"), 1.0);
    assert!(!evaluate(0.9, &phases).value("cut").is_nan());
}

#[test]
fn non_finite_progress_evaluates_as_zero() {
    let phases = [Phase::new("a", 0.0, 1.0), Phase::new("z", 0.0, 0.0)];
    for p in [f64::NAN, f64::NEG_INFINITY] {
        let v = evaluate(p, &phases);
        assert_eq!(v.value("a"), 0.0);
        assert_eq!(v.value("z"), 1.0);
    }
}

#[test]
fn infinite_progress_is_past_the_end() {
    let phases = [
        Phase::new("a", 0.0, 0.5),
        Phase::new("b", 0.5, 1.0).with_ease(Ease::OutCubic),
        Phase::new("z", 1.0, 1.0),
    ];
    let v = evaluate(f64::INFINITY, &phases);
    let end = evaluate(1.0, &phases);
    for p in &phases {
        assert_eq!(p.local_progress(f64::INFINITY), 1.0);
        assert_eq!(v.value(&p.name), 1.0);
        assert_eq!(v.value(&p.name), end.value(&p.name));
    }
}

#[test]
fn missing_phase_reads_as_zero() {
    let v = evaluate(0.5, &[]);
    assert!(v.is_empty());
    assert_eq!(v.get("nope"), None);
    assert_eq!(v.value("nope"), 0.0);
}

#[test]
fn easing_applies_after_clamp() {
    let phases = [Phase::new("a", 0.0, 1.0).with_ease(Ease::InQuad)];
    assert!(approx(evaluate(0.5, &phases).value("a"), 0.25));
}

#[test]
fn timeline_rejects_bad_tables() {
    assert!(Timeline::new(vec![Phase::new("a", 0.4, 0.2)]).is_err());
    assert!(Timeline::new(vec![Phase::new("a", -0.1, 0.2)]).is_err());
    assert!(Timeline::new(vec![Phase::new("a", 0.0, f64::NAN)]).is_err());
    assert!(Timeline::new(vec![Phase::new("", 0.0, 1.0)]).is_err());
    assert!(Timeline::new(vec![Phase::new("a", 0.0, 0.5), Phase::new("a", 0.5, 1.0)]).is_err());
    assert!(Timeline::new(vec![Phase::new("a", 0.5, 0.5)]).is_ok());
}

#[test]
fn timeline_json_round_trip_validates() {
    let json = r#"{
        "phases": [
            { "name": "void", "start": 0.0, "end": 0.15 },
            { "name": "light", "start": 0.2, "end": 0.4, "ease": "InExpo" }
        ]
    }"#;
    let tl = Timeline::from_json_str(json).unwrap();
    assert_eq!(tl.phases().len(), 2);
    assert_eq!(tl.phase("light").unwrap().ease, Ease::InExpo);
    assert_eq!(tl.phase("void").unwrap().ease, Ease::Linear);
    assert_eq!(tl.evaluate(1.0).value("light"), 1.0);

    let bad = r#"{ "phases": [ { "name": "x", "start": 0.9, "end": 0.1 } ] }"#;
    let err = Timeline::from_json_str(bad).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}
