use super::*;

#[test]
fn countdown_reports_seconds_and_log_line() {
    let mut c = Countdown::new(CountdownConfig::default()).unwrap();
    let f = c.tick(1000.0);
    assert_eq!(f.seconds_left, 3);
    assert_eq!(f.percent, 0.0);
    assert_eq!(f.log_index, 0);

    let f = c.tick(1500.0);
    assert_eq!(f.seconds_left, 3);
    let f = c.tick(2001.0);
    assert_eq!(f.seconds_left, 2);

    // 50% of 7 gaps = 3.5
    let f = c.tick(2500.0);
    assert_eq!(f.log_index, 3);
    assert!(!c.is_done());

    let f = c.tick(4100.0);
    assert_eq!(f.seconds_left, 0);
    assert_eq!(f.percent, 100.0);
    assert_eq!(f.log_index, 7);
    assert!(c.is_done());
}

#[test]
fn completion_waits_for_delay() {
    let mut c = Countdown::new(CountdownConfig::default()).unwrap();
    c.tick(0.0);
    assert!(!c.completion_due(3000.0));
    c.tick(3000.0);
    assert!(!c.completion_due(3100.0));
    assert!(c.completion_due(3200.0));
}

#[test]
fn single_log_line_stays_at_zero() {
    let cfg = CountdownConfig {
        log_lines: 1,
        ..CountdownConfig::default()
    };
    assert_eq!(CountdownFrame::at(0.0, &cfg).log_index, 0);
}

#[test]
fn sweep_maps_phase_to_position() {
    let s = Sweep::new(1000.0);
    assert_eq!(s.position(1000.0), -20.0);
    assert!((s.position(3500.0) - 50.0).abs() < 1e-9);
    assert_eq!(s.position(6000.0), -20.0);
    assert!((s.phase(500.0) - 0.9).abs() < 1e-9);

    let fast = Sweep::new(0.0).with_period(1000.0);
    assert!((fast.position(250.0) - 15.0).abs() < 1e-9);
    assert_eq!(Sweep::new(0.0).with_period(-1.0), Sweep::new(0.0));
}

#[test]
fn countdown_rejects_zero_length() {
    let cfg = CountdownConfig {
        total_ms: 0.0,
        ..CountdownConfig::default()
    };
    assert!(Countdown::new(cfg.clone()).is_err());

    // Frames computed directly stay finite.
    let f = CountdownFrame::at(500.0, &cfg);
    assert_eq!(f.percent, 100.0);
    assert_eq!(f.remaining_ms, 0.0);
    assert_eq!(f.log_index, cfg.log_lines - 1);
}
