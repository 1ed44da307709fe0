use super::*;

fn field(count: usize) -> Starfield {
    let cfg = StarfieldConfig {
        count,
        ..StarfieldConfig::default()
    };
    Starfield::new(cfg, Size::new(800.0, 600.0), &mut Rng64::new(11)).unwrap()
}

#[test]
fn stars_are_initialised_within_ranges() {
    let f = field(150);
    assert_eq!(f.stars().len(), 150);
    for s in f.stars() {
        assert!((0.0..800.0).contains(&s.position.x));
        assert!((0.0..600.0).contains(&s.position.y));
        assert!((0.1..0.4).contains(&s.base_alpha));
        assert!((0.5..2.0).contains(&s.size));
        assert!(s.velocity.x.abs() <= 0.075 && s.velocity.y.abs() <= 0.075);
    }
}

#[test]
fn step_wraps_at_edges() {
    let mut f = field(1);
    f.stars[0] = Star {
        position: Point::new(0.01, 599.99),
        velocity: Vec2::new(-0.05, 0.05),
        base_alpha: 0.2,
        size: 1.0,
    };
    f.step();
    assert_eq!(f.stars()[0].position, Point::new(800.0, 0.0));
}

#[test]
fn alpha_twinkles_within_amplitude_and_clamps() {
    let f = field(0);
    let star = Star {
        position: Point::new(0.0, 0.0),
        velocity: Vec2::ZERO,
        base_alpha: 0.3,
        size: 1.0,
    };
    assert!((f.alpha(&star, 0.0) - 0.3).abs() < 1e-12);
    let peak = f.alpha(&star, std::f64::consts::FRAC_PI_2 * 1000.0);
    assert!((peak - 0.35).abs() < 1e-9);

    let dim = Star {
        base_alpha: -1.0,
        ..star
    };
    assert_eq!(f.alpha(&dim, 0.0), 0.0);
}

#[test]
fn bright_stars_take_accent_tint() {
    let f = field(0);
    assert_eq!(f.tint(0.25), Tint::Accent);
    assert_eq!(f.tint(0.2), Tint::White);
}

#[test]
fn resize_keeps_stars() {
    let mut f = field(10);
    let before = f.stars().to_vec();
    f.resize(Size::new(100.0, 100.0));
    assert_eq!(f.size(), Size::new(100.0, 100.0));
    assert_eq!(f.stars(), &before[..]);
}

#[test]
fn field_rejects_inverted_ranges() {
    let cfg = StarfieldConfig {
        size: (2.0, 1.0),
        ..StarfieldConfig::default()
    };
    assert!(Starfield::new(cfg, Size::new(10.0, 10.0), &mut Rng64::new(1)).is_err());
}
