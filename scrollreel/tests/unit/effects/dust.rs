use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn field(width: f64) -> DustField {
    DustField::new(
        DustConfig::default(),
        Size::new(width, 600.0),
        &mut Rng64::new(5),
    )
    .unwrap()
}

fn mote(layer: DustLayer) -> DustParticle {
    DustParticle {
        position: Point::new(100.0, 100.0),
        layer,
        size: 1.0,
        velocity: Vec2::ZERO,
        base_alpha: 0.3,
        phase: 0.0,
    }
}

#[test]
fn narrow_viewports_get_fewer_particles() {
    assert_eq!(field(1024.0).particles().len(), 450);
    assert_eq!(field(767.0).particles().len(), 200);
    assert_eq!(field(768.0).particles().len(), 450);
}

#[test]
fn particles_scale_with_depth() {
    let f = field(1024.0);
    for p in f.particles() {
        let z = p.layer.depth();
        assert!((0.0..1024.0).contains(&p.position.x));
        assert!((0.0..600.0).contains(&p.position.y));
        assert!(p.size >= 0.5 * z && p.size <= 2.0 * z);
        assert!(p.velocity.x.abs() <= 0.1 * z && p.velocity.y.abs() <= 0.1 * z);
        assert!((0.1..0.5).contains(&p.base_alpha));
        assert!((0.0..std::f64::consts::TAU).contains(&p.phase));
    }
}

#[test]
fn layers_split_half_thirty_twenty() {
    assert_eq!(DustLayer::pick(0.0), DustLayer::Background);
    assert_eq!(DustLayer::pick(0.49), DustLayer::Background);
    assert_eq!(DustLayer::pick(0.5), DustLayer::Mid);
    assert_eq!(DustLayer::pick(0.79), DustLayer::Mid);
    assert_eq!(DustLayer::pick(0.8), DustLayer::Foreground);

    let f = field(1024.0);
    let back = f
        .particles()
        .iter()
        .filter(|p| p.layer == DustLayer::Background)
        .count();
    let front = f
        .particles()
        .iter()
        .filter(|p| p.layer == DustLayer::Foreground)
        .count();
    assert!((180..=270).contains(&back), "background {back}");
    assert!((50..=130).contains(&front), "foreground {front}");
}

#[test]
fn step_wraps_past_margin() {
    let mut f = field(1024.0);
    f.particles.truncate(1);
    f.particles[0] = DustParticle {
        position: Point::new(-19.95, 620.0),
        velocity: Vec2::new(-0.1, 0.1),
        ..mote(DustLayer::Foreground)
    };
    f.step();
    assert_eq!(f.particles()[0].position, Point::new(1044.0, -20.0));

    f.particles[0].position = Point::new(-19.0, 10.0);
    f.step();
    assert!(approx(f.particles()[0].position.x, -19.1));
}

#[test]
fn parallax_moves_against_pointer_by_depth() {
    let f = field(1024.0);
    // At t = 0 with phase 0 the float is (0, 0.3 * z).
    for layer in [DustLayer::Background, DustLayer::Mid, DustLayer::Foreground] {
        let z = layer.depth();
        let p = mote(layer);
        let rest = f.draw_position(&p, 0.0, Vec2::ZERO);
        assert!(approx(rest.x, 100.0));
        assert!(approx(rest.y, 100.0 + 0.3 * z));

        let pushed = f.draw_position(&p, 0.0, Vec2::new(1.0, -1.0));
        assert!(approx(pushed.x - rest.x, -8.0 * z));
        assert!(approx(pushed.y - rest.y, 8.0 * z));
    }
}

#[test]
fn float_follows_sine_over_time() {
    let f = field(1024.0);
    let p = mote(DustLayer::Foreground);
    let quarter = std::f64::consts::FRAC_PI_2 * 1000.0;
    let d = f.draw_position(&p, quarter, Vec2::ZERO);
    assert!(approx(d.x, 100.3));
    assert!(approx(d.y, 100.0));
}

#[test]
fn resize_keeps_particles() {
    let mut f = field(1024.0);
    let before = f.particles().to_vec();
    f.resize(Size::new(320.0, 480.0));
    assert_eq!(f.size(), Size::new(320.0, 480.0));
    assert_eq!(f.particles(), &before[..]);
}

#[test]
fn field_rejects_invalid_config() {
    let cfg = DustConfig {
        parallax_px: f64::NAN,
        ..DustConfig::default()
    };
    assert!(DustField::new(cfg, Size::new(10.0, 10.0), &mut Rng64::new(1)).is_err());
}
