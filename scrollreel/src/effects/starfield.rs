use crate::config::StarfieldConfig;
use crate::foundation::core::{Point, Size, Vec2};
use crate::foundation::error::ReelResult;
use crate::foundation::math::clamp01;
use crate::foundation::rng::Rng64;

/// Fill color family for a star.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tint {
    /// Brand accent, used for brighter stars.
    Accent,
    /// Plain white.
    White,
}

/// One drifting star.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Star {
    /// Center in pixels.
    pub position: Point,
    /// Drift per frame.
    pub velocity: Vec2,
    /// Opacity before twinkle.
    pub base_alpha: f64,
    /// Radius.
    pub size: f64,
}

/// Ambient background particles that drift, wrap at the edges and twinkle.
#[derive(Clone, Debug)]
pub struct Starfield {
    config: StarfieldConfig,
    size: Size,
    stars: Vec<Star>,
}

impl Starfield {
    /// Scatter `config.count` stars over an area of `size`.
    pub fn new(config: StarfieldConfig, size: Size, rng: &mut Rng64) -> ReelResult<Self> {
        config.validate()?;
        let (a_lo, a_hi) = config.base_alpha;
        let (s_lo, s_hi) = config.size;
        let v = config.max_speed;
        let stars = (0..config.count)
            .map(|_| Star {
                position: Point::new(rng.range(0.0, size.width), rng.range(0.0, size.height)),
                base_alpha: rng.range(a_lo, a_hi),
                size: rng.range(s_lo, s_hi),
                velocity: Vec2::new(rng.range(-v, v), rng.range(-v, v)),
            })
            .collect();
        Ok(Self {
            config,
            size,
            stars,
        })
    }

    /// All stars.
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Drawing area.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Advance one frame: move every star and wrap it to the opposite edge when it leaves.
    pub fn step(&mut self) {
        let Size { width, height } = self.size;
        for star in &mut self.stars {
            let p = &mut star.position;
            *p += star.velocity;
            if p.x < 0.0 {
                p.x = width;
            }
            if p.x > width {
                p.x = 0.0;
            }
            if p.y < 0.0 {
                p.y = height;
            }
            if p.y > height {
                p.y = 0.0;
            }
        }
    }

    /// Twinkling opacity of `star` at `t_ms`, clamped to `[0, 1]`.
    pub fn alpha(&self, star: &Star, t_ms: f64) -> f64 {
        let cfg = &self.config;
        let twinkle = (t_ms * cfg.twinkle_rate + star.position.x).sin() * cfg.twinkle_amplitude;
        clamp01(star.base_alpha + twinkle)
    }

    /// Tint for a star drawn at `alpha`.
    pub fn tint(&self, alpha: f64) -> Tint {
        if alpha > self.config.accent_above {
            Tint::Accent
        } else {
            Tint::White
        }
    }

    /// Change the drawing area. Stars keep their positions and wrap on the next step.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/starfield.rs"]
mod tests;
