use std::f64::consts::TAU;

use crate::config::DustConfig;
use crate::foundation::core::{Point, Size, Vec2};
use crate::foundation::error::ReelResult;
use crate::foundation::rng::Rng64;

/// Depth layer of a dust particle. Nearer layers are larger, faster and shift more with the
/// pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DustLayer {
    /// Farthest layer, half of all particles.
    Background,
    /// Middle layer, 30%.
    Mid,
    /// Nearest layer, 20%.
    Foreground,
}

impl DustLayer {
    /// Depth factor applied to size, speed, float and parallax.
    pub fn depth(self) -> f64 {
        match self {
            Self::Background => 0.33,
            Self::Mid => 0.66,
            Self::Foreground => 1.0,
        }
    }

    /// Layer for a uniform sample `u` in `[0, 1)`.
    pub fn pick(u: f64) -> Self {
        if u < 0.5 {
            Self::Background
        } else if u < 0.8 {
            Self::Mid
        } else {
            Self::Foreground
        }
    }
}

/// One mote of hero dust.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DustParticle {
    /// Drift position before float and parallax.
    pub position: Point,
    /// Depth layer.
    pub layer: DustLayer,
    /// Radius, already scaled by depth.
    pub size: f64,
    /// Drift per frame, already scaled by depth.
    pub velocity: Vec2,
    /// Opacity.
    pub base_alpha: f64,
    /// Float phase offset in radians.
    pub phase: f64,
}

/// Layered dust behind the hero title: drifts, floats on a sine and shifts against the
/// pointer.
#[derive(Clone, Debug)]
pub struct DustField {
    config: DustConfig,
    size: Size,
    particles: Vec<DustParticle>,
}

impl DustField {
    /// Scatter particles over `size`. Narrow viewports get `config.compact_count`.
    pub fn new(config: DustConfig, size: Size, rng: &mut Rng64) -> ReelResult<Self> {
        config.validate()?;
        let count = if size.width < config.compact_below_width {
            config.compact_count
        } else {
            config.count
        };
        let (s_lo, s_hi) = config.size;
        let (a_lo, a_hi) = config.base_alpha;
        let v = config.max_speed;
        let particles = (0..count)
            .map(|_| {
                let layer = DustLayer::pick(rng.next_f64_01());
                let z = layer.depth();
                DustParticle {
                    position: Point::new(rng.range(0.0, size.width), rng.range(0.0, size.height)),
                    layer,
                    size: rng.range(s_lo, s_hi) * z,
                    velocity: Vec2::new(rng.range(-v, v) * z, rng.range(-v, v) * z),
                    base_alpha: rng.range(a_lo, a_hi),
                    phase: rng.range(0.0, TAU),
                }
            })
            .collect();
        tracing::debug!(count, width = size.width, "dust field seeded");
        Ok(Self {
            config,
            size,
            particles,
        })
    }

    /// All particles.
    pub fn particles(&self) -> &[DustParticle] {
        &self.particles
    }

    /// Drawing area.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Advance one frame. Particles wrap once they are `wrap_margin` past an edge.
    pub fn step(&mut self) {
        let Size { width, height } = self.size;
        let m = self.config.wrap_margin;
        for particle in &mut self.particles {
            let p = &mut particle.position;
            *p += particle.velocity;
            if p.x < -m {
                p.x = width + m;
            }
            if p.x > width + m {
                p.x = -m;
            }
            if p.y < -m {
                p.y = height + m;
            }
            if p.y > height + m {
                p.y = -m;
            }
        }
    }

    /// Where `particle` is drawn at `t_ms` with the pointer at `pointer` (each axis in
    /// `[-1, 1]`, see [`Viewport::normalized_pointer`](crate::Viewport::normalized_pointer)).
    pub fn draw_position(&self, particle: &DustParticle, t_ms: f64, pointer: Vec2) -> Point {
        let cfg = &self.config;
        let z = particle.layer.depth();
        let angle = t_ms * cfg.float_rate + particle.phase;
        let float = Vec2::new(angle.sin(), angle.cos()) * (cfg.float_amplitude * z);
        let parallax = -pointer * (cfg.parallax_px * z);
        particle.position + float + parallax
    }

    /// Change the drawing area. The particle count is fixed at construction.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/dust.rs"]
mod tests;
