use crate::config::ThunderConfig;
use crate::foundation::core::{Line, Point, Viewport};
use crate::foundation::error::ReelResult;
use crate::foundation::rng::Rng64;

/// Hard ceiling on bisection levels regardless of configuration.
pub const MAX_BOLT_DEPTH: u32 = 24;

/// Tuning for [`generate_bolt`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoltParams {
    /// Recursion stops once displacement drops below this.
    pub threshold: f64,
    /// Initial displacement is clamped to `[0, max_displacement]`.
    pub max_displacement: f64,
    /// Recursion depth cap.
    pub max_depth: u32,
}

impl Default for BoltParams {
    fn default() -> Self {
        Self {
            threshold: 15.0,
            max_displacement: 4096.0,
            max_depth: 16,
        }
    }
}

impl From<&ThunderConfig> for BoltParams {
    fn from(cfg: &ThunderConfig) -> Self {
        Self {
            threshold: cfg.threshold,
            max_displacement: cfg.max_displacement,
            max_depth: cfg.max_depth,
        }
    }
}

impl BoltParams {
    fn clamp_displacement(&self, displacement: f64) -> f64 {
        if displacement.is_nan() {
            return 0.0;
        }
        displacement.clamp(0.0, self.max_displacement.max(0.0))
    }

    /// Bisection levels a bolt with this initial displacement will use.
    pub fn depth(&self, displacement: f64) -> u32 {
        bolt_depth(self.clamp_displacement(displacement), self.threshold)
            .min(self.max_depth.min(MAX_BOLT_DEPTH))
    }
}

/// Number of halvings before `displacement` falls below `threshold`.
///
/// Equals `ceil(log2(displacement / threshold))` except at exact power-of-two ratios, where
/// it is one more. Capped at [`MAX_BOLT_DEPTH`].
pub fn bolt_depth(displacement: f64, threshold: f64) -> u32 {
    if !displacement.is_finite() || displacement < 0.0 {
        return 0;
    }
    let mut d = displacement;
    let mut depth = 0;
    while d >= threshold && depth < MAX_BOLT_DEPTH {
        d /= 2.0;
        depth += 1;
    }
    depth
}

/// Jagged polyline from `from` to `to` by recursive midpoint displacement.
///
/// Each level offsets the midpoint in x and y by `(u - 0.5) * displacement` and halves the
/// displacement. Returns `2^depth` contiguous segments.
pub fn generate_bolt(
    from: Point,
    to: Point,
    displacement: f64,
    params: &BoltParams,
    rng: &mut Rng64,
) -> Vec<Line> {
    let depth = params.depth(displacement);
    let mut out = Vec::with_capacity(1usize << depth);
    subdivide(
        from,
        to,
        params.clamp_displacement(displacement),
        depth,
        rng,
        &mut out,
    );
    out
}

fn subdivide(a: Point, b: Point, disp: f64, depth: u32, rng: &mut Rng64, out: &mut Vec<Line>) {
    if depth == 0 {
        out.push(Line::new(a, b));
        return;
    }
    let mid = Point::new(
        (a.x + b.x) / 2.0 + (rng.next_f64_01() - 0.5) * disp,
        (a.y + b.y) / 2.0 + (rng.next_f64_01() - 0.5) * disp,
    );
    subdivide(a, mid, disp / 2.0, depth - 1, rng, out);
    subdivide(mid, b, disp / 2.0, depth - 1, rng, out);
}

/// Rate limiter: requests closer than `cooldown_ms` to the last accepted one are dropped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CooldownGate {
    cooldown_ms: f64,
    last: Option<f64>,
}

impl CooldownGate {
    /// Gate with the given window. The first request always passes.
    pub fn new(cooldown_ms: f64) -> Self {
        Self {
            cooldown_ms,
            last: None,
        }
    }

    /// Accept or drop a request at `now_ms`.
    pub fn try_fire(&mut self, now_ms: f64) -> bool {
        if !now_ms.is_finite() {
            return false;
        }
        if let Some(last) = self.last
            && now_ms - last < self.cooldown_ms
        {
            return false;
        }
        self.last = Some(now_ms);
        true
    }

    /// Time of the last accepted request.
    pub fn last_fired(&self) -> Option<f64> {
        self.last
    }

    /// Forget the last accepted request.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// One accepted lightning trigger, ready to draw.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Strike {
    /// One or two bolts, top edge to bottom edge.
    pub bolts: Vec<Vec<Line>>,
    /// Stroke width.
    pub line_width: f64,
    /// Peak opacity of the full-screen flash.
    pub flash_opacity: f64,
    /// How long the flash stays up.
    pub flash_duration_ms: f64,
    /// When the bolt canvas is cleared.
    pub clear_after_ms: f64,
}

/// Lightning overlay driver: cooldown gate plus strike planning.
#[derive(Clone, Debug)]
pub struct ThunderStorm {
    config: ThunderConfig,
    params: BoltParams,
    gate: CooldownGate,
    rng: Rng64,
    initial_at: Option<f64>,
}

impl ThunderStorm {
    /// Storm mounted at `mounted_at_ms`; an initial strike is due `initial_delay_ms` later.
    ///
    /// Fails if `config` does not validate.
    pub fn new(config: ThunderConfig, seed: u64, mounted_at_ms: f64) -> ReelResult<Self> {
        config.validate()?;
        Ok(Self {
            params: BoltParams::from(&config),
            gate: CooldownGate::new(config.cooldown_ms),
            rng: Rng64::new(seed),
            initial_at: Some(mounted_at_ms + config.initial_delay_ms),
            config,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &ThunderConfig {
        &self.config
    }

    /// Fire the initial strike once it is due.
    pub fn poll(&mut self, now_ms: f64, viewport: &Viewport) -> Option<Strike> {
        match self.initial_at {
            Some(at) if now_ms >= at => {
                self.initial_at = None;
                self.strike(now_ms, viewport)
            }
            _ => None,
        }
    }

    /// A watched section reported `ratio` visible; strike if it crosses the threshold.
    pub fn on_intersection(
        &mut self,
        ratio: f64,
        now_ms: f64,
        viewport: &Viewport,
    ) -> Option<Strike> {
        if ratio >= self.config.visibility_threshold && ratio > 0.0 {
            self.strike(now_ms, viewport)
        } else {
            None
        }
    }

    /// Request a strike; returns `None` while cooling down.
    pub fn strike(&mut self, now_ms: f64, viewport: &Viewport) -> Option<Strike> {
        if !self.gate.try_fire(now_ms) {
            tracing::debug!(now_ms, "strike suppressed by cooldown");
            return None;
        }
        let count = if self.rng.chance(self.config.double_bolt_chance) {
            2
        } else {
            1
        };
        let (w, h) = (viewport.width(), viewport.height());
        let bolts = (0..count)
            .map(|_| {
                let from = Point::new(self.rng.range(0.0, w), 0.0);
                let to = Point::new(self.rng.range(0.0, w), h);
                generate_bolt(
                    from,
                    to,
                    self.config.initial_displacement,
                    &self.params,
                    &mut self.rng,
                )
            })
            .collect();
        let (lw_lo, lw_hi) = self.config.line_width;
        let (fo_lo, fo_hi) = self.config.flash_opacity;
        let (fd_lo, fd_hi) = self.config.flash_duration_ms;
        Some(Strike {
            bolts,
            line_width: self.rng.range(lw_lo, lw_hi),
            flash_opacity: self.rng.range(fo_lo, fo_hi),
            flash_duration_ms: self.rng.range(fd_lo, fd_hi),
            clear_after_ms: self.config.clear_after_ms,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/thunder.rs"]
mod tests;
