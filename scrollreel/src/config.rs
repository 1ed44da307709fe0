//! Runtime configuration.
//!
//! Every section deserializes with defaults, so a partial JSON document (or `{}`) is valid.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{ReelError, ReelResult};

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReelConfig {
    /// Asset store location.
    pub store: StoreConfig,
    /// Lightning overlay.
    pub thunder: ThunderConfig,
    /// Background star field.
    pub starfield: StarfieldConfig,
    /// Hero dust field.
    pub dust: DustConfig,
    /// Hold-to-unlock meter.
    pub hold: HoldConfig,
    /// Loader countdown.
    pub countdown: CountdownConfig,
}

impl ReelConfig {
    /// Parse and validate configuration JSON.
    pub fn from_json_str(json: &str) -> ReelResult<Self> {
        let cfg: Self = serde_json::from_str(json).map_err(|e| ReelError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Validate every section.
    pub fn validate(&self) -> ReelResult<()> {
        self.store.validate()?;
        self.thunder.validate()?;
        self.starfield.validate()?;
        self.dust.validate()?;
        self.hold.validate()?;
        self.countdown.validate()
    }
}

/// Origin-scoped storage location: `<root>/<namespace>/<store_name>/`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Root directory for all namespaces.
    pub root: PathBuf,
    /// Database name.
    pub namespace: String,
    /// Object store name inside the namespace.
    pub store_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(".scrollreel"),
            namespace: "scrollreel".to_string(),
            store_name: "uploaded_assets".to_string(),
        }
    }
}

impl StoreConfig {
    /// Default namespace layout under `root`.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Directory holding the records.
    pub fn dir(&self) -> PathBuf {
        self.root.join(&self.namespace).join(&self.store_name)
    }

    /// Reject names that would escape the root.
    pub fn validate(&self) -> ReelResult<()> {
        for (label, name) in [("namespace", &self.namespace), ("store_name", &self.store_name)] {
            if name.is_empty()
                || name == "."
                || name == ".."
                || name.contains(['/', '\\'])
            {
                return Err(ReelError::validation(format!(
                    "store {label} must be a single non-empty path segment"
                )));
            }
        }
        Ok(())
    }
}

/// Lightning overlay parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ThunderConfig {
    /// Minimum spacing between strikes.
    pub cooldown_ms: f64,
    /// Delay before the first automatic strike after mount.
    pub initial_delay_ms: f64,
    /// Visible-area fraction at which a section entering view triggers a strike.
    pub visibility_threshold: f64,
    /// Midpoint displacement of the top-level bisection.
    pub initial_displacement: f64,
    /// Displacement below which a segment is drawn straight.
    pub threshold: f64,
    /// Upper clamp on caller-supplied displacement.
    pub max_displacement: f64,
    /// Hard cap on bisection depth.
    pub max_depth: u32,
    /// Probability of a second bolt in one strike.
    pub double_bolt_chance: f64,
    /// Stroke width range.
    pub line_width: (f64, f64),
    /// Screen flash opacity range.
    pub flash_opacity: (f64, f64),
    /// Screen flash duration range.
    pub flash_duration_ms: (f64, f64),
    /// Time after which the bolt canvas is cleared.
    pub clear_after_ms: f64,
}

impl Default for ThunderConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 1200.0,
            initial_delay_ms: 800.0,
            visibility_threshold: 0.15,
            initial_displacement: 250.0,
            threshold: 15.0,
            max_displacement: 4096.0,
            max_depth: 16,
            double_bolt_chance: 0.2,
            line_width: (0.5, 2.0),
            flash_opacity: (0.02, 0.06),
            flash_duration_ms: (80.0, 180.0),
            clear_after_ms: 200.0,
        }
    }
}

impl ThunderConfig {
    /// Check ranges and limits.
    pub fn validate(&self) -> ReelResult<()> {
        non_negative("thunder.cooldown_ms", self.cooldown_ms)?;
        non_negative("thunder.initial_delay_ms", self.initial_delay_ms)?;
        non_negative("thunder.clear_after_ms", self.clear_after_ms)?;
        unit("thunder.visibility_threshold", self.visibility_threshold)?;
        unit("thunder.double_bolt_chance", self.double_bolt_chance)?;
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ReelError::validation(
                "thunder.threshold must be finite and > 0",
            ));
        }
        non_negative("thunder.max_displacement", self.max_displacement)?;
        non_negative("thunder.initial_displacement", self.initial_displacement)?;
        if self.max_depth > 24 {
            return Err(ReelError::validation("thunder.max_depth must be <= 24"));
        }
        ordered("thunder.line_width", self.line_width)?;
        ordered("thunder.flash_opacity", self.flash_opacity)?;
        ordered("thunder.flash_duration_ms", self.flash_duration_ms)
    }
}

/// Background star field parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    /// Number of stars.
    pub count: usize,
    /// Base opacity range.
    pub base_alpha: (f64, f64),
    /// Radius range.
    pub size: (f64, f64),
    /// Per-axis speed bound in pixels per frame.
    pub max_speed: f64,
    /// Twinkle amplitude added to the base opacity.
    pub twinkle_amplitude: f64,
    /// Twinkle angular rate per millisecond.
    pub twinkle_rate: f64,
    /// Opacity above which a star takes the accent tint.
    pub accent_above: f64,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 150,
            base_alpha: (0.1, 0.4),
            size: (0.5, 2.0),
            max_speed: 0.075,
            twinkle_amplitude: 0.05,
            twinkle_rate: 0.001,
            accent_above: 0.2,
        }
    }
}

impl StarfieldConfig {
    /// Check ranges and limits.
    pub fn validate(&self) -> ReelResult<()> {
        if self.count > 100_000 {
            return Err(ReelError::validation("starfield.count must be <= 100000"));
        }
        ordered("starfield.base_alpha", self.base_alpha)?;
        ordered("starfield.size", self.size)?;
        non_negative("starfield.max_speed", self.max_speed)?;
        non_negative("starfield.twinkle_amplitude", self.twinkle_amplitude)?;
        non_negative("starfield.twinkle_rate", self.twinkle_rate)?;
        unit("starfield.accent_above", self.accent_above)
    }
}

/// Hero dust field parameters. Per-particle size, speed and float scale with layer depth.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DustConfig {
    /// Particle count on wide viewports.
    pub count: usize,
    /// Particle count below `compact_below_width`.
    pub compact_count: usize,
    /// Width under which the compact count applies.
    pub compact_below_width: f64,
    /// Radius range before depth scaling.
    pub size: (f64, f64),
    /// Per-axis speed bound in pixels per frame before depth scaling.
    pub max_speed: f64,
    /// Opacity range.
    pub base_alpha: (f64, f64),
    /// Sine float amplitude in pixels before depth scaling.
    pub float_amplitude: f64,
    /// Float angular rate per millisecond.
    pub float_rate: f64,
    /// Pointer parallax at full deflection for the nearest layer.
    pub parallax_px: f64,
    /// Distance past each edge before a particle wraps.
    pub wrap_margin: f64,
}

impl Default for DustConfig {
    fn default() -> Self {
        Self {
            count: 450,
            compact_count: 200,
            compact_below_width: 768.0,
            size: (0.5, 2.0),
            max_speed: 0.1,
            base_alpha: (0.1, 0.5),
            float_amplitude: 0.3,
            float_rate: 0.001,
            parallax_px: 8.0,
            wrap_margin: 20.0,
        }
    }
}

impl DustConfig {
    /// Check ranges and limits.
    pub fn validate(&self) -> ReelResult<()> {
        if self.count.max(self.compact_count) > 100_000 {
            return Err(ReelError::validation("dust counts must be <= 100000"));
        }
        non_negative("dust.compact_below_width", self.compact_below_width)?;
        ordered("dust.size", self.size)?;
        non_negative("dust.max_speed", self.max_speed)?;
        ordered("dust.base_alpha", self.base_alpha)?;
        unit("dust.base_alpha", self.base_alpha.1)?;
        non_negative("dust.float_amplitude", self.float_amplitude)?;
        non_negative("dust.float_rate", self.float_rate)?;
        non_negative("dust.parallax_px", self.parallax_px)?;
        non_negative("dust.wrap_margin", self.wrap_margin)
    }
}

/// Hold-to-unlock meter parameters (meter runs 0..100).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HoldConfig {
    /// Time to fill from empty to full while held.
    pub fill_duration_ms: f64,
    /// Units lost per frame after release.
    pub decay_per_frame: f64,
    /// Level at or below which a decaying meter snaps to zero.
    pub snap_below: f64,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            fill_duration_ms: 1200.0,
            decay_per_frame: 3.0,
            snap_below: 0.5,
        }
    }
}

impl HoldConfig {
    /// Check ranges.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.fill_duration_ms.is_finite() || self.fill_duration_ms <= 0.0 {
            return Err(ReelError::validation(
                "hold.fill_duration_ms must be finite and > 0",
            ));
        }
        if !self.decay_per_frame.is_finite() || self.decay_per_frame <= 0.0 {
            return Err(ReelError::validation(
                "hold.decay_per_frame must be finite and > 0",
            ));
        }
        non_negative("hold.snap_below", self.snap_below)
    }
}

/// Loader countdown parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    /// Countdown length.
    pub total_ms: f64,
    /// Buffer between reaching zero and signalling completion.
    pub completion_delay_ms: f64,
    /// Number of boot-log lines revealed over the countdown.
    pub log_lines: usize,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            total_ms: 3000.0,
            completion_delay_ms: 200.0,
            log_lines: 8,
        }
    }
}

impl CountdownConfig {
    /// Check ranges.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.total_ms.is_finite() || self.total_ms <= 0.0 {
            return Err(ReelError::validation(
                "countdown.total_ms must be finite and > 0",
            ));
        }
        non_negative("countdown.completion_delay_ms", self.completion_delay_ms)?;
        if self.log_lines == 0 {
            return Err(ReelError::validation("countdown.log_lines must be > 0"));
        }
        Ok(())
    }
}

fn non_negative(label: &str, v: f64) -> ReelResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(ReelError::validation(format!(
            "{label} must be finite and >= 0"
        )));
    }
    Ok(())
}

fn unit(label: &str, v: f64) -> ReelResult<()> {
    if !v.is_finite() || !(0.0..=1.0).contains(&v) {
        return Err(ReelError::validation(format!(
            "{label} must be within [0, 1]"
        )));
    }
    Ok(())
}

fn ordered(label: &str, (lo, hi): (f64, f64)) -> ReelResult<()> {
    non_negative(label, lo)?;
    non_negative(label, hi)?;
    if lo > hi {
        return Err(ReelError::validation(format!("{label} range must be (min, max)")));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
