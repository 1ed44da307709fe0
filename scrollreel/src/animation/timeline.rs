use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::Context as _;

use crate::animation::ease::Ease;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::map_range;

/// Named window over global scroll progress.
///
/// Local progress is `clamp((p - start) / (end - start), 0, 1)`, then shaped by `ease`. A
/// window with `start == end` is an instant step at `start`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Phase {
    /// Unique name within its timeline.
    pub name: String,
    /// Window start in `[0, 1]`.
    pub start: f64,
    /// Window end in `[0, 1]`, `>= start`.
    pub end: f64,
    /// Easing applied to local progress.
    #[serde(default)]
    pub ease: Ease,
}

impl Phase {
    /// Linear phase over `[start, end]`. Bounds are checked by [`Timeline::new`].
    pub fn new(name: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            ease: Ease::Linear,
        }
    }

    /// Replace the easing function.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Un-eased local progress for global `progress`.
    pub fn local_progress(&self, progress: f64) -> f64 {
        map_range(self.start, self.end, progress)
    }

    /// Eased local progress for global `progress`.
    pub fn value(&self, progress: f64) -> f64 {
        self.ease.apply(self.local_progress(progress))
    }

    fn validate(&self) -> ReelResult<()> {
        if self.name.is_empty() {
            return Err(ReelError::validation("phase name must be non-empty"));
        }
        for (label, v) in [("start", self.start), ("end", self.end)] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(ReelError::validation(format!(
                    "phase '{}' {label} must be finite and within [0, 1]",
                    self.name
                )));
            }
        }
        if self.start > self.end {
            return Err(ReelError::validation(format!(
                "phase '{}' start must be <= end",
                self.name
            )));
        }
        self.ease.validate()
    }
}

/// Evaluate every phase at `progress`.
///
/// Pure: the result depends only on the arguments. `+inf` is past the end and evaluates as
/// `1`; `NaN` and `-inf` evaluate as `0`.
/// Later phases with a repeated name overwrite earlier ones; use [`Timeline`] to reject
/// duplicates up front.
pub fn evaluate(progress: f64, phases: &[Phase]) -> PhaseValues {
    let progress = if progress.is_finite() {
        progress
    } else if progress == f64::INFINITY {
        1.0
    } else {
        0.0
    };
    let values = phases
        .iter()
        .map(|p| (p.name.clone(), p.value(progress)))
        .collect();
    PhaseValues { values }
}

/// Named phase values produced by [`evaluate`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct PhaseValues {
    values: BTreeMap<String, f64>,
}

impl PhaseValues {
    /// Value for `name`, if the phase exists.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Value for `name`, treating a missing phase as not yet started.
    pub fn value(&self, name: &str) -> f64 {
        self.get(name).unwrap_or(0.0)
    }

    /// `value(rise) - value(fall)` without clamping.
    pub fn difference(&self, rise: &str, fall: &str) -> f64 {
        self.value(rise) - self.value(fall)
    }

    /// Pulse built from two ramps: climbs over `rise`'s window and falls over `fall`'s,
    /// clamped to `[0, 1]`.
    pub fn pulse(&self, rise: &str, fall: &str) -> f64 {
        self.difference(rise, fall).clamp(0.0, 1.0)
    }

    /// Number of phases evaluated.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` when no phases were evaluated.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Consume into the underlying map.
    pub fn into_map(self) -> BTreeMap<String, f64> {
        self.values
    }
}

/// Validated, ordered phase table.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "TimelineDef")]
pub struct Timeline {
    phases: Vec<Phase>,
}

#[derive(serde::Deserialize)]
struct TimelineDef {
    phases: Vec<Phase>,
}

impl TryFrom<TimelineDef> for Timeline {
    type Error = ReelError;

    fn try_from(def: TimelineDef) -> Result<Self, Self::Error> {
        Self::new(def.phases)
    }
}

impl Timeline {
    /// Build a timeline, rejecting invalid bounds, easing parameters and duplicate names.
    pub fn new(phases: Vec<Phase>) -> ReelResult<Self> {
        let mut seen = BTreeSet::new();
        for p in &phases {
            p.validate()?;
            if !seen.insert(p.name.as_str()) {
                return Err(ReelError::validation(format!(
                    "duplicate phase name '{}'",
                    p.name
                )));
            }
        }
        Ok(Self { phases })
    }

    // Built-in tables are constant and known to be valid.
    pub(crate) fn new_unchecked(phases: Vec<Phase>) -> Self {
        debug_assert!(Self::new(phases.clone()).is_ok());
        Self { phases }
    }

    /// Parse and validate a timeline from JSON.
    pub fn from_json_str(json: &str) -> ReelResult<Self> {
        serde_json::from_str(json).map_err(|e| ReelError::serde(e.to_string()))
    }

    /// Read, parse and validate a timeline JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read timeline '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Phases in declaration order.
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Look up a phase by name.
    pub fn phase(&self, name: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.name == name)
    }

    /// Evaluate all phases at `progress`.
    pub fn evaluate(&self, progress: f64) -> PhaseValues {
        evaluate(progress, &self.phases)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
