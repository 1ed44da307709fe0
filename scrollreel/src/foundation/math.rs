/// Clamp to `[0, 1]`, mapping non-finite input to `0`.
pub(crate) fn clamp01(v: f64) -> f64 {
    if v.is_nan() {
        return 0.0;
    }
    v.clamp(0.0, 1.0)
}

/// Normalized position of `value` inside `[start, end]`, clamped to `[0, 1]`.
///
/// A zero-width window is an instant step: `1.0` once `value >= start`, else `0.0`.
pub(crate) fn map_range(start: f64, end: f64, value: f64) -> f64 {
    if !value.is_finite() {
        return if value == f64::INFINITY { 1.0 } else { 0.0 };
    }
    let width = end - start;
    if width <= 0.0 {
        return if value >= start { 1.0 } else { 0.0 };
    }
    clamp01((value - start) / width)
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
