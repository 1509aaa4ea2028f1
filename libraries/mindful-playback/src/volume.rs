//! Volume clamping

/// Clamp a requested volume to `[0.0, 1.0]`
///
/// NaN maps to silence; infinities clamp to the nearest bound.
pub fn clamp_volume(level: f32) -> f32 {
    if level.is_nan() {
        return 0.0;
    }
    level.clamp(0.0, 1.0)
}
