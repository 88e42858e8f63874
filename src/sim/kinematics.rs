//! Vertical motion after an impulse

/// Displacement `t` seconds after an upward impulse of speed `u` under gravity `g`.
///
/// Positive is up. `height(0, ..)` is always zero.
#[inline]
pub fn height(t: f64, u: f64, g: f64) -> f64 {
    u * t - 0.5 * g * t * t
}
