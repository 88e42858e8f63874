//! Survival-time scoring

use crate::consts::{SCORE_GRACE, SCORE_INTERVAL};

/// Points earned after `elapsed` seconds at a fixed `fps`.
///
/// `floor((elapsed - 4) / (35 / fps)) + 1`, never below zero.
pub fn score(elapsed: f64, fps: u32) -> u32 {
    let interval = SCORE_INTERVAL / f64::from(fps);
    let points = ((elapsed - SCORE_GRACE) / interval).floor() + 1.0;
    if points <= 0.0 { 0 } else { points as u32 }
}
