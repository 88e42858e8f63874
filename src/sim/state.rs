//! Game state and simulation parameters

use crate::consts::*;
use crate::input::Key;

use super::track::ObstacleTrack;

/// Constants a run is simulated with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    pub fps: u32,
    pub initial_velocity: f64,
    pub gravity: f64,
    pub impulse_cooldown: f64,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            initial_velocity: DEFAULT_INITIAL_VELOCITY,
            gravity: DEFAULT_GRAVITY,
            impulse_cooldown: DEFAULT_IMPULSE_COOLDOWN,
        }
    }
}

impl Physics {
    /// Length of one tick in seconds
    pub fn dt(&self) -> f64 {
        1.0 / f64::from(self.fps)
    }
}

/// Everything that changes during a run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seconds since the run started
    pub elapsed: f64,
    /// Seconds since the last impulse
    pub since_impulse: f64,
    /// Height when the last impulse happened
    pub impulse_height: f64,
    /// Height above the ground row, positive is up
    pub height: f64,
    /// Screen row of the bird's center
    pub row: i32,
    pub score: u32,
    pub track: ObstacleTrack,
    pub running: bool,
    pub debug_overlay: bool,
    /// Key seen this tick
    pub last_key: Key,
}

impl GameState {
    pub fn new(seed: u64, debug_overlay: bool) -> Self {
        Self {
            elapsed: 0.0,
            since_impulse: 0.0,
            impulse_height: 0.0,
            height: 0.0,
            row: GROUND_ROW,
            score: 0,
            track: ObstacleTrack::new(seed),
            running: true,
            debug_overlay,
            last_key: Key::None,
        }
    }

    /// Whether a key may be read this tick
    pub fn accepts_input(&self, physics: &Physics) -> bool {
        self.since_impulse > physics.impulse_cooldown
    }

    /// Move both clocks forward by one tick
    pub fn advance_clock(&mut self, physics: &Physics) {
        let dt = physics.dt();
        self.elapsed += dt;
        self.since_impulse += dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(12345, false);
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.height, 0.0);
        assert_eq!(state.row, GROUND_ROW);
        assert_eq!(state.score, 0);
        assert_eq!(state.track.len(), 2);
        assert!(state.running);
        assert_eq!(state.last_key, Key::None);
    }

    #[test]
    fn test_advance_clock() {
        let physics = Physics::default();
        let mut state = GameState::new(1, true);
        for _ in 0..15 {
            state.advance_clock(&physics);
        }
        assert!((state.elapsed - 1.0).abs() < 1e-9);
        assert!((state.since_impulse - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_input_cooldown() {
        let physics = Physics::default();
        let mut state = GameState::new(1, true);
        assert!(!state.accepts_input(&physics));
        // 8 ticks at 15 fps is 0.533 s
        for _ in 0..8 {
            state.advance_clock(&physics);
        }
        assert!(state.accepts_input(&physics));
    }
}
