//! One simulation tick
//!
//! `step` applies the key, moves the bird, scrolls the track and decides
//! whether the run is over. The caller draws the frame in between and then
//! calls `GameState::advance_clock` if the run is still going.

use std::ops::RangeInclusive;

use super::kinematics::height;
use super::scoring::score;
use super::state::{GameState, Physics};
use super::track::{ObstacleTrack, TrackChange};
use crate::consts::*;
use crate::input::Key;

/// What a tick did, for the caller's sound and logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub key: Key,
    pub impulse: bool,
    pub collision: bool,
    pub out_of_bounds: bool,
    pub track: TrackChange,
}

impl StepReport {
    pub fn ended(&self) -> bool {
        self.collision || self.out_of_bounds
    }
}

/// Advance the run by one tick using `key` as this tick's input
pub fn step(state: &mut GameState, key: Key, physics: &Physics) -> StepReport {
    let mut report = StepReport {
        key,
        ..Default::default()
    };

    state.last_key = key;
    match key {
        Key::Ascend => {
            state.impulse_height = state.height;
            state.since_impulse = 0.0;
            report.impulse = true;
            log::debug!("Impulse at height {:.3}", state.height);
        }
        Key::ToggleDebug => state.debug_overlay = !state.debug_overlay,
        _ => {}
    }

    state.height = state.impulse_height
        + height(state.since_impulse, physics.initial_velocity, physics.gravity);
    // Only the bottom edge is clamped; the top is left for the bounds check
    state.row = screen_row(state.height).min(UPPER_CLAMP_ROW);

    report.track = state.track.advance();
    if let Some(slot) = report.track.spawned {
        log::debug!("Spawned gate {} at column {}", slot.gate, slot.position);
    }
    report.collision = collides(&state.track, state.row);

    state.score = score(state.elapsed, physics.fps);

    report.out_of_bounds = out_of_bounds(state.row);
    if report.ended() {
        state.running = false;
    }
    report
}

/// Rows the bird's center may occupy while passing a gate
pub fn gate_opening(gate: u8) -> RangeInclusive<i32> {
    let center = i32::from(gate) * 5;
    (center - 7)..=(center + 6)
}

/// Whether a slot in the watched columns has the bird outside its gate
pub fn collides(track: &ObstacleTrack, row: i32) -> bool {
    WATCHED_COLUMNS
        .filter_map(|column| track.gate_at(column))
        .any(|gate| !gate_opening(gate).contains(&row))
}

/// Whether `row` has left the open play band
pub fn out_of_bounds(row: i32) -> bool {
    !(PLAY_TOP < row && row < PLAY_BOTTOM)
}

fn screen_row(height: f64) -> i32 {
    GROUND_ROW.saturating_sub(height.round_ties_even() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::track::Slot;

    fn state_with_slots(slots: &[Slot]) -> GameState {
        let mut state = GameState::new(0, false);
        state.track = ObstacleTrack::from_slots(slots.iter().copied(), 0);
        state
    }

    /// Put the bird at `row` for the next step (no time passes)
    fn hold_at_row(state: &mut GameState, row: i32) {
        state.impulse_height = f64::from(GROUND_ROW - row);
        state.since_impulse = 0.0;
    }

    #[test]
    fn test_gate_opening_bounds() {
        assert_eq!(gate_opening(5), 18..=31);
        assert_eq!(gate_opening(3), 8..=21);
        assert_eq!(gate_opening(7), 28..=41);
    }

    #[test]
    fn test_collision_boundaries() {
        let track = ObstacleTrack::from_slots([Slot { position: 92, gate: 5 }], 0);
        assert!(collides(&track, 17));
        assert!(!collides(&track, 18));
        assert!(!collides(&track, 24));
        assert!(!collides(&track, 31));
        assert!(collides(&track, 32));
        assert!(collides(&track, 40));
    }

    #[test]
    fn test_no_collision_outside_watched_columns() {
        let track = ObstacleTrack::from_slots(
            [Slot { position: 89, gate: 3 }, Slot { position: 96, gate: 3 }],
            0,
        );
        assert!(!collides(&track, 45));
    }

    #[test]
    fn test_out_of_bounds() {
        assert!(out_of_bounds(0));
        assert!(out_of_bounds(1));
        assert!(!out_of_bounds(2));
        assert!(!out_of_bounds(24));
        assert!(!out_of_bounds(47));
        assert!(out_of_bounds(48));
        assert!(out_of_bounds(49));
        assert!(out_of_bounds(-5));
    }

    #[test]
    fn test_step_ends_run_at_top_edge() {
        let mut state = GameState::new(0, false);
        hold_at_row(&mut state, 0);
        let report = step(&mut state, Key::None, &Physics::default());
        assert_eq!(state.row, 0);
        assert!(report.out_of_bounds);
        assert!(!state.running);
    }

    #[test]
    fn test_step_clamps_bottom_and_ends_run() {
        let mut state = GameState::new(0, false);
        hold_at_row(&mut state, 60);
        let report = step(&mut state, Key::None, &Physics::default());
        assert_eq!(state.row, UPPER_CLAMP_ROW);
        assert!(report.out_of_bounds);
        assert!(!state.running);
    }

    #[test]
    fn test_step_continues_in_band() {
        let mut state = GameState::new(0, false);
        hold_at_row(&mut state, 24);
        let report = step(&mut state, Key::None, &Physics::default());
        assert_eq!(state.row, 24);
        assert!(!report.ended());
        assert!(state.running);
    }

    #[test]
    fn test_step_collides_after_scroll() {
        // Slot scrolls from 96 into the watched column 95
        let mut state = state_with_slots(&[Slot { position: 96, gate: 5 }]);
        hold_at_row(&mut state, 40);
        let report = step(&mut state, Key::None, &Physics::default());
        assert!(report.collision);
        assert!(!state.running);

        let mut state = state_with_slots(&[Slot { position: 96, gate: 5 }]);
        hold_at_row(&mut state, 18);
        let report = step(&mut state, Key::None, &Physics::default());
        assert!(!report.collision);
        assert!(state.running);
    }

    #[test]
    fn test_impulse_resets_baseline() {
        let physics = Physics::default();
        let mut state = GameState::new(0, false);
        for _ in 0..20 {
            step(&mut state, Key::None, &physics);
            state.advance_clock(&physics);
        }
        let before = state.height;
        let report = step(&mut state, Key::Ascend, &physics);
        assert!(report.impulse);
        assert_eq!(state.since_impulse, 0.0);
        assert_eq!(state.impulse_height, before);
        // Zero time since the impulse, so the bird has not moved yet
        assert_eq!(state.height, before);

        state.advance_clock(&physics);
        step(&mut state, Key::None, &physics);
        assert!(state.height > before);
    }

    #[test]
    fn test_debug_toggle_leaves_physics_alone() {
        let physics = Physics::default();
        let mut plain = GameState::new(3, false);
        let mut toggled = GameState::new(3, false);
        for _ in 0..5 {
            step(&mut plain, Key::None, &physics);
            plain.advance_clock(&physics);
            step(&mut toggled, Key::None, &physics);
            toggled.advance_clock(&physics);
        }
        step(&mut plain, Key::None, &physics);
        step(&mut toggled, Key::ToggleDebug, &physics);
        assert!(toggled.debug_overlay);
        assert_eq!(toggled.height, plain.height);
        assert_eq!(toggled.since_impulse, plain.since_impulse);
        assert_eq!(toggled.last_key, Key::ToggleDebug);
    }

    #[test]
    fn test_neutral_steps_only_follow_the_clock() {
        let physics = Physics::default();
        let mut state = GameState::new(11, true);
        step(&mut state, Key::None, &physics);
        let first = state.clone();
        // Same clock, same key: nothing but the track moves
        step(&mut state, Key::None, &physics);
        assert_eq!(state.height, first.height);
        assert_eq!(state.row, first.row);
        assert_eq!(state.impulse_height, first.impulse_height);
        assert_eq!(state.debug_overlay, first.debug_overlay);
        assert_eq!(state.last_key, Key::None);
    }

    #[test]
    fn test_ten_neutral_ticks_follow_parabola() {
        let physics = Physics::default();
        let mut state = GameState::new(2024, false);
        let start: Vec<Slot> = state.track.slots().copied().collect();

        let mut heights = Vec::new();
        for _ in 0..10 {
            let report = step(&mut state, Key::None, &physics);
            assert!(!report.ended());
            heights.push(state.height);
            state.advance_clock(&physics);
        }

        for (n, h) in heights.iter().enumerate() {
            let t = n as f64 / 15.0;
            assert!((h - (20.0 * t - 7.5 * t * t)).abs() < 1e-9);
        }
        let end: Vec<Slot> = state.track.slots().copied().collect();
        assert_eq!(end.len(), start.len());
        for (before, after) in start.iter().zip(&end) {
            assert_eq!(after.position, before.position - 10);
            assert_eq!(after.gate, before.gate);
        }
    }

    #[test]
    fn test_score_follows_elapsed_time() {
        let physics = Physics::default();
        let mut state = GameState::new(0, false);
        state.track = ObstacleTrack::from_slots(std::iter::empty(), 0);
        state.elapsed = 4.0;
        hold_at_row(&mut state, 24);
        step(&mut state, Key::None, &physics);
        assert_eq!(state.score, 1);
    }
}
