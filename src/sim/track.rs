//! Obstacle track
//!
//! Slots are kept in ascending column order. Each tick every slot moves one
//! column left, a new slot enters at the spawn column whenever the leading
//! slot reaches the spawn threshold, and the trailing slot is dropped once it
//! reaches the left edge. A slot's gate center is drawn once at spawn.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// One obstacle: a pipe pair at `position` with a gate around `gate`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub position: i32,
    pub gate: u8,
}

/// What happened during one `advance`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackChange {
    pub spawned: Option<Slot>,
    pub despawned: Option<Slot>,
}

#[derive(Debug, Clone)]
pub struct ObstacleTrack {
    slots: VecDeque<Slot>,
    rng: Pcg32,
}

impl ObstacleTrack {
    /// Seed the two starting slots with random gates
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let slots = INITIAL_SLOTS
            .iter()
            .map(|&position| Slot {
                position,
                gate: random_gate(&mut rng),
            })
            .collect();
        Self { slots, rng }
    }

    /// Build a track from explicit slots. Later spawns still use `seed`.
    pub fn from_slots(slots: impl IntoIterator<Item = Slot>, seed: u64) -> Self {
        let mut slots: Vec<Slot> = slots.into_iter().collect();
        slots.sort_by_key(|s| s.position);
        slots.dedup_by_key(|s| s.position);
        Self {
            slots: slots.into(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Scroll every slot one column left, spawning and dropping at the edges
    pub fn advance(&mut self) -> TrackChange {
        let mut change = TrackChange::default();

        if self.slots.back().is_some_and(|s| s.position == SPAWN_THRESHOLD) {
            let slot = Slot {
                position: SPAWN_POSITION,
                gate: random_gate(&mut self.rng),
            };
            self.slots.push_back(slot);
            change.spawned = Some(slot);
        }
        if self.slots.front().is_some_and(|s| s.position == DESPAWN_POSITION) {
            change.despawned = self.slots.pop_front();
        }

        for slot in &mut self.slots {
            slot.position -= 1;
        }
        change
    }

    /// Gate center of the slot at `position`, if any
    pub fn gate_at(&self, position: i32) -> Option<u8> {
        self.slots
            .binary_search_by_key(&position, |s| s.position)
            .ok()
            .map(|i| self.slots[i].gate)
    }

    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

fn random_gate(rng: &mut Pcg32) -> u8 {
    rng.random_range(GATE_MIN..=GATE_MAX)
}
