//! Fixed-tick simulation
//!
//! Everything that decides the outcome of a run lives here. Nothing in this
//! module draws, sleeps or reads the keyboard:
//! - One call to `step` per tick, then `advance_clock` if still running
//! - Gate heights come from a seeded generator owned by the track

pub mod kinematics;
pub mod scoring;
pub mod state;
pub mod tick;
pub mod track;

pub use kinematics::height;
pub use scoring::score;
pub use state::{GameState, Physics};
pub use tick::{StepReport, collides, gate_opening, out_of_bounds, step};
pub use track::{ObstacleTrack, Slot};
