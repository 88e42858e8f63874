//! Flappy Term - steer a falling bird through scrolling gates in the terminal
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (kinematics, obstacle track, scoring, collisions)
//! - `game`: Start / run / end state machine, scene drawing and frame pacing
//! - `frame`: Render collaborator trait and an in-memory tagged cell grid
//! - `term`: crossterm-backed canvas, keyboard input and terminal setup
//! - `sound`: Audio cues (synthesized when the `sound` feature is on)

pub mod error;
pub mod frame;
pub mod game;
pub mod input;
pub mod settings;
pub mod sim;
pub mod sound;
pub mod term;

pub use error::{Error, Result};
pub use settings::Settings;

/// Game constants, in world units (one unit = one terminal cell)
pub mod consts {
    /// Default simulation rate
    pub const DEFAULT_FPS: u32 = 15;
    /// Upward speed given by an impulse (units/s)
    pub const DEFAULT_INITIAL_VELOCITY: f64 = 20.0;
    /// Downward acceleration (units/s²)
    pub const DEFAULT_GRAVITY: f64 = 15.0;
    /// Input is ignored until this long after the last impulse (s)
    pub const DEFAULT_IMPULSE_COOLDOWN: f64 = 0.5;

    /// World size. Slots spawn at column 185 and are 3 columns wide.
    pub const WORLD_WIDTH: u16 = 188;
    pub const WORLD_HEIGHT: u16 = 50;

    /// Screen row that corresponds to height 0
    pub const GROUND_ROW: i32 = 24;
    /// Rows past this are pulled back before drawing
    pub const UPPER_CLAMP_ROW: i32 = 49;
    /// The bird survives only while `PLAY_TOP < row < PLAY_BOTTOM`
    pub const PLAY_TOP: i32 = 1;
    pub const PLAY_BOTTOM: i32 = 48;

    /// Leftmost column of the bird sprite
    pub const BIRD_COLUMN: i32 = 90;
    /// Columns checked for a slot each tick (covers the sprite width)
    pub const WATCHED_COLUMNS: std::ops::RangeInclusive<i32> = 90..=95;

    /// Slot positions seeded at game start
    pub const INITIAL_SLOTS: [i32; 2] = [150, 185];
    /// When the leading slot reaches this column a new one is spawned
    pub const SPAWN_THRESHOLD: i32 = 150;
    /// Column new slots enter at
    pub const SPAWN_POSITION: i32 = 185;
    /// Slots at this column are dropped instead of scrolled
    pub const DESPAWN_POSITION: i32 = 1;
    /// Gate centers are drawn from this range
    pub const GATE_MIN: u8 = 3;
    pub const GATE_MAX: u8 = 7;
    /// Width of a pipe in columns
    pub const PIPE_WIDTH: i32 = 3;

    /// Seconds of play before the first point can be earned
    pub const SCORE_GRACE: f64 = 4.0;
    /// Ticks per point (divided by fps to get seconds)
    pub const SCORE_INTERVAL: f64 = 35.0;

    /// How long the game-over banner ignores input (s)
    pub const END_SCREEN_HOLD: f64 = 3.0;
}
