//! Game loop
//!
//! A session goes `AwaitingStart -> Running -> Ended` and never leaves
//! `Ended`; playing again starts a new session with a fresh `GameState`.
//! `Game` drives sessions against the canvas, keyboard, pacer and audio
//! collaborators.

use std::thread;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::error::Result;
use crate::frame::{Attr, Canvas, Tag};
use crate::input::{Input, Key};
use crate::settings::Settings;
use crate::sim::{GameState, ObstacleTrack, Physics, StepReport, step};
use crate::sound::{Audio, Cue};

// ── Session ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingStart,
    Running,
    Ended,
}

/// One play-through, from the title screen to the crash
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    physics: Physics,
    phase: Phase,
}

impl Session {
    pub fn new(seed: u64, settings: &Settings) -> Self {
        Self {
            state: GameState::new(seed, settings.show_debug),
            physics: settings.physics(),
            phase: Phase::AwaitingStart,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    /// Leave the title screen
    pub fn start(&mut self) {
        if self.phase == Phase::AwaitingStart {
            self.phase = Phase::Running;
        }
    }

    /// Whether a key should be read for the next tick
    pub fn wants_input(&self) -> bool {
        self.phase == Phase::Running && self.state.accepts_input(&self.physics)
    }

    /// Simulate one tick. `None` unless the session is running.
    pub fn tick(&mut self, key: Key) -> Option<StepReport> {
        if self.phase != Phase::Running {
            return None;
        }
        let report = step(&mut self.state, key, &self.physics);
        if !self.state.running {
            self.phase = Phase::Ended;
        }
        Some(report)
    }

    /// Move the clocks on after a tick has been drawn
    pub fn advance_clock(&mut self) {
        if self.phase == Phase::Running {
            self.state.advance_clock(&self.physics);
        }
    }
}

// ── Pacing ──────────────────────────────────────────────────────────────────

/// Holds the loop to the tick rate
pub trait Pacer {
    /// Wait out whatever is left of a tick of length `tick`
    fn end_tick(&mut self, tick: Duration);

    /// Do nothing for `duration`
    fn hold(&mut self, duration: Duration);
}

/// Sleeps for the rest of each tick, measured from the end of the last one
#[derive(Debug)]
pub struct RealtimePacer {
    tick_start: Instant,
}

impl Default for RealtimePacer {
    fn default() -> Self {
        Self {
            tick_start: Instant::now(),
        }
    }
}

impl Pacer for RealtimePacer {
    fn end_tick(&mut self, tick: Duration) {
        let elapsed = self.tick_start.elapsed();
        if elapsed < tick {
            thread::sleep(tick - elapsed);
        }
        self.tick_start = Instant::now();
    }

    fn hold(&mut self, duration: Duration) {
        thread::sleep(duration);
        self.tick_start = Instant::now();
    }
}

/// Never waits; for headless runs
#[derive(Debug, Default)]
pub struct Unpaced {
    pub ticks: u64,
}

impl Pacer for Unpaced {
    fn end_tick(&mut self, _tick: Duration) {
        self.ticks += 1;
    }

    fn hold(&mut self, _duration: Duration) {}
}

// ── Game ────────────────────────────────────────────────────────────────────

/// How a session finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Crashed { score: u32 },
    Quit,
}

pub struct Game<C, I, P, A> {
    canvas: C,
    input: I,
    pacer: P,
    audio: A,
    settings: Settings,
    seeds: Pcg32,
    best: u32,
}

impl<C: Canvas, I: Input, P: Pacer, A: Audio> Game<C, I, P, A> {
    pub fn new(canvas: C, input: I, pacer: P, audio: A, settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Gate seed: {seed}");
        Self {
            canvas,
            input,
            pacer,
            audio,
            settings,
            seeds: Pcg32::seed_from_u64(seed),
            best: 0,
        }
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Best score of any session so far
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Play sessions until the player quits
    pub fn run(&mut self) -> Result<()> {
        loop {
            let SessionEnd::Crashed { score } = self.play_session()? else {
                log::info!("Player quit");
                return Ok(());
            };

            self.best = self.best.max(score);
            draw_game_over(&mut self.canvas, score, self.best);
            self.canvas.present()?;

            // Keys mashed while crashing should not skip the banner
            self.pacer.hold(Duration::from_secs_f64(END_SCREEN_HOLD));
            self.input.drain();

            match self.input.wait_key()? {
                Key::Char('r') | Key::Char('R') => log::info!("Starting another session"),
                _ => return Ok(()),
            }
        }
    }

    /// Title screen, then ticks until the bird crashes or the player quits
    pub fn play_session(&mut self) -> Result<SessionEnd> {
        let seed = self.seeds.random::<u64>();
        let mut session = Session::new(seed, &self.settings);

        self.canvas.clear();
        draw_title(&mut self.canvas);
        self.canvas.present()?;
        if self.input.wait_key()? == Key::Quit {
            return Ok(SessionEnd::Quit);
        }
        session.start();
        log::info!("Session started (seed {seed})");

        let tick = Duration::from_secs_f64(session.physics().dt());
        loop {
            let key = if session.wants_input() {
                self.input.poll_key()
            } else {
                Key::None
            };
            if key == Key::Quit {
                return Ok(SessionEnd::Quit);
            }

            let Some(report) = session.tick(key) else {
                break;
            };
            if report.impulse {
                self.audio.play(Cue::Flap);
            }
            if let Some(slot) = report.track.despawned {
                log::debug!("Gate {} left the screen", slot.gate);
            }

            draw_scene(&mut self.canvas, session.state(), session.physics());
            self.canvas.present()?;

            if session.phase() == Phase::Ended {
                let state = session.state();
                log::info!(
                    "Run ended after {:.2}s at row {} ({}) with {} points",
                    state.elapsed,
                    state.row,
                    if report.collision { "hit a pipe" } else { "left the sky" },
                    state.score
                );
                self.audio.play(Cue::Crash);
                return Ok(SessionEnd::Crashed { score: state.score });
            }

            session.advance_clock();
            self.pacer.end_tick(tick);
        }
        Ok(SessionEnd::Crashed {
            score: session.state().score,
        })
    }
}

// ── Drawing ─────────────────────────────────────────────────────────────────

const BIRD_SPRITE: [(i32, &str); 3] = [(1, "/^\\"), (0, "(  o>"), (1, "\\_/")];

#[rustfmt::skip]
const TITLE: [&str; 5] = [
    r" _____ _        _    ____  ______   __",
    r"|  ___| |      / \  |  _ \|  _ \ \ / /",
    r"| |_  | |     / _ \ | |_) | |_) \ V / ",
    r"|  _| | |___ / ___ \|  __/|  __/ | |  ",
    r"|_|   |_____/_/   \_\_|   |_|    |_|  ",
];

#[rustfmt::skip]
const GAME_OVER: [&str; 5] = [
    r"  ____    _    __  __ _____    _____     _______ ____  ",
    r" / ___|  / \  |  \/  | ____|  / _ \ \   / / ____|  _ \ ",
    r"| |  _  / _ \ | |\/| |  _|   | | | \ \ / /|  _| | |_) |",
    r"| |_| |/ ___ \| |  | | |___  | |_| |\ V / | |___|  _ < ",
    r" \____/_/   \_\_|  |_|_____|  \___/  \_/  |_____|_| \_\",
];

const DEBUG_PANEL_WIDTH: usize = 30;

/// Clear and draw one tick: pipes, the bird and maybe the debug panel
pub fn draw_scene(canvas: &mut impl Canvas, state: &GameState, physics: &Physics) {
    canvas.clear();
    draw_pipes(canvas, &state.track);
    draw_bird(canvas, state.row);
    if state.debug_overlay {
        draw_debug(canvas, state, physics);
    }
}

/// Three-row sprite centered on `row`
pub fn draw_bird(canvas: &mut impl Canvas, row: i32) {
    for (dy, (indent, line)) in BIRD_SPRITE.iter().enumerate() {
        canvas.draw_run(
            row - 1 + dy as i32,
            BIRD_COLUMN + indent,
            line,
            Tag::Bird,
            Attr::empty(),
        );
    }
}

/// Top and bottom pipe for every slot, leaving the gate open
pub fn draw_pipes(canvas: &mut impl Canvas, track: &ObstacleTrack) {
    let bottom = i32::from(WORLD_HEIGHT);
    for slot in track.slots() {
        let center = i32::from(slot.gate) * 5;
        for dx in 0..PIPE_WIDTH {
            let col = slot.position + dx;
            canvas.draw_vline(0, col, '|', center - 8, Tag::Pipe, Attr::empty());
            canvas.draw_vline(center + 8, col, '|', bottom, Tag::Pipe, Attr::empty());
        }
    }
}

/// Diagnostic panel in the top-left corner of the view
pub fn draw_debug(canvas: &mut impl Canvas, state: &GameState, physics: &Physics) {
    let view = canvas.viewport();
    let lines = [
        format!("Key Pressed      : {}", state.last_key),
        format!("Terminal Columns : {}", view.cols),
        format!("Terminal Rows    : {}", view.rows),
        format!("FPS              : {}", physics.fps),
        format!("Initial Velocity : {}", round3(physics.initial_velocity)),
        format!("Height           : {}", round3(state.height)),
        format!("Ordinate         : {}", state.row),
        format!("Real Time        : {}", round3(state.elapsed)),
        format!("Last Impulse     : {}", round3(state.since_impulse)),
        format!("Points           : {}", state.score),
    ];
    for (row, line) in lines.iter().enumerate() {
        let padded = format!("{line:<width$}", width = DEBUG_PANEL_WIDTH);
        canvas.draw_run(row as i32, view.left, &padded, Tag::Text, Attr::empty());
    }
}

pub fn draw_title(canvas: &mut impl Canvas) {
    let view = canvas.viewport();
    let top = view.centered_row(TITLE.len() + 6);
    draw_banner(canvas, top, &TITLE, Attr::BOLD | Attr::BLINK);

    let below = top + TITLE.len() as i32 + 2;
    let prompt = "Press any key to start game";
    canvas.draw_run(below, view.centered_col(prompt.len()), prompt, Tag::Text, Attr::empty());
    let help = "UP/SPACE flap   d debug   q quit";
    canvas.draw_run(below + 2, view.centered_col(help.len()), help, Tag::Text, Attr::empty());
}

/// Banner and score drawn over whatever is on the canvas
pub fn draw_game_over(canvas: &mut impl Canvas, score: u32, best: u32) {
    let view = canvas.viewport();
    let top = view.centered_row(GAME_OVER.len() + 6);
    draw_banner(canvas, top, &GAME_OVER, Attr::BOLD);

    let below = top + GAME_OVER.len() as i32 + 1;
    let points = format!(" Points: {score} ");
    canvas.draw_run(
        below,
        view.centered_col(points.len()),
        &points,
        Tag::Text,
        Attr::BOLD | Attr::STANDOUT,
    );
    let best = format!(" Best: {best} ");
    canvas.draw_run(below + 1, view.centered_col(best.len()), &best, Tag::Text, Attr::BOLD);
    let help = " r to play again, any other key to quit ";
    canvas.draw_run(below + 3, view.centered_col(help.len()), help, Tag::Text, Attr::empty());
}

fn draw_banner(canvas: &mut impl Canvas, top: i32, lines: &[&str], attr: Attr) {
    let width = lines.iter().map(|l| l.len()).max().unwrap_or(0);
    let col = canvas.viewport().centered_col(width);
    for (i, line) in lines.iter().enumerate() {
        canvas.draw_run(top + i as i32, col, line, Tag::Text, attr);
    }
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
