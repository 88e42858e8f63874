//! Headless play-throughs

use flappy_term::Settings;
use flappy_term::consts::*;
use flappy_term::frame::{Frame, Tag};
use flappy_term::game::{Game, SessionEnd, Unpaced};
use flappy_term::input::{Key, ScriptedInput};
use flappy_term::sim::{GameState, ObstacleTrack, Physics, score, step};
use flappy_term::sound::{CueLog, Cue};

fn settings(seed: u64) -> Settings {
    Settings {
        seed: Some(seed),
        ..Default::default()
    }
}

fn headless(input: ScriptedInput, seed: u64) -> Game<Frame, ScriptedInput, Unpaced, CueLog> {
    Game::new(
        Frame::world(),
        input,
        Unpaced::default(),
        CueLog::default(),
        settings(seed),
    )
}

fn screen(frame: &Frame) -> Vec<String> {
    (0..frame.height() as i32).map(|row| frame.row_text(row)).collect()
}

#[test]
fn crash_then_quit_shows_game_over() {
    let mut game = headless(ScriptedInput::new([Key::Char('g')], []), 7);
    game.run().unwrap();

    let frame = game.canvas();
    assert!(frame.contains_text("Points: 0"));
    assert!(frame.contains_text("r to play again"));
    // The last tick is still on screen under the banner
    assert!(frame.cells().any(|(_, _, c)| c.tag == Tag::Bird));
    assert_eq!(game.audio().cues, vec![Cue::Crash]);
}

#[test]
fn replay_starts_a_fresh_session() {
    // Start, crash, play again, start, crash, then the prompts run dry (quit)
    let prompts = [Key::Char('g'), Key::Char('r'), Key::Char('g')];
    let mut game = headless(ScriptedInput::new(prompts, []), 7);
    game.run().unwrap();

    assert_eq!(game.audio().cues, vec![Cue::Crash, Cue::Crash]);
    // Two free falls of the same length
    assert_eq!(game.pacer().ticks % 2, 0);
    assert_eq!(game.best(), 0);
}

#[test]
fn quit_mid_run_skips_the_banner() {
    // Input is first read once the start-of-run cooldown has passed
    let mut game = headless(ScriptedInput::new([Key::Char('g')], [Key::Quit]), 3);
    let end = game.play_session().unwrap();

    assert_eq!(end, SessionEnd::Quit);
    assert_eq!(game.pacer().ticks, 8);
    assert!(!game.canvas().contains_text("r to play again"));
    assert!(game.audio().cues.is_empty());
}

#[test]
fn same_seed_same_screens() {
    let mut a = headless(ScriptedInput::new([Key::Char('g')], []), 99);
    let mut b = headless(ScriptedInput::new([Key::Char('g')], []), 99);
    a.play_session().unwrap();
    b.play_session().unwrap();
    assert_eq!(screen(a.canvas()), screen(b.canvas()));
}

#[test]
fn hovering_bird_scores_with_time() {
    let physics = Physics::default();
    let mut state = GameState::new(0, false);
    state.track = ObstacleTrack::from_slots(std::iter::empty(), 0);

    let mut last_score = 0;
    for _ in 0..600 {
        let key = if state.accepts_input(&physics) && state.row >= 30 {
            Key::Ascend
        } else {
            Key::None
        };
        let report = step(&mut state, key, &physics);
        assert!(!report.ended(), "hovering bird left the band at row {}", state.row);
        assert!(state.row > PLAY_TOP && state.row < PLAY_BOTTOM);
        assert!(state.score >= last_score);
        assert_eq!(state.score, score(state.elapsed, physics.fps));
        last_score = state.score;
        state.advance_clock(&physics);
    }
    assert!(last_score > 10);
}

#[test]
fn debug_key_toggles_overlay_mid_run() {
    let mut settings = settings(5);
    settings.show_debug = false;
    let mut game = Game::new(
        Frame::world(),
        ScriptedInput::new([Key::Char('g')], [Key::ToggleDebug]),
        Unpaced::default(),
        CueLog::default(),
        settings,
    );
    game.play_session().unwrap();
    // The toggle was read on the ninth tick and stays on until the crash
    assert!(game.canvas().contains_text("Key Pressed"));
    assert!(game.canvas().contains_text("FPS              : 15"));
}
