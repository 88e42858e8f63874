use std::env;
use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use flappy_term::game::{Game, RealtimePacer};
use flappy_term::sound::{Audio, Silent};
use flappy_term::term::{TermCanvas, TermInput, TerminalGuard};
use flappy_term::Settings;

const USAGE: &str = "\
Usage: flappy-term [--config <settings.json>] [--seed <n>]

Keys: UP or SPACE to flap, d toggles the debug panel, q or Esc quits.
Set FLAPPY_TERM_LOG=<file> to write a log (level from RUST_LOG).";

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    seed: Option<u64>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = Args::default();
    let mut it = env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "-c" | "--config" => {
                let path = it.next().context("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            "-s" | "--seed" => {
                let seed = it.next().context("--seed needs a number")?;
                args.seed = Some(seed.parse().with_context(|| format!("bad seed {seed:?}"))?);
            }
            other => bail!("unknown argument {other:?}\n\n{USAGE}"),
        }
    }
    Ok(Some(args))
}

/// Logs go to a file; the terminal belongs to the game
fn init_logging() -> Result<()> {
    let Some(path) = env::var_os("FLAPPY_TERM_LOG") else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("could not create log file {}", PathBuf::from(&path).display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

#[cfg(feature = "sound")]
fn open_audio(settings: &Settings) -> Box<dyn Audio> {
    if !settings.sound {
        return Box::new(Silent);
    }
    match flappy_term::sound::Synth::new() {
        Ok(synth) => Box::new(synth),
        Err(e) => {
            log::warn!("Sound disabled: {e}");
            Box::new(Silent)
        }
    }
}

#[cfg(not(feature = "sound"))]
fn open_audio(_settings: &Settings) -> Box<dyn Audio> {
    Box::new(Silent)
}

fn main() -> Result<()> {
    let Some(args) = parse_args()? else {
        println!("{USAGE}");
        return Ok(());
    };
    init_logging()?;

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    settings.validate()?;
    log::info!("Flappy Term starting at {} fps", settings.fps);

    let audio = open_audio(&settings);
    let guard = TerminalGuard::enter().context("could not set up the terminal")?;
    let canvas = TermCanvas::new(stdout()).context("could not read the terminal size")?;
    let mut game = Game::new(canvas, TermInput, RealtimePacer::default(), audio, settings);
    let outcome = game.run();
    drop(guard);

    outcome?;
    println!("Thanks for playing! Best score: {}", game.best());
    Ok(())
}
