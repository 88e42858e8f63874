//! Sound cues
//!
//! The game only says *what* happened; an `Audio` decides what that sounds
//! like. Without the `sound` feature only `Silent` exists.

/// Something worth a sound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Upward impulse
    Flap,
    /// Run ended
    Crash,
}

pub trait Audio {
    fn play(&mut self, cue: Cue);
}

/// Plays nothing
#[derive(Debug, Default)]
pub struct Silent;

impl Audio for Silent {
    fn play(&mut self, _cue: Cue) {}
}

impl<A: Audio + ?Sized> Audio for Box<A> {
    fn play(&mut self, cue: Cue) {
        (**self).play(cue);
    }
}

/// Remembers every cue; handy for checking what a run would have played
#[derive(Debug, Default)]
pub struct CueLog {
    pub cues: Vec<Cue>,
}

impl Audio for CueLog {
    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}

#[cfg(feature = "sound")]
pub use synth::Synth;

#[cfg(feature = "sound")]
mod synth {
    use fundsp::prelude::*;
    use rodio::{OutputStream, OutputStreamHandle, Sink, buffer::SamplesBuffer};

    use super::{Audio, Cue};
    use crate::error::Result;

    const SAMPLE_RATE: u32 = 44_100;

    /// Synthesizes each cue once and plays it on the default output device
    pub struct Synth {
        // Dropping the stream stops all playback
        _stream: OutputStream,
        handle: OutputStreamHandle,
        flap: Vec<f32>,
        crash: Vec<f32>,
    }

    impl Synth {
        pub fn new() -> Result<Self> {
            let (stream, handle) = OutputStream::try_default()?;
            Ok(Self {
                _stream: stream,
                handle,
                flap: flap_samples(),
                crash: crash_samples(),
            })
        }
    }

    impl Audio for Synth {
        fn play(&mut self, cue: Cue) {
            let samples = match cue {
                Cue::Flap => self.flap.clone(),
                Cue::Crash => self.crash.clone(),
            };
            match Sink::try_new(&self.handle) {
                Ok(sink) => {
                    sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
                    sink.detach(); // Play in background
                }
                Err(e) => log::warn!("Could not play {cue:?}: {e}"),
            }
        }
    }

    /// Short rising chirp, 600Hz to 900Hz over 80ms
    fn flap_samples() -> Vec<f32> {
        let freq = lfo(|t: f32| lerp(600.0, 900.0, (t / 0.08).min(1.0)));
        let gain = lfo(|t: f32| lerp(0.12, 0.0, (t / 0.08).min(1.0)));
        render((freq >> sine()) * gain, 0.08)
    }

    /// Falling sawtooth, 400Hz to 80Hz over 0.4s, fading out over 0.5s
    fn crash_samples() -> Vec<f32> {
        let freq = lfo(|t: f32| lerp(400.0, 80.0, (t / 0.4).min(1.0)));
        let gain = lfo(|t: f32| lerp(0.15, 0.0, (t / 0.5).min(1.0)));
        render((freq >> saw()) * gain, 0.5)
    }

    fn render(mut unit: impl AudioUnit, seconds: f64) -> Vec<f32> {
        unit.set_sample_rate(f64::from(SAMPLE_RATE));
        let count = (f64::from(SAMPLE_RATE) * seconds) as usize;
        (0..count).map(|_| unit.get_mono()).collect()
    }
}
