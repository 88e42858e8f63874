//! Key symbols and the keyboard collaborator

use std::collections::VecDeque;
use std::fmt;
use std::io;

/// A key as the game sees it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Key {
    /// Nothing pending this tick
    #[default]
    None,
    /// Upward impulse
    Ascend,
    /// Show or hide the debug overlay
    ToggleDebug,
    /// Leave the game
    Quit,
    /// Any other printable key
    Char(char),
    /// Any other non-printable key
    Other,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::None => f.write_str(" "),
            Key::Ascend => f.write_str("UP"),
            Key::ToggleDebug => f.write_str("d"),
            Key::Quit => f.write_str("q"),
            Key::Char(c) => write!(f, "{c}"),
            Key::Other => f.write_str("?"),
        }
    }
}

/// Source of key presses
pub trait Input {
    /// Next pending key, or `Key::None` without blocking
    fn poll_key(&mut self) -> Key;

    /// Block until a key is pressed
    fn wait_key(&mut self) -> io::Result<Key>;

    /// Throw away everything pending
    fn drain(&mut self) {
        while self.poll_key() != Key::None {}
    }
}

/// Plays back fixed keys; used for headless runs.
///
/// Prompt keys answer `wait_key` (title and end screens), tick keys answer
/// `poll_key` one per poll while a run is going.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    prompts: VecDeque<Key>,
    ticks: VecDeque<Key>,
}

impl ScriptedInput {
    pub fn new(
        prompts: impl IntoIterator<Item = Key>,
        ticks: impl IntoIterator<Item = Key>,
    ) -> Self {
        Self {
            prompts: prompts.into_iter().collect(),
            ticks: ticks.into_iter().collect(),
        }
    }

    /// Prompt and tick keys not yet read
    pub fn remaining(&self) -> usize {
        self.prompts.len() + self.ticks.len()
    }
}

impl Input for ScriptedInput {
    fn poll_key(&mut self) -> Key {
        self.ticks.pop_front().unwrap_or(Key::None)
    }

    /// Skips `Key::None` entries; running out of prompts reads as `Quit`
    fn wait_key(&mut self) -> io::Result<Key> {
        while let Some(key) = self.prompts.pop_front() {
            if key != Key::None {
                return Ok(key);
            }
        }
        Ok(Key::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_poll_is_neutral_and_repeatable() {
        let mut input = ScriptedInput::default();
        for _ in 0..5 {
            assert_eq!(input.poll_key(), Key::None);
        }
    }

    #[test]
    fn test_scripted_prompts_and_ticks() {
        let mut input = ScriptedInput::new(
            [Key::None, Key::Char('x')],
            [Key::Ascend, Key::None, Key::ToggleDebug],
        );
        assert_eq!(input.poll_key(), Key::Ascend);
        assert_eq!(input.wait_key().unwrap(), Key::Char('x'));
        assert_eq!(input.poll_key(), Key::None);
        assert_eq!(input.poll_key(), Key::ToggleDebug);
        assert_eq!(input.remaining(), 0);
        assert_eq!(input.wait_key().unwrap(), Key::Quit);
    }

    #[test]
    fn test_drain_stops_at_gap() {
        let mut input =
            ScriptedInput::new([], [Key::Ascend, Key::Ascend, Key::None, Key::Quit]);
        input.drain();
        assert_eq!(input.poll_key(), Key::Quit);
    }

    #[test]
    fn test_display() {
        assert_eq!(Key::Ascend.to_string(), "UP");
        assert_eq!(Key::Char('k').to_string(), "k");
        assert_eq!(Key::None.to_string(), " ");
    }
}
