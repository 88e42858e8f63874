use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("terminal I/O failed")]
    Io(#[from] std::io::Error),
    #[error("could not load settings from {path}")]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("settings file {path} could not be read")]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[cfg(feature = "sound")]
    #[error("no audio output available")]
    Audio(#[from] rodio::StreamError),
}

pub type Result<T> = std::result::Result<T, Error>;
