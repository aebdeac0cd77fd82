//! Error types for gifcap.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid capture region: width and height must be non-zero")]
    InvalidRegion,

    #[error("Invalid capture configuration: {0}")]
    InvalidConfig(String),

    #[error("A recording is already in progress")]
    AlreadyRecording,

    #[error("No recording in progress")]
    NotRecording,

    #[error("Screen capture failed: {0}")]
    CaptureFailed(String),

    #[error("GIF encoding failed: {0}")]
    EncodeFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
