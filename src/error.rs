use std::io;

use thiserror::Error;

use crate::geometry::Pos;

#[derive(Debug, Error)]
pub enum SnekError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("position {pos} is outside the room lookup bounds 0..={width} x 0..={height}")]
    OutOfRange { pos: Pos, width: u16, height: u16 },

    /// The rendering surface cannot fit the room.
    #[error(
        "terminal is {available_width}x{available_height}, \
         need at least {needed_width}x{needed_height}"
    )]
    Size {
        needed_width: u16,
        needed_height: u16,
        available_width: u16,
        available_height: u16,
    },

    /// The player asked to leave.
    #[error("quit requested")]
    Quit,

    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl SnekError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SnekError::InvalidArgument(msg.into())
    }
}
