use thiserror::Error;

/// Errors raised while handling protocol input.
///
/// Everything except [`ProtocolError::Io`] is answered with an `ERROR`
/// line and the session carries on.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("i/o failure on the protocol channel: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported board size {0}")]
    UnsupportedBoardSize(String),

    #[error("malformed command: {0}")]
    MalformedCommand(String),

    #[error("invalid move {x},{y}")]
    InvalidMove { x: i32, y: i32 },

    #[error("board is full")]
    BoardFull,
}

impl ProtocolError {
    /// Whether the loop has to stop instead of replying `ERROR`.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProtocolError::Io(_))
    }
}
