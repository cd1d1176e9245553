//! Error types for the hoops-analytics workspace.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the hoops-analytics workspace.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data error (invalid or missing data).
    #[error("Data error: {0}")]
    Data(String),

    /// An event whose shot outcome is outside {made, missed, null}.
    #[error("Malformed event in game {game_id}: unrecognized shot outcome {value:?}")]
    MalformedEvent {
        /// Game the offending event belongs to.
        game_id: String,
        /// The raw shot outcome text.
        value: String,
    },

    /// A team-game row with no matching game-context row.
    #[error("Join mismatch: {0}")]
    JoinMismatch(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a data error.
    pub fn data(msg: impl Into<String>) -> Self {
        Error::Data(msg.into())
    }

    /// Create a malformed event error.
    pub fn malformed_event(game_id: impl Into<String>, value: impl Into<String>) -> Self {
        Error::MalformedEvent {
            game_id: game_id.into(),
            value: value.into(),
        }
    }

    /// Create a join mismatch error.
    pub fn join_mismatch(msg: impl Into<String>) -> Self {
        Error::JoinMismatch(msg.into())
    }
}
