use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A caller precondition was violated (empty field, zero k, bad
    /// threshold, zero-magnitude embedding).
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// A song with this title already exists in the discography.
    #[error("duplicate song title: {0}")]
    DuplicateTitle(String),

    /// An embedding's dimensionality does not match the rest of the
    /// discography.
    #[error("embedding for '{title}' has dimension {actual}, expected {expected}")]
    DimensionMismatch {
        title: String,
        expected: usize,
        actual: usize,
    },

    /// A selection or prompt was requested from a discography with no
    /// songs.
    #[error("discography for '{artist}' has no songs")]
    EmptyDiscography { artist: String },

    /// The prompt trimming loop ran out of songs while still over the
    /// token budget.
    #[error("token budget exhausted: a single song block costs {tokens} tokens against a limit of {limit}")]
    BudgetExhausted { limit: usize, tokens: usize },

    /// A collaborator (e.g. the token counter) failed while a core
    /// operation was in progress.
    #[error("external service error from {service}: {message}")]
    External { service: String, message: String },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
