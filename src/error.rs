use thiserror::Error;

/// Crate error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid day '{value}': expected YYYY-MM-DD")]
    InvalidDay {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("could not determine a data directory for this platform")]
    NoDataDir,

    #[error("could not create data directory: {0}")]
    DataDir(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
