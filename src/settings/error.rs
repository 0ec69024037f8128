use thiserror::Error;

/// Errors raised by a [`ConfigStore`](super::store::ConfigStore) backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Malformed stored value: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors that can occur while reading or writing settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Settings store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("No such node: {0}")]
    UnknownNode(String),

    #[error("Stored value for `{key}` has the wrong type: {source}")]
    Decode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
