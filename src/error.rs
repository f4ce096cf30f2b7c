use thiserror::Error;

/// The only fault class that aborts an analysis: the page could not be
/// read at all. Everything downstream degrades instead of failing.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("page fetch for {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("page fetch failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Assessor faults are recovered locally with the documented fallback
/// assessment; they never propagate to the caller.
#[derive(Error, Debug)]
pub enum AssessorError {
    #[error("assessor request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("assessor returned HTTP {0}")]
    Status(u16),

    #[error("assessor response violated the expected schema: {0}")]
    Schema(String),
}

/// Persistence faults are logged and discarded; they never affect the
/// response returned to the caller.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}
