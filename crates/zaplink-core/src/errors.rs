/// Shared error type for the zaplink crates.
///
/// Client adapters should map their specific errors into this type so session
/// logic can handle failures consistently (report back to the sender vs bail).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no active message context")]
    NotInitialized,

    #[error("message carries no downloadable media")]
    NoMedia,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("client error: {0}")]
    Client(String),
}

pub type Result<T> = std::result::Result<T, Error>;
