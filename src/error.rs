use reqwest::StatusCode;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum MartError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("remote returned status {0}")]
    RemoteStatus(StatusCode),

    #[error("malformed remote response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("persisted store image is corrupt: {0}")]
    CorruptStore(String),

    #[error("persistence I/O error: {0}")]
    Persistence(#[from] std::io::Error),
}

impl MartError {
    /// Error classes that degrade silently to the local store instead of
    /// surfacing to the caller. Probe success only proves the remote answers
    /// OPTIONS; the actual call can still fail in flight or hand back garbage.
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            MartError::Transport(_)
                | MartError::RemoteStatus(_)
                | MartError::MalformedResponse(_)
        )
    }
}
