use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The draft settings point at the local Whisper provider while the
    /// service is unreachable. Raised before any request is made.
    #[error(
        "local Whisper service is not available; start the service or choose another transcript provider"
    )]
    ProviderUnavailable,

    /// The server rejected a settings update with LOCAL_WHISPER_UNAVAILABLE.
    #[error("server rejected the update: local Whisper service is not available")]
    LocalWhisperRejected,

    /// The server responded with a non-success status and a message.
    #[error("{message}")]
    Server { message: String },

    /// The request never completed.
    #[error("network error, check your connection: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected response payload: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
