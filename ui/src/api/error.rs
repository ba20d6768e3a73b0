use thiserror::Error;

/// Failure taxonomy at the fetch boundary.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("unexpected payload from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Server-declared "no data" (`status: "empty"` or an empty `data` array).
    #[error("{0}")]
    Empty(String),

    /// Server-declared error carried in a 200 payload.
    #[error("{0}")]
    Server(String),
}

impl FetchError {
    pub fn is_empty_signal(&self) -> bool {
        matches!(self, Self::Empty(_))
    }

    /// Human readable text for inline error banners.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Empty(message) | Self::Server(message) if !message.trim().is_empty() => {
                message.clone()
            }
            _ => fallback.to_string(),
        }
    }
}
