use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The proxy answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Failed to reach stats proxy: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to decode stats response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl FetchError {
    /// Prefers the proxy's own message, else a generic one naming the status.
    pub fn api(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("API error: {status}"));
        FetchError::Api { status, message }
    }
}

#[derive(Debug, Error)]
pub enum PickStoreError {
    #[error("Failed to access pick storage: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode picks: {0}")]
    Encode(#[from] serde_json::Error),
}
