
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized, log in again at {login_url}")]
    Unauthorized { login_url: String },

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}
