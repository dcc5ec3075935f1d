use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service error: {status} - {body}")]
    Service { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// Transport and service faults are transient: the caller may retry
    /// them within its attempt ceiling. A malformed body is not, and
    /// neither is a reqwest decode fault (same failure, different layer).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => !e.is_decode(),
            Self::Service { .. } => true,
            Self::MalformedResponse(_) => false,
        }
    }
}
