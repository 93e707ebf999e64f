use thiserror::Error;

/// Failures reported by, or while talking to, the wallet extension.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// No wallet extension has injected itself into the page.
    #[error("No wallet extension detected")]
    Unavailable,
    /// The user dismissed the wallet prompt.
    #[error("Request rejected by user: {0}")]
    Rejected(String),
    #[error("Wallet error: {0}")]
    Wallet(String),
    /// The wallet answered with something we cannot interpret.
    #[error("Invalid wallet response: {0}")]
    InvalidResponse(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl WalletError {
    /// Whether the failure came from the user rather than the wallet itself.
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}
