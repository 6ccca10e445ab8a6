//! Error types for CyberSakhi

/// Result type alias using CyberSakhi's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for CyberSakhi operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The remote classifier or LLM could not be reached or answered with a failure
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote call did not complete within its deadline
    #[error("operation timed out")]
    Timeout,

    /// The remote response could not be interpreted at all
    #[error("schema error: {0}")]
    Schema(String),

    /// Blank input was rejected before any remote call
    #[error("input is empty")]
    EmptyInput,

    /// An analysis is already outstanding for this detector
    #[error("an analysis is already in progress")]
    AnalysisInProgress,

    /// The in-flight call was cancelled by the caller
    #[error("operation cancelled")]
    Cancelled,

    /// User-supplied data failed validation
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

}

impl Error {
    /// Create a new transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new schema error
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the remote call itself failed (as opposed to returning something unusable).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout)
    }

    /// Short machine-readable kind, used as a metrics label and in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Timeout => "timeout",
            Self::Schema(_) => "schema",
            Self::EmptyInput => "empty_input",
            Self::AnalysisInProgress => "in_progress",
            Self::Cancelled => "cancelled",
            Self::Validation(_) => "validation",
            Self::Config(_) => "config",
        }
    }
}
