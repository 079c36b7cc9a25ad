// Error types for generation requests

use thiserror::Error;

/// Everything that can go wrong between a user action and a region update.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// Input rejected locally, no request issued
    #[error("{0}")]
    Validation(String),

    /// Network, auth or API-level failure
    #[error("Request to the generation service failed: {0}")]
    Transport(String),

    /// The completion could not be decoded as a JSON array of strings
    #[error("The AI returned an unexpected format for {context}. Please try again.")]
    Format { context: String },
}

impl GenerationError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn format(context: impl Into<String>) -> Self {
        Self::Format {
            context: context.into(),
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
