use thiserror::Error;

/// Shared error vocabulary for the simulation engine, the streaming
/// analytics, and the CLI surface.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invariant violated at clock={clock}: {detail}")]
    Invariant { clock: i64, detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub fn invariant(clock: i64, detail: impl Into<String>) -> Self {
        SimError::Invariant {
            clock,
            detail: detail.into(),
        }
    }

    /// Configuration and invariant errors are not safe to retry; I/O errors
    /// affect only the run that hit them.
    pub fn is_fatal_to_batch(&self) -> bool {
        matches!(self, SimError::Config(_))
    }
}

pub type SimResult<T> = Result<T, SimError>;
