use thiserror::Error;

/// Result type for outline operations
pub type Result<T> = std::result::Result<T, OutlineError>;

/// Errors that can occur while extracting structure or routes
#[derive(Error, Debug)]
pub enum OutlineError {
    /// A route pattern failed to compile
    #[error("Invalid route pattern '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The scan root could not be used
    #[error(transparent)]
    Indexer(#[from] lens_indexer::IndexerError),
}

impl OutlineError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
