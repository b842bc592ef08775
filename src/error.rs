use thiserror::Error;

/// Error types for the k-means engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KMeansError {
    /// Bad k, unknown policy, too few points, manual centroid count mismatch,
    /// empty point set or zero step budget
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Operation needs a completed fit
    #[error("Model has not been fitted. Call fit() first.")]
    NotInitialized,

    /// Point or centroid width disagrees with the point set
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),
}
