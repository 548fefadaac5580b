use thiserror::Error;

/// Errors raised by ensemble training, kernel evaluation, and circuit
/// construction. These are programming/configuration errors detected
/// synchronously; none are transient and none are retried.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A constructor or factory received arguments it cannot work with
    /// (empty classifier set, zero qubits, unknown topology tag, ...).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Two inputs disagree on dimensions.
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },

    /// An operation was called on a model in a state that cannot serve it,
    /// e.g. predict on an ensemble with no selected classifiers.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl ModelError {
    pub(crate) fn shape(expected: impl Into<String>, got: impl Into<String>) -> Self {
        ModelError::ShapeMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }
}
