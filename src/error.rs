//! Error types for chain setup and solving.

/// Errors surfaced to the host.
///
/// Degenerate geometry and non-convergence are never errors; they are
/// resolved inside the solve and reported through [`SolveReport`](crate::SolveReport).
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// A chain needs at least a root and an effector.
    #[error("chain needs at least 2 joints, got {count}")]
    TooFewJoints { count: usize },

    /// Live positions are not index-aligned with the chain model.
    #[error("expected {expected} joint positions, got {actual}")]
    JointCountMismatch { expected: usize, actual: usize },

    /// Tolerance must be finite and strictly positive.
    #[error("tolerance must be finite and > 0, got {0}")]
    InvalidTolerance(f32),

    /// NaN or infinity in a solve input.
    #[error("non-finite value in {0}")]
    NonFiniteInput(&'static str),

    /// Malformed JSON snapshot or configuration.
    #[error("snapshot parse error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// A flat float buffer that does not hold whole 3D vectors.
    #[error("flat buffer of length {len} is not a whole number of 3D vectors")]
    FlatBuffer { len: usize },
}

pub type Result<T> = std::result::Result<T, ChainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let e = ChainError::TooFewJoints { count: 1 };
        assert_eq!(e.to_string(), "chain needs at least 2 joints, got 1");

        let e = ChainError::JointCountMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(e.to_string(), "expected 3 joint positions, got 2");

        let e = ChainError::InvalidTolerance(-0.5);
        assert_eq!(e.to_string(), "tolerance must be finite and > 0, got -0.5");

        let e = ChainError::NonFiniteInput("target position");
        assert_eq!(e.to_string(), "non-finite value in target position");
    }

    #[test]
    fn test_json_error_converts() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: ChainError = err.into();
        assert!(e.to_string().starts_with("snapshot parse error:"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_error_is_send_sync() {
        assert_send_sync::<ChainError>();
    }
}
