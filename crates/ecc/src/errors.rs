use thiserror::Error;

/// Errors surfaced by the fallible algebra operations.
///
/// All failures are local input-validation or invariant violations; nothing
/// here is retryable and no operation returns a partial result.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgebraError {
    /// Modular inverse of zero, square root of a non-residue, or an
    /// off-curve / identity point fed to a pairing precomputation.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// A precomputed line-coefficient stream did not have the length the
    /// Miller loop consumes. Indicates a programmer error in precomputation.
    #[error("precomputation mismatch: loop consumes {consumed} line coefficients, {available} available")]
    PrecomputationMismatch { available: usize, consumed: usize },

    /// Vector length disagreement between bases and scalars.
    #[error("domain mismatch: {bases} bases against {scalars} scalars")]
    DomainMismatch { bases: usize, scalars: usize },
}

pub type AlgebraResult<T> = Result<T, AlgebraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let e = AlgebraError::InvalidInput("inverse of zero");
        assert_eq!(e.to_string(), "invalid input: inverse of zero");

        let e = AlgebraError::PrecomputationMismatch {
            available: 86,
            consumed: 87,
        };
        assert!(e.to_string().contains("87"));
        assert!(e.to_string().contains("86"));

        let e = AlgebraError::DomainMismatch {
            bases: 3,
            scalars: 4,
        };
        assert_eq!(e.to_string(), "domain mismatch: 3 bases against 4 scalars");
    }
}
