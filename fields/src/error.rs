use thiserror::Error;

use crate::modulus::Modulus;

/// Common result type used across this crate.
pub type Result<T, E = FieldError> = core::result::Result<T, E>;

/// Why an operation could not be carried out from either side.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum Unsupported {
    #[error(
        "neither operand dominates: degree {left} cannot be combined with degree {right}"
    )]
    NotDominant { left: usize, right: usize },
    #[error("exponent must be non-negative")]
    NegativeExponent,
    #[error("no inversion formula is defined for {0}")]
    NoInversionFormula(&'static str),
}

/// Top-level error type for field arithmetic.
///
/// Every variant is a contract violation by the caller; nothing here is
/// transient, so none of them is worth retrying.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum FieldError {
    #[error("incompatible moduli: {left:#x} and {right:#x}")]
    IncompatibleModulus { left: Modulus, right: Modulus },
    #[error("attempted to find the multiplicative inverse of zero")]
    ZeroInversion,
    #[error("expected {expected} coefficients, got {found}")]
    InvalidArity { expected: usize, found: usize },
    #[error("coefficients must have extension degree {expected}, got {found}")]
    DegreeMismatch { expected: usize, found: usize },
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(#[from] Unsupported),
}

impl FieldError {
    pub(crate) fn incompatible(left: &Modulus, right: &Modulus) -> Self {
        tracing::debug!(
            left_bits = left.bits(),
            right_bits = right.bits(),
            "rejecting operation across moduli"
        );
        Self::IncompatibleModulus {
            left: left.clone(),
            right: right.clone(),
        }
    }

    pub(crate) fn not_dominant(left: usize, right: usize) -> Self {
        tracing::trace!(left, right, "degree dominance failed");
        Unsupported::NotDominant { left, right }.into()
    }

    pub(crate) fn is_not_dominant(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedOperation(Unsupported::NotDominant { .. })
        )
    }

    /// Report a dominance failure raised further down the tower in terms of
    /// the degrees seen at this level. Other errors pass through.
    pub(crate) fn at_degrees(self, left: usize, right: usize) -> Self {
        if self.is_not_dominant() {
            Self::not_dominant(left, right)
        } else {
            self
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum ParseFieldElementError {
    #[error("empty input")]
    Empty,
    #[error("invalid digits for radix {radix}: `{input}`")]
    InvalidDigits { input: String, radix: u32 },
    #[error("non-canonical value {value} >= modulus")]
    NotCanonical { value: String },
    #[error("modulus must be positive")]
    ZeroModulus,
}
