//! Resolution errors

use crate::types::DamageKind;
use thiserror::Error;

/// Error returned when an impact cannot be resolved
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DamageError {
    /// A numeric input is negative or non-finite, a target invariant is
    /// violated, or the descriptor does not belong to the requested kind
    #[error("invalid input `{field}`: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },
    /// No resolution algorithm is available for this kind
    #[error("unsupported damage kind: {0}")]
    UnsupportedKind(DamageKind),
}

impl DamageError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DamageError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, DamageError::InvalidInput { .. })
    }

    pub fn is_unsupported_kind(&self) -> bool {
        matches!(self, DamageError::UnsupportedKind(_))
    }
}

/// Reject negative, NaN and infinite values
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), DamageError> {
    if !value.is_finite() {
        return Err(DamageError::invalid(field, format!("{value} is not finite")));
    }
    if value < 0.0 {
        return Err(DamageError::invalid(field, format!("{value} is negative")));
    }
    Ok(())
}

/// Reject values outside `[0, 1]`
pub(crate) fn ensure_fraction(field: &'static str, value: f64) -> Result<(), DamageError> {
    ensure_non_negative(field, value)?;
    if value > 1.0 {
        return Err(DamageError::invalid(field, format!("{value} is greater than 1")));
    }
    Ok(())
}
