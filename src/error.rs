//! Error types for the simulation core.
//!
//! Rejected thruster burns are not errors; they are silent no-ops. Errors are
//! reserved for bad configuration and numeric inputs that would otherwise
//! poison a score or the physics with NaN.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// A caller-supplied value cannot be used (e.g. a zero flight time)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A profile or settings field is non-finite or out of range
    #[error("invalid configuration: {field} = {value} ({reason})")]
    Configuration {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },

    #[error("unknown difficulty preset {0}")]
    UnknownPreset(u32),

    /// Versions must look like `major.minor.patch`
    #[error("unable to parse version '{0}'")]
    InvalidVersion(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Reject non-finite values for `field`.
pub(crate) fn ensure_finite(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimError::Configuration {
            field,
            value,
            reason: "must be finite",
        })
    }
}

/// Reject values that are not finite and strictly positive.
pub(crate) fn ensure_positive(field: &'static str, value: f32) -> Result<()> {
    ensure_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(SimError::Configuration {
            field,
            value,
            reason: "must be greater than zero",
        })
    }
}

/// Reject values that are not finite and non-negative.
pub(crate) fn ensure_non_negative(field: &'static str, value: f32) -> Result<()> {
    ensure_finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::Configuration {
            field,
            value,
            reason: "must not be negative",
        })
    }
}
