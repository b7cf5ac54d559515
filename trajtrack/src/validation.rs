//! Argument validation shared by the public setters and update methods.
//!
//! Every check returns [`Error::InvalidArgument`] naming the owning type,
//! the field or argument and the rejected value.

use crate::{Error, Result};

/// Reject NaN and infinities
pub(crate) fn require_finite(owner: &str, name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidArgument(format!(
            "{}: {} must be a finite number ({})",
            owner, name, value
        )))
    }
}

pub(crate) fn require_not_negative(owner: &str, name: &str, value: f64) -> Result<f64> {
    require_finite(owner, name, value)?;
    if value < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "{}: {} has a negative value ({})",
            owner, name, value
        )));
    }
    Ok(value)
}

pub(crate) fn require_positive(owner: &str, name: &str, value: f64) -> Result<f64> {
    require_finite(owner, name, value)?;
    if value <= 0.0 {
        return Err(Error::InvalidArgument(format!(
            "{}: {} has a negative/0 value ({})",
            owner, name, value
        )));
    }
    Ok(value)
}
