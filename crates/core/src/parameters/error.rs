//! Parameter error types
//!
//! Provides error types for navigation parameter validation.

/// Errors from parameter validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterError {
    /// Numeric parameter outside its allowed range
    OutOfRange(&'static str),
    /// Position parameter names the `error` sector or line 0
    InvalidPosition(&'static str),
}

impl ParameterError {
    /// Name of the offending parameter
    pub const fn name(&self) -> &'static str {
        match self {
            ParameterError::OutOfRange(name) | ParameterError::InvalidPosition(name) => *name,
        }
    }
}

impl core::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParameterError::OutOfRange(name) => write!(f, "parameter {} out of range", name),
            ParameterError::InvalidPosition(name) => {
                write!(f, "parameter {} is not a valid position", name)
            }
        }
    }
}
