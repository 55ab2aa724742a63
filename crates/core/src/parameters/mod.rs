//! Navigation parameter types
//!
//! Plain configuration records with defaults and range validation.
//! Loading them from files or a parameter store is left to the caller.

pub mod error;
pub mod navigation;

pub use error::ParameterError;
pub use navigation::NavigationParams;
