//! Core infrastructure
//!
//! This module contains the infrastructure shared by the sortic_nav crates,
//! currently the target-independent logging macros.

pub mod logging;
