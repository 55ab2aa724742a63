#![cfg_attr(not(test), no_std)]

//! sortic_nav - Navigation controller for sortic shuttle vehicles
//!
//! This library hosts the target-facing glue around the pure navigation
//! logic in `sortic_nav_core`: logging, the queued navigation task and the
//! drive platform layer.

// Logging macros (log_info!, log_warn!, ...)
pub mod core;

// Queued command front-end
pub mod navigation;

// Drive implementations
pub mod platform;

pub use sortic_nav_core as nav_core;
