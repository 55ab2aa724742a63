//! Platform abstraction layer
//!
//! Drive implementations live here. The navigation core only sees the
//! [`DriveCtrl`](sortic_nav_core::drive::DriveCtrl) trait; hardware drives
//! are provided by the firmware image, the host mock below by this crate.

#[cfg(any(test, feature = "mock"))]
pub mod mock;
