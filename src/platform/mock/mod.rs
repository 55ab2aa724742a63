//! Scripted drive for host-side tests
//!
//! [`MockDrive`] completes each primitive after a fixed number of polls and can
//! fail one chosen primitive, so controller and task tests can walk every
//! maneuver and fault path without a vehicle. It records the commands it was
//! given. Built for tests and behind the `mock` feature.
//!
//! # Example
//!
//! ```ignore
//! use sortic_nav::platform::mock::MockDrive;
//! use sortic_nav_core::drive::{DriveCommand, DriveCtrl, DriveStatus};
//!
//! let mut drive = MockDrive::new();
//! drive.start(DriveCommand::Forward);
//! assert_eq!(drive.poll(), DriveStatus::Complete);
//! assert_eq!(drive.last_command(), Some(DriveCommand::Forward));
//! ```

#![cfg(any(test, feature = "mock"))]

mod drive;

pub use drive::MockDrive;
