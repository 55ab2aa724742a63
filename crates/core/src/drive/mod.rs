//! Drive collaborator abstraction
//!
//! The navigation controller never turns wheels itself. It issues discrete
//! motion primitives to a [`DriveCtrl`] implementation and polls for their
//! outcome on later ticks.
//!
//! # Design
//!
//! This module is pure `no_std` with no feature gates. Hardware drive
//! implementations belong in the platform layer; the simulation crate
//! provides a latency/fault injecting implementation for host runs.

use core::fmt;

/// Discrete motion primitive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DriveCommand {
    /// Advance to the next line marker
    Forward,
    /// Reverse to the previous line marker
    Backward,
    /// Turn 90 degrees left in place
    TurnLeft,
    /// Turn 90 degrees right in place
    TurnRight,
    /// Turn 180 degrees in place
    TurnAround,
}

impl DriveCommand {
    /// Primitive name for logging and telemetry
    pub const fn name(self) -> &'static str {
        match self {
            DriveCommand::Forward => "Forward",
            DriveCommand::Backward => "Backward",
            DriveCommand::TurnLeft => "TurnLeft",
            DriveCommand::TurnRight => "TurnRight",
            DriveCommand::TurnAround => "TurnAround",
        }
    }

    /// Turn that undoes this one (`None` for non-turning primitives)
    pub const fn opposite_turn(self) -> Option<DriveCommand> {
        match self {
            DriveCommand::TurnLeft => Some(DriveCommand::TurnRight),
            DriveCommand::TurnRight => Some(DriveCommand::TurnLeft),
            DriveCommand::TurnAround => Some(DriveCommand::TurnAround),
            _ => None,
        }
    }
}

impl fmt::Display for DriveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reason a primitive could not complete
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriveFault {
    /// Path blocked by an obstacle
    Obstruction,
    /// Motor, encoder or line sensor failure
    Mechanical,
}

impl DriveFault {
    /// Fault name for logging and telemetry
    pub const fn name(self) -> &'static str {
        match self {
            DriveFault::Obstruction => "Obstruction",
            DriveFault::Mechanical => "Mechanical",
        }
    }
}

impl fmt::Display for DriveFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriveFault::Obstruction => write!(f, "obstruction"),
            DriveFault::Mechanical => write!(f, "mechanical fault"),
        }
    }
}

/// Outcome of the last issued primitive
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriveStatus {
    /// Primitive still executing
    Busy,
    /// Primitive finished
    Complete,
    /// Primitive failed and will not complete
    Fault(DriveFault),
}

/// Drive layer contract
///
/// # Lifecycle
///
/// 1. `start()` - Issue a primitive; must not block
/// 2. `poll()` - Called on following ticks until it stops returning `Busy`
/// 3. `halt()` - Stop all motion immediately (on error entry)
pub trait DriveCtrl {
    /// Begin executing a motion primitive
    fn start(&mut self, command: DriveCommand);

    /// Report the outcome of the last started primitive
    fn poll(&mut self) -> DriveStatus;

    /// Abort the running primitive and stop the vehicle
    fn halt(&mut self);
}
