//! Mock drive implementation for testing

use heapless::Vec;
use sortic_nav_core::drive::{DriveCommand, DriveCtrl, DriveFault, DriveStatus};

/// Capacity of the issued-command log
const COMMAND_LOG_SIZE: usize = 64;

/// Mock drive implementation
///
/// Completes every primitive after a configurable number of `Busy` polls
/// and can fail one scheduled primitive. Issued commands are logged so
/// tests can verify the maneuver sequence.
///
/// # Example
///
/// ```ignore
/// use sortic_nav::platform::mock::MockDrive;
/// use sortic_nav_core::drive::{DriveCommand, DriveCtrl, DriveFault, DriveStatus};
///
/// let mut drive = MockDrive::with_latency(1);
/// drive.fail_at(1, DriveFault::Obstruction);
///
/// drive.start(DriveCommand::Backward);
/// assert_eq!(drive.poll(), DriveStatus::Busy);
/// assert_eq!(drive.poll(), DriveStatus::Complete);
///
/// drive.start(DriveCommand::TurnAround);
/// assert_eq!(drive.poll(), DriveStatus::Fault(DriveFault::Obstruction));
/// ```
#[derive(Debug, Default)]
pub struct MockDrive {
    commands: Vec<DriveCommand, COMMAND_LOG_SIZE>,
    /// Primitives issued so far, including ones dropped from a full log
    issued: usize,
    busy_polls: u8,
    remaining: u8,
    /// Index of the primitive that faults, and how
    scheduled_fault: Option<(usize, DriveFault)>,
    halts: u32,
}

impl MockDrive {
    /// Create a drive whose primitives complete on the first poll
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a drive whose primitives report `busy_polls` Busy polls first
    pub fn with_latency(busy_polls: u8) -> Self {
        Self {
            busy_polls,
            ..Self::default()
        }
    }

    /// Fail the primitive with zero-based issue index `index`
    pub fn fail_at(&mut self, index: usize, fault: DriveFault) {
        self.scheduled_fault = Some((index, fault));
    }

    /// Get issued commands (for test verification)
    pub fn commands(&self) -> &[DriveCommand] {
        &self.commands
    }

    /// Get the most recently issued command
    pub fn last_command(&self) -> Option<DriveCommand> {
        self.commands.last().copied()
    }

    /// Number of primitives issued
    pub fn issued(&self) -> usize {
        self.issued
    }

    /// Number of halt requests
    pub fn halt_count(&self) -> u32 {
        self.halts
    }

    /// Clear the command log
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}

impl DriveCtrl for MockDrive {
    fn start(&mut self, command: DriveCommand) {
        let _ = self.commands.push(command);
        self.issued += 1;
        self.remaining = self.busy_polls;
    }

    fn poll(&mut self) -> DriveStatus {
        if let Some((index, fault)) = self.scheduled_fault {
            if self.issued == index + 1 {
                self.scheduled_fault = None;
                return DriveStatus::Fault(fault);
            }
        }

        if self.remaining == 0 {
            DriveStatus::Complete
        } else {
            self.remaining -= 1;
            DriveStatus::Busy
        }
    }

    fn halt(&mut self) {
        self.halts += 1;
        self.remaining = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completes_after_latency() {
        let mut drive = MockDrive::with_latency(2);
        drive.start(DriveCommand::Forward);
        assert_eq!(drive.poll(), DriveStatus::Busy);
        assert_eq!(drive.poll(), DriveStatus::Busy);
        assert_eq!(drive.poll(), DriveStatus::Complete);
    }

    #[test]
    fn test_scheduled_fault_fires_once() {
        let mut drive = MockDrive::new();
        drive.fail_at(0, DriveFault::Mechanical);
        drive.start(DriveCommand::Backward);
        assert_eq!(drive.poll(), DriveStatus::Fault(DriveFault::Mechanical));

        drive.start(DriveCommand::Backward);
        assert_eq!(drive.poll(), DriveStatus::Complete);
        assert_eq!(drive.issued(), 2);
    }

    #[test]
    fn test_command_log() {
        let mut drive = MockDrive::new();
        drive.start(DriveCommand::TurnLeft);
        drive.start(DriveCommand::Forward);
        assert_eq!(
            drive.commands(),
            &[DriveCommand::TurnLeft, DriveCommand::Forward]
        );
        drive.halt();
        assert_eq!(drive.halt_count(), 1);
        drive.clear_commands();
        assert!(drive.commands().is_empty());
        assert_eq!(drive.issued(), 2);
    }
}
