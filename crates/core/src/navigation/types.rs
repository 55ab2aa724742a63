//! Navigation type definitions
//!
//! This module contains the position records mutated by the controller:
//! - `ActualPos`: Where the vehicle is and whether it holds the gateway token
//! - `TargetPos`: Where the vehicle was commanded to go
//! - `PositionError`: Rejected position setter input

use core::fmt;

use crate::topology::Sector;

/// Position setter rejected its input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionError {
    /// The `error` sentinel is not a position
    UnknownSector,
    /// Lines are numbered from 1
    InvalidLine(u16),
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::UnknownSector => write!(f, "sector is unknown"),
            PositionError::InvalidLine(line) => write!(f, "line {} is invalid (must be >= 1)", line),
        }
    }
}

/// Validate a sector/line pair
pub fn validate_position(sector: Sector, line: u16) -> Result<(), PositionError> {
    if !sector.is_valid() {
        return Err(PositionError::UnknownSector);
    }
    if line == 0 {
        return Err(PositionError::InvalidLine(line));
    }
    Ok(())
}

/// Actual vehicle position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActualPos {
    /// Sector the current path started from
    pub start_sector: Sector,
    /// Line the current path started from
    pub start_line: u16,
    /// Sector occupied before `sector`
    pub last_sector: Sector,
    /// Current sector
    pub sector: Sector,
    /// Current line (>= 1)
    pub line: u16,
    /// Exclusive permission to traverse the gateway
    pub token: bool,
}

impl ActualPos {
    /// Vehicle standing at `sector`/`line` with no path history
    pub const fn at(sector: Sector, line: u16) -> Self {
        Self {
            start_sector: sector,
            start_line: line,
            last_sector: sector,
            sector,
            line,
            token: false,
        }
    }

    /// Enter a new sector, remembering the previous one
    pub fn move_to(&mut self, sector: Sector) {
        if sector != self.sector {
            self.last_sector = self.sector;
            self.sector = sector;
        }
    }

    /// Arrive at the target; it becomes the start of the next path
    pub fn arrive(&mut self, target: &TargetPos) {
        self.move_to(target.sector);
        self.line = target.line;
        self.start_sector = target.sector;
        self.start_line = target.line;
    }
}

/// Commanded target position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetPos {
    /// Target sector
    pub sector: Sector,
    /// Target line (>= 1)
    pub line: u16,
}

impl TargetPos {
    /// Create a new target position
    pub const fn new(sector: Sector, line: u16) -> Self {
        Self { sector, line }
    }
}
