use serde::{Deserialize, Serialize};
use sortic_nav_core::navigation::validate_position;
use sortic_nav_core::topology::{name_to_sector, Sector};

use crate::error::{Result, SimulatorError};
use crate::types::VehicleId;

/// Sector/line pair as written in scenario files.
///
/// Sectors are given by their canonical name (`"SorticHandover"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionConfig {
    pub sector: String,
    pub line: u16,
}

impl PositionConfig {
    pub fn new(sector: Sector, line: u16) -> Self {
        Self {
            sector: sector.name().to_string(),
            line,
        }
    }

    /// Decode the sector name and validate the position.
    pub fn resolve(&self, vehicle: VehicleId) -> Result<(Sector, u16)> {
        let sector = name_to_sector(&self.sector);
        if sector == Sector::Error {
            return Err(SimulatorError::UnknownSector(self.sector.clone()));
        }
        validate_position(sector, self.line).map_err(|e| SimulatorError::InvalidPosition {
            vehicle,
            reason: e.to_string(),
        })?;
        Ok((sector, self.line))
    }
}

/// Configuration for spawning a new simulated vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleConfig {
    /// Vehicle identifier (must be unique).
    pub id: VehicleId,
    /// Position at power-up.
    pub start: PositionConfig,
    /// Targets driven to in order.
    #[serde(default)]
    pub targets: Vec<PositionConfig>,
}

impl VehicleConfig {
    /// Create a vehicle configuration with no targets.
    pub fn new(id: VehicleId, sector: Sector, line: u16) -> Self {
        Self {
            id,
            start: PositionConfig::new(sector, line),
            targets: Vec::new(),
        }
    }

    /// Append a target.
    pub fn with_target(mut self, sector: Sector, line: u16) -> Self {
        self.targets.push(PositionConfig::new(sector, line));
        self
    }
}
