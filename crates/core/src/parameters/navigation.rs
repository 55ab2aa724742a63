//! Navigation Controller Parameter Definitions
//!
//! # Parameters
//!
//! - `NAV_TRANSIT_ADV` - Forward primitives needed to cross the transit area
//! - `NAV_GATE_EXIT_ADV` - Forward primitives needed to leave the gateway
//! - `NAV_HOME_SECTOR` - Sector the vehicle occupies at power-up
//! - `NAV_HOME_LINE` - Line the vehicle occupies at power-up

use super::error::ParameterError;
use crate::topology::Sector;

// --- Defaults ---

const DEFAULT_TRANSIT_ADVANCES: u8 = 3;
const DEFAULT_GATEWAY_EXIT_ADVANCES: u8 = 2;
const DEFAULT_HOME_SECTOR: Sector = Sector::SorticHandover;
const DEFAULT_HOME_LINE: u16 = 1;

// --- Ranges ---

const MIN_ADVANCES: u8 = 1;
const MAX_ADVANCES: u8 = 10;

/// Navigation controller parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationParams {
    /// Forward primitives driven in the crossTransit state
    pub transit_advances: u8,
    /// Forward primitives driven at the gateway exit checkpoint
    pub gateway_exit_advances: u8,
    /// Initial actual and target sector
    pub home_sector: Sector,
    /// Initial actual and target line
    pub home_line: u16,
}

impl Default for NavigationParams {
    fn default() -> Self {
        Self {
            transit_advances: DEFAULT_TRANSIT_ADVANCES,
            gateway_exit_advances: DEFAULT_GATEWAY_EXIT_ADVANCES,
            home_sector: DEFAULT_HOME_SECTOR,
            home_line: DEFAULT_HOME_LINE,
        }
    }
}

impl NavigationParams {
    /// Validate all parameters
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(MIN_ADVANCES..=MAX_ADVANCES).contains(&self.transit_advances) {
            return Err(ParameterError::OutOfRange("NAV_TRANSIT_ADV"));
        }
        if !(MIN_ADVANCES..=MAX_ADVANCES).contains(&self.gateway_exit_advances) {
            return Err(ParameterError::OutOfRange("NAV_GATE_EXIT_ADV"));
        }
        if !self.home_sector.is_valid() {
            return Err(ParameterError::InvalidPosition("NAV_HOME_SECTOR"));
        }
        if self.home_line == 0 {
            return Err(ParameterError::InvalidPosition("NAV_HOME_LINE"));
        }
        Ok(())
    }

    /// Check if all parameters are within range
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Copy with every out-of-range value replaced by its nearest valid value
    ///
    /// An invalid home position falls back to the default home.
    pub fn clamped(&self) -> Self {
        let home_valid = self.home_sector.is_valid() && self.home_line > 0;
        Self {
            transit_advances: self.transit_advances.clamp(MIN_ADVANCES, MAX_ADVANCES),
            gateway_exit_advances: self.gateway_exit_advances.clamp(MIN_ADVANCES, MAX_ADVANCES),
            home_sector: if home_valid {
                self.home_sector
            } else {
                DEFAULT_HOME_SECTOR
            },
            home_line: if home_valid {
                self.home_line
            } else {
                DEFAULT_HOME_LINE
            },
        }
    }
}
