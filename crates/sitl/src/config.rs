//! Scenario configuration
//!
//! Loads a fleet scenario from a TOML file:
//!
//! ```toml
//! [simulation]
//! tick_rate_hz = 20
//! max_ticks = 5000
//!
//! [drive]
//! latency_polls = 2
//! fault_probability = 0.01
//! seed = 7
//!
//! [recovery]
//! policy = "resume"
//! delay_ticks = 10
//!
//! [[vehicles]]
//! id = 1
//! start = { sector = "SorticHandover", line = 1 }
//! targets = [{ sector = "TransferHandover", line = 3 }]
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sortic_nav_core::parameters::NavigationParams;

use crate::drive::SimDriveConfig;
use crate::error::{Result, SimulatorError};
use crate::vehicle::VehicleConfig;

/// Top-level scenario configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub drive: SimDriveConfig,
    #[serde(default)]
    pub recovery: RecoveryConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub vehicles: Vec<VehicleConfig>,
}

/// Simulation pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fleet steps per second in realtime mode
    pub tick_rate_hz: u32,
    /// Steps after which an unfinished run counts as stalled
    pub max_ticks: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 20,
            max_ticks: 10_000,
        }
    }
}

/// What the fleet does with a vehicle halted in errorState
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryPolicy {
    /// Continue the interrupted maneuver
    #[default]
    Resume,
    /// Return to the path start and retry the target
    Reset,
}

/// Error recovery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    pub policy: RecoveryPolicy,
    /// Steps spent in errorState before the policy is applied
    pub delay_ticks: u32,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            policy: RecoveryPolicy::Resume,
            delay_ticks: 5,
        }
    }
}

/// Navigation parameter overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub transit_advances: u8,
    pub gateway_exit_advances: u8,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        let params = NavigationParams::default();
        Self {
            transit_advances: params.transit_advances,
            gateway_exit_advances: params.gateway_exit_advances,
        }
    }
}

impl NavigationConfig {
    /// Controller parameters for a vehicle (home position comes from its start)
    pub fn params(&self) -> NavigationParams {
        NavigationParams {
            transit_advances: self.transit_advances,
            gateway_exit_advances: self.gateway_exit_advances,
            ..NavigationParams::default()
        }
    }
}

impl ScenarioConfig {
    /// Load and validate configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn parse(contents: &str) -> Result<Self> {
        let config: ScenarioConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges, vehicle ids and every named position
    pub fn validate(&self) -> Result<()> {
        if self.simulation.tick_rate_hz == 0 {
            return Err(SimulatorError::InvalidConfig(
                "simulation.tick_rate_hz must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.drive.fault_probability) {
            return Err(SimulatorError::InvalidConfig(format!(
                "drive.fault_probability {} is outside 0.0..=1.0",
                self.drive.fault_probability
            )));
        }
        self.navigation
            .params()
            .validate()
            .map_err(|e| SimulatorError::InvalidConfig(e.to_string()))?;
        if self.vehicles.is_empty() {
            return Err(SimulatorError::InvalidConfig(
                "at least one vehicle is required".to_string(),
            ));
        }

        let mut ids = HashSet::new();
        for vehicle in &self.vehicles {
            if !ids.insert(vehicle.id) {
                return Err(SimulatorError::VehicleAlreadyExists(vehicle.id));
            }
            vehicle.start.resolve(vehicle.id)?;
            for target in &vehicle.targets {
                target.resolve(vehicle.id)?;
            }
        }
        Ok(())
    }

    /// Total number of targets across the fleet
    pub fn target_count(&self) -> usize {
        self.vehicles.iter().map(|v| v.targets.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VehicleId;

    const SCENARIO: &str = r#"
        [simulation]
        tick_rate_hz = 50
        max_ticks = 2000

        [drive]
        latency_polls = 1
        fault_probability = 0.05
        seed = 9

        [recovery]
        policy = "reset"
        delay_ticks = 3

        [[vehicles]]
        id = 1
        start = { sector = "SorticHandover", line = 1 }
        targets = [
            { sector = "TransferHandover", line = 3 },
            { sector = "SorticHandover", line = 2 },
        ]

        [[vehicles]]
        id = 2
        start = { sector = "TransferHandover", line = 1 }
    "#;

    #[test]
    fn test_parse_scenario() {
        let config = ScenarioConfig::parse(SCENARIO).unwrap();
        assert_eq!(config.simulation.tick_rate_hz, 50);
        assert_eq!(config.simulation.max_ticks, 2000);
        assert_eq!(config.drive.latency_polls, 1);
        assert_eq!(config.drive.seed, Some(9));
        assert_eq!(config.recovery.policy, RecoveryPolicy::Reset);
        assert_eq!(config.recovery.delay_ticks, 3);
        assert_eq!(config.vehicles.len(), 2);
        assert_eq!(config.vehicles[0].id, VehicleId(1));
        assert!(config.vehicles[1].targets.is_empty());
        assert_eq!(config.target_count(), 2);
        // Section omitted: defaults
        assert_eq!(config.navigation.transit_advances, 3);
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = ScenarioConfig::parse(
            r#"
            [[vehicles]]
            id = 4
            start = { sector = "Parking", line = 1 }
            "#,
        )
        .unwrap();
        assert_eq!(config.simulation.tick_rate_hz, 20);
        assert_eq!(config.recovery.policy, RecoveryPolicy::Resume);
        assert_eq!(config.drive.fault_probability, 0.0);
    }

    #[test]
    fn test_rejects_unknown_sector() {
        let err = ScenarioConfig::parse(
            r#"
            [[vehicles]]
            id = 1
            start = { sector = "Dock", line = 1 }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SimulatorError::UnknownSector(name) if name == "Dock"));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = ScenarioConfig::parse(
            r#"
            [[vehicles]]
            id = 1
            start = { sector = "SorticHandover", line = 1 }

            [[vehicles]]
            id = 1
            start = { sector = "TransferHandover", line = 1 }
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SimulatorError::VehicleAlreadyExists(VehicleId(1))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let mut config = ScenarioConfig::parse(SCENARIO).unwrap();
        config.drive.fault_probability = 1.5;
        assert!(matches!(
            config.validate(),
            Err(SimulatorError::InvalidConfig(_))
        ));

        let mut config = ScenarioConfig::parse(SCENARIO).unwrap();
        config.navigation.transit_advances = 0;
        assert!(matches!(
            config.validate(),
            Err(SimulatorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_empty_fleet() {
        assert!(matches!(
            ScenarioConfig::parse("[simulation]\nmax_ticks = 10\n"),
            Err(SimulatorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(matches!(
            ScenarioConfig::parse("[[vehicles]\n"),
            Err(SimulatorError::Toml(_))
        ));
    }
}
