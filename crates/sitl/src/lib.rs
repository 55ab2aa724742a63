pub mod config;
pub mod drive;
pub mod error;
pub mod fleet;
pub mod telemetry;
pub mod types;
pub mod vehicle;

pub use config::{RecoveryConfig, RecoveryPolicy, ScenarioConfig, SimulationConfig};
pub use drive::{SimDrive, SimDriveConfig};
pub use error::{Result, SimulatorError};
pub use fleet::{Fleet, FleetReport, GatewayArbiter, VehicleReport};
pub use telemetry::StatusRecord;
pub use types::VehicleId;
pub use vehicle::{PositionConfig, Vehicle, VehicleConfig};
