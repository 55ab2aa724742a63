use sortic_nav::navigation::TaskError;

use crate::types::VehicleId;

/// Errors that can occur during simulator operations.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown sector: {0:?}")]
    UnknownSector(String),

    #[error("Invalid position for {vehicle}: {reason}")]
    InvalidPosition { vehicle: VehicleId, reason: String },

    #[error("Vehicle not found: {0}")]
    VehicleNotFound(VehicleId),

    #[error("Vehicle already exists: {0}")]
    VehicleAlreadyExists(VehicleId),

    #[error("Command rejected by {0}: {1}")]
    CommandRejected(VehicleId, TaskError),

    #[error("Fleet stalled after {ticks} ticks with {pending} targets outstanding")]
    Stalled { ticks: u64, pending: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for simulator operations.
pub type Result<T> = std::result::Result<T, SimulatorError>;
