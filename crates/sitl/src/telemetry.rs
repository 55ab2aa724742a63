//! Status telemetry.
//!
//! One [`StatusRecord`] per vehicle transition, serialized as a JSON line.

use serde::{Deserialize, Serialize};
use sortic_nav::navigation::NavStatus;
use sortic_nav_core::navigation::Transition;

use crate::error::Result;
use crate::types::VehicleId;

/// Vehicle status at a fleet step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Fleet step number.
    pub tick: u64,
    pub vehicle: VehicleId,
    pub state: String,
    pub sector: String,
    pub line: u16,
    pub token: bool,
    pub checkpoint: u8,
    pub loop_count: u16,
    /// State left by the transition that produced this record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Event that caused the transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
}

impl StatusRecord {
    pub fn new(
        tick: u64,
        vehicle: VehicleId,
        status: &NavStatus,
        transition: Option<&Transition>,
    ) -> Self {
        Self {
            tick,
            vehicle,
            state: status.state.name().to_string(),
            sector: status.sector.name().to_string(),
            line: status.line,
            token: status.token,
            checkpoint: status.checkpoint,
            loop_count: status.loop_count,
            from: transition.map(|t| t.from.name().to_string()),
            event: transition.map(|t| t.event.name().to_string()),
        }
    }

    /// Serialize as a single JSON line (no trailing newline).
    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
