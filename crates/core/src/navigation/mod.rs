//! Navigation state machine
//!
//! This module contains the navigation controller and the data it operates on:
//! - `types`: Actual and target position records
//! - `state`: Top-level states and events
//! - `transition`: Pure transition table
//! - `checkpoint`: Maneuver checkpoints of each moving state
//! - `controller`: [`NavigationCtrl`] tying them to a drive collaborator

mod checkpoint;
mod controller;
mod maneuver;
mod state;
mod transition;
mod types;

pub use checkpoint::{
    Checkpoint, CrossTransitStep, GatewayStep, ResetStep, SubState, ToEndPointStep, ToGatewayStep,
};
pub use controller::NavigationCtrl;
pub use state::{Event, State};
pub use transition::{next_state, Transition};
pub use types::{validate_position, ActualPos, PositionError, TargetPos};
