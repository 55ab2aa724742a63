//! Maneuver checkpoints
//!
//! Every moving state runs its maneuver as an ordered list of checkpoints.
//! Each checkpoint keeps the numeric code it is known by in drive logs and
//! diagnostics (0, 10, 20, ...), so a stride of ten separates consecutive
//! steps.

use super::state::State;

/// toGateway maneuver
///
/// - 0 Drive backwards out of the handover
/// - 10 Turn around
/// - 20 Drive forward once, then `PosReached`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ToGatewayStep {
    Reverse = 0,
    TurnAround = 10,
    Advance = 20,
}

/// gateway maneuver
///
/// - 0 Wait for the token
/// - 10 Drive forward once into the gateway
/// - 20 Turn left/right toward the target line, or skip to 50 when aligned
/// - 30 Drive forward once per line between actual and target line
/// - 40 Turn back to the travel heading
/// - 50 Drive forward to leave the gateway, then `PosEndPointReached` or
///   `PosTransitReached`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum GatewayStep {
    WaitForToken = 0,
    Enter = 10,
    TurnToLine = 20,
    FollowLines = 30,
    TurnToHeading = 40,
    Exit = 50,
}

/// crossTransit maneuver: drive forward through the transit area, then `PosReached`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum CrossTransitStep {
    Advance = 0,
}

/// toEndPoint maneuver: drive forward once, then `PosEndPointReached`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ToEndPointStep {
    Advance = 0,
}

/// resetState recovery maneuver
///
/// - 0 Back away from the fault location
/// - 10 Turn around
/// - 20 Drive forward once, then `PosEndPointReached`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ResetStep {
    Reverse = 0,
    TurnAround = 10,
    Advance = 20,
}

/// Active checkpoint, tagged by the state that owns it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Checkpoint {
    /// States without a maneuver (endPoint, errorState)
    #[default]
    Idle,
    ToGateway(ToGatewayStep),
    Gateway(GatewayStep),
    CrossTransit(CrossTransitStep),
    ToEndPoint(ToEndPointStep),
    Reset(ResetStep),
}

impl Checkpoint {
    /// First checkpoint of the state's maneuver
    pub const fn initial(state: State) -> Self {
        match state {
            State::EndPoint | State::ErrorState => Checkpoint::Idle,
            State::ToGateway => Checkpoint::ToGateway(ToGatewayStep::Reverse),
            State::Gateway => Checkpoint::Gateway(GatewayStep::WaitForToken),
            State::CrossTransit => Checkpoint::CrossTransit(CrossTransitStep::Advance),
            State::ToEndPoint => Checkpoint::ToEndPoint(ToEndPointStep::Advance),
            State::ResetState => Checkpoint::Reset(ResetStep::Reverse),
        }
    }

    /// Numeric checkpoint code (0, 10, 20, ...)
    pub const fn code(self) -> u8 {
        match self {
            Checkpoint::Idle => 0,
            Checkpoint::ToGateway(step) => step as u8,
            Checkpoint::Gateway(step) => step as u8,
            Checkpoint::CrossTransit(step) => step as u8,
            Checkpoint::ToEndPoint(step) => step as u8,
            Checkpoint::Reset(step) => step as u8,
        }
    }

    /// State whose maneuver owns this checkpoint (`None` for `Idle`)
    pub const fn owner(self) -> Option<State> {
        match self {
            Checkpoint::Idle => None,
            Checkpoint::ToGateway(_) => Some(State::ToGateway),
            Checkpoint::Gateway(_) => Some(State::Gateway),
            Checkpoint::CrossTransit(_) => Some(State::CrossTransit),
            Checkpoint::ToEndPoint(_) => Some(State::ToEndPoint),
            Checkpoint::Reset(_) => Some(State::ResetState),
        }
    }
}

/// Maneuver cursor of the active state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SubState {
    /// Active checkpoint
    pub checkpoint: Checkpoint,
    /// Completed repetitions of the checkpoint's primitive
    pub loop_count: u16,
    /// A primitive was issued at this checkpoint and is awaiting completion
    pub issued: bool,
}

impl SubState {
    /// Cursor at the first checkpoint of `state`
    pub const fn initial(state: State) -> Self {
        Self {
            checkpoint: Checkpoint::initial(state),
            loop_count: 0,
            issued: false,
        }
    }

    /// Move to another checkpoint, clearing the repetition counter
    pub fn goto(&mut self, checkpoint: Checkpoint) {
        self.checkpoint = checkpoint;
        self.loop_count = 0;
        self.issued = false;
    }

    /// Copy suitable for resuming: the outstanding primitive is re-issued
    pub const fn for_resume(self) -> Self {
        Self {
            checkpoint: self.checkpoint,
            loop_count: self.loop_count,
            issued: false,
        }
    }
}
