//! Navigation states and events

use core::fmt;

/// Top-level navigation state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum State {
    /// Stationary at the end of a path, awaiting a new command
    #[default]
    EndPoint,
    /// Leaving the handover toward the gateway queue
    ToGateway,
    /// Waiting for the token and crossing the gateway
    Gateway,
    /// Driving through the transit area
    CrossTransit,
    /// Approaching the final handover position
    ToEndPoint,
    /// Recovery maneuver back to the path start
    ResetState,
    /// Halted after a drive fault
    ErrorState,
}

impl State {
    /// All states
    pub const ALL: [State; 7] = [
        State::EndPoint,
        State::ToGateway,
        State::Gateway,
        State::CrossTransit,
        State::ToEndPoint,
        State::ResetState,
        State::ErrorState,
    ];

    /// State name for logging and telemetry
    pub const fn name(self) -> &'static str {
        match self {
            State::EndPoint => "endPoint",
            State::ToGateway => "toGateway",
            State::Gateway => "gateway",
            State::CrossTransit => "crossTransit",
            State::ToEndPoint => "toEndPoint",
            State::ResetState => "resetState",
            State::ErrorState => "errorState",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Event fed into the transition function
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Event {
    /// External: start driving to the target position
    MoveToTargetPosition,
    /// Signal: end point reached
    PosEndPointReached,
    /// Signal: transit area reached
    PosTransitReached,
    /// Signal: maneuver position reached
    PosReached,
    /// Drive fault
    Error,
    /// External: continue after an error
    Resume,
    /// External: abandon the path after an error
    Reset,
    /// No event generated
    #[default]
    NoEvent,
}

impl Event {
    /// All events
    pub const ALL: [Event; 8] = [
        Event::MoveToTargetPosition,
        Event::PosEndPointReached,
        Event::PosTransitReached,
        Event::PosReached,
        Event::Error,
        Event::Resume,
        Event::Reset,
        Event::NoEvent,
    ];

    /// Event name for logging and telemetry
    pub const fn name(self) -> &'static str {
        match self {
            Event::MoveToTargetPosition => "MoveToTargetPosition",
            Event::PosEndPointReached => "PosEndPointReached",
            Event::PosTransitReached => "PosTransitReached",
            Event::PosReached => "PosReached",
            Event::Error => "Error",
            Event::Resume => "Resume",
            Event::Reset => "Reset",
            Event::NoEvent => "NoEvent",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
