//! Top-level transition table

use super::state::{Event, State};

/// A state change performed by the controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// State before the event
    pub from: State,
    /// State after the event
    pub to: State,
    /// Event that caused the change
    pub event: Event,
}

/// Next state for `event` in `state`
///
/// Returns `None` when the pair is not in the table; the controller then
/// stays where it is. `resume_to` is the state saved on entry into
/// `ErrorState` and is only consulted for `Resume`.
pub const fn next_state(state: State, event: Event, resume_to: State) -> Option<State> {
    match (state, event) {
        (_, Event::NoEvent) => None,

        (State::ErrorState, Event::Resume) => Some(resume_to),
        (State::ErrorState, Event::Reset) => Some(State::ResetState),
        (State::ErrorState, _) => None,
        (_, Event::Error) => Some(State::ErrorState),

        (State::EndPoint, Event::MoveToTargetPosition) => Some(State::ToGateway),
        (State::ToGateway, Event::PosReached) => Some(State::Gateway),
        (State::Gateway, Event::PosTransitReached) => Some(State::CrossTransit),
        (State::Gateway, Event::PosEndPointReached) => Some(State::EndPoint),
        (State::CrossTransit, Event::PosReached) => Some(State::ToEndPoint),
        (State::ToEndPoint, Event::PosEndPointReached) => Some(State::EndPoint),
        (State::ResetState, Event::PosEndPointReached) => Some(State::EndPoint),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The full table, every other pair must be `None`
    const TABLE: [(State, Event, State); 9] = [
        (State::EndPoint, Event::MoveToTargetPosition, State::ToGateway),
        (State::ToGateway, Event::PosReached, State::Gateway),
        (State::Gateway, Event::PosTransitReached, State::CrossTransit),
        (State::Gateway, Event::PosEndPointReached, State::EndPoint),
        (State::CrossTransit, Event::PosReached, State::ToEndPoint),
        (State::ToEndPoint, Event::PosEndPointReached, State::EndPoint),
        (State::ErrorState, Event::Reset, State::ResetState),
        (State::ResetState, Event::PosEndPointReached, State::EndPoint),
        // Resume target comes from the saved state, see below
        (State::ErrorState, Event::Resume, State::Gateway),
    ];

    fn expected(state: State, event: Event) -> Option<State> {
        if let Some((_, _, to)) = TABLE
            .iter()
            .find(|(from, ev, _)| *from == state && *ev == event)
        {
            return Some(*to);
        }
        if event == Event::Error && state != State::ErrorState {
            return Some(State::ErrorState);
        }
        None
    }

    #[test]
    fn test_table_is_exact_next_state_function() {
        for state in State::ALL {
            for event in Event::ALL {
                assert_eq!(
                    next_state(state, event, State::Gateway),
                    expected(state, event),
                    "state {:?} event {:?}",
                    state,
                    event
                );
            }
        }
    }

    #[test]
    fn test_no_event_is_noop_everywhere() {
        for state in State::ALL {
            assert_eq!(next_state(state, Event::NoEvent, State::EndPoint), None);
        }
    }

    #[test]
    fn test_resume_returns_saved_state() {
        for saved in State::ALL {
            assert_eq!(
                next_state(State::ErrorState, Event::Resume, saved),
                Some(saved)
            );
        }
    }

    #[test]
    fn test_error_ignored_in_error_state() {
        assert_eq!(
            next_state(State::ErrorState, Event::Error, State::Gateway),
            None
        );
    }

    #[test]
    fn test_resume_and_reset_ignored_outside_error_state() {
        for state in State::ALL {
            if state == State::ErrorState {
                continue;
            }
            assert_eq!(next_state(state, Event::Resume, State::Gateway), None);
            assert_eq!(next_state(state, Event::Reset, State::Gateway), None);
        }
    }
}
