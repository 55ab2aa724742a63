//! Navigation controller
//!
//! Hierarchical state machine that drives the vehicle from its actual
//! position to the commanded target position.
//!
//! # Tick model
//!
//! The owner calls [`NavigationCtrl::tick`] periodically. Each tick runs the
//! active state's periodic action, which advances its maneuver by at most
//! one drive primitive and returns an event. The event is fed straight into
//! the transition function. External events (`MoveToTargetPosition`,
//! `Resume`, `Reset`, `Error`) are injected with [`NavigationCtrl::tick_with`].
//!
//! # Transitions
//!
//! A transition runs the exit action of the old state, switches state, then
//! runs the entry action of the new state. Entering `ErrorState` saves the
//! interrupted state and maneuver cursor; `Resume` restores both instead of
//! running the entry action, so the maneuver continues at the checkpoint
//! where it stopped.

use super::checkpoint::{Checkpoint, SubState};
use super::maneuver::{self, NavContext};
use super::state::{Event, State};
use super::transition::{next_state, Transition};
use super::types::{validate_position, ActualPos, PositionError, TargetPos};
use crate::drive::{DriveCommand, DriveCtrl, DriveFault};
use crate::parameters::NavigationParams;
use crate::topology::Sector;

/// Navigation state machine owning its drive collaborator
pub struct NavigationCtrl<D: DriveCtrl> {
    drive: D,
    params: NavigationParams,
    state: State,
    last_state_before_error: State,
    current_event: Event,
    last_sub_before_error: SubState,
    ctx: NavContext,
}

impl<D: DriveCtrl> NavigationCtrl<D> {
    /// Create a controller idle at the default home position
    pub fn new(drive: D) -> Self {
        Self::with_params(drive, NavigationParams::default())
    }

    /// Create a controller with custom parameters
    ///
    /// Out-of-range parameters are clamped to their valid range.
    pub fn with_params(drive: D, params: NavigationParams) -> Self {
        let params = params.clamped();
        let home = TargetPos::new(params.home_sector, params.home_line);
        Self {
            drive,
            params,
            state: State::EndPoint,
            last_state_before_error: State::EndPoint,
            current_event: Event::NoEvent,
            last_sub_before_error: SubState::default(),
            ctx: NavContext {
                actual: ActualPos::at(home.sector, home.line),
                target: home,
                sub: SubState::initial(State::EndPoint),
                transit_once: true,
                last_gateway_turn: None,
                last_fault: None,
            },
        }
    }

    // -- Tick --

    /// Run the active state's periodic action and process its event
    pub fn tick(&mut self) -> Option<Transition> {
        let event = self.do_action();
        self.process(event)
    }

    /// Process an externally supplied event instead of the periodic action
    pub fn tick_with(&mut self, event: Event) -> Option<Transition> {
        self.process(event)
    }

    // -- Observers --

    /// Get current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Get current sector
    pub fn sector(&self) -> Sector {
        self.ctx.actual.sector
    }

    /// Get current line
    pub fn line(&self) -> u16 {
        self.ctx.actual.line
    }

    /// Check if the vehicle holds the gateway token
    pub fn has_token(&self) -> bool {
        self.ctx.actual.token
    }

    /// Get the full actual position record
    pub fn actual(&self) -> &ActualPos {
        &self.ctx.actual
    }

    /// Get the target position
    pub fn target(&self) -> &TargetPos {
        &self.ctx.target
    }

    /// Get the active checkpoint
    pub fn checkpoint(&self) -> Checkpoint {
        self.ctx.sub.checkpoint
    }

    /// Get the repetition counter of the active checkpoint
    pub fn loop_count(&self) -> u16 {
        self.ctx.sub.loop_count
    }

    /// Get the state interrupted by the last error
    pub fn last_state_before_error(&self) -> State {
        self.last_state_before_error
    }

    /// Get the maneuver cursor saved by the last error
    pub fn last_checkpoint_before_error(&self) -> Checkpoint {
        self.last_sub_before_error.checkpoint
    }

    /// Get the last processed event
    pub fn current_event(&self) -> Event {
        self.current_event
    }

    /// Get the last drive fault reported by a maneuver
    pub fn last_fault(&self) -> Option<DriveFault> {
        self.ctx.last_fault
    }

    /// Get the turn made at gateway checkpoint 20 of the current crossing
    pub fn last_gateway_turn(&self) -> Option<DriveCommand> {
        self.ctx.last_gateway_turn
    }

    /// Check if the transit exit of the current path is still available
    pub fn transit_once(&self) -> bool {
        self.ctx.transit_once
    }

    /// Get navigation parameters
    pub fn params(&self) -> &NavigationParams {
        &self.params
    }

    /// Get the drive collaborator
    pub fn drive(&self) -> &D {
        &self.drive
    }

    /// Get the drive collaborator mutably
    pub fn drive_mut(&mut self) -> &mut D {
        &mut self.drive
    }

    // -- Setters --

    /// Configure the destination of the next path
    pub fn set_target_position(&mut self, sector: Sector, line: u16) -> Result<(), PositionError> {
        validate_position(sector, line)?;
        self.ctx.target = TargetPos::new(sector, line);
        Ok(())
    }

    /// Force the actual position (startup or manual recovery)
    ///
    /// The position also becomes the start of the next path.
    pub fn set_actual_position(&mut self, sector: Sector, line: u16) -> Result<(), PositionError> {
        validate_position(sector, line)?;
        let actual = &mut self.ctx.actual;
        actual.move_to(sector);
        actual.line = line;
        actual.start_sector = sector;
        actual.start_line = line;
        Ok(())
    }

    /// Grant exclusive permission to cross the gateway
    pub fn give_token(&mut self) {
        self.ctx.actual.token = true;
    }

    // -- State machine --

    fn do_action(&mut self) -> Event {
        match self.state {
            State::EndPoint | State::ErrorState => maneuver::idle(),
            State::ToGateway => maneuver::to_gateway(&mut self.ctx, &mut self.drive),
            State::Gateway => maneuver::gateway(&mut self.ctx, &self.params, &mut self.drive),
            State::CrossTransit => {
                maneuver::cross_transit(&mut self.ctx, &self.params, &mut self.drive)
            }
            State::ToEndPoint => maneuver::to_end_point(&mut self.ctx, &mut self.drive),
            State::ResetState => maneuver::reset(&mut self.ctx, &mut self.drive),
        }
    }

    fn process(&mut self, event: Event) -> Option<Transition> {
        self.current_event = event;
        let next = next_state(self.state, event, self.last_state_before_error)?;
        let from = self.state;

        self.exit_action(from);

        if next == State::ErrorState {
            self.last_state_before_error = from;
            self.last_sub_before_error = self.ctx.sub.for_resume();
        }

        self.state = next;

        if event == Event::Resume {
            self.ctx.sub = self.last_sub_before_error;
        } else {
            self.entry_action(next);
        }

        Some(Transition {
            from,
            to: next,
            event,
        })
    }

    fn exit_action(&mut self, state: State) {
        if state == State::Gateway {
            self.ctx.actual.token = false;
        }
    }

    fn entry_action(&mut self, state: State) {
        self.ctx.sub = SubState::initial(state);

        match state {
            State::EndPoint => {
                self.ctx.actual.arrive(&self.ctx.target);
                self.ctx.transit_once = true;
            }
            State::Gateway => {
                self.ctx.last_gateway_turn = None;
            }
            State::ErrorState => {
                self.drive.halt();
                self.ctx.actual.token = false;
            }
            State::ResetState => {
                let actual = &mut self.ctx.actual;
                actual.token = false;
                self.ctx.target = TargetPos::new(actual.start_sector, actual.start_line);
            }
            State::ToGateway | State::CrossTransit | State::ToEndPoint => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drive::DriveStatus;
    use crate::navigation::checkpoint::{GatewayStep, ToGatewayStep};
    use heapless::Vec;

    // ========================================================================
    // MockDrive
    // ========================================================================

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum MockCall {
        Start(DriveCommand),
        Poll,
        Halt,
    }

    struct MockDrive {
        calls: Vec<MockCall, 128>,
        /// Busy polls before a primitive completes
        busy_polls: u8,
        remaining: u8,
        /// Fault reported by the next poll
        fault: Option<DriveFault>,
    }

    impl MockDrive {
        fn new() -> Self {
            Self {
                calls: Vec::new(),
                busy_polls: 0,
                remaining: 0,
                fault: None,
            }
        }

        fn slow(busy_polls: u8) -> Self {
            Self {
                busy_polls,
                ..Self::new()
            }
        }

        fn started(&self) -> Vec<DriveCommand, 64> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    MockCall::Start(cmd) => Some(*cmd),
                    _ => None,
                })
                .collect()
        }

        fn last_started(&self) -> Option<DriveCommand> {
            self.started().last().copied()
        }
    }

    impl DriveCtrl for MockDrive {
        fn start(&mut self, command: DriveCommand) {
            let _ = self.calls.push(MockCall::Start(command));
            self.remaining = self.busy_polls;
        }

        fn poll(&mut self) -> DriveStatus {
            let _ = self.calls.push(MockCall::Poll);
            if let Some(fault) = self.fault.take() {
                return DriveStatus::Fault(fault);
            }
            if self.remaining == 0 {
                DriveStatus::Complete
            } else {
                self.remaining -= 1;
                DriveStatus::Busy
            }
        }

        fn halt(&mut self) {
            let _ = self.calls.push(MockCall::Halt);
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn controller(actual: (Sector, u16), target: (Sector, u16)) -> NavigationCtrl<MockDrive> {
        let mut ctrl = NavigationCtrl::new(MockDrive::new());
        ctrl.set_actual_position(actual.0, actual.1).unwrap();
        ctrl.set_target_position(target.0, target.1).unwrap();
        ctrl
    }

    /// Tick until a transition happens (or `max` ticks pass)
    fn tick_until_transition(
        ctrl: &mut NavigationCtrl<MockDrive>,
        max: usize,
    ) -> Option<Transition> {
        for _ in 0..max {
            if let Some(t) = ctrl.tick() {
                return Some(t);
            }
        }
        None
    }

    // ========================================================================
    // Tests: construction and setters
    // ========================================================================

    #[test]
    fn test_initial_state() {
        let ctrl = NavigationCtrl::new(MockDrive::new());
        assert_eq!(ctrl.state(), State::EndPoint);
        assert_eq!(ctrl.sector(), Sector::SorticHandover);
        assert_eq!(ctrl.line(), 1);
        assert!(!ctrl.has_token());
        assert_eq!(ctrl.checkpoint(), Checkpoint::Idle);
        assert_eq!(ctrl.current_event(), Event::NoEvent);
        assert_eq!(ctrl.target(), &TargetPos::new(Sector::SorticHandover, 1));
    }

    #[test]
    fn test_with_params_home_position() {
        let params = NavigationParams {
            home_sector: Sector::TransferHandover,
            home_line: 4,
            ..Default::default()
        };
        let ctrl = NavigationCtrl::with_params(MockDrive::new(), params);
        assert_eq!(ctrl.sector(), Sector::TransferHandover);
        assert_eq!(ctrl.line(), 4);
        assert_eq!(ctrl.actual().start_sector, Sector::TransferHandover);
    }

    #[test]
    fn test_with_params_clamps() {
        let params = NavigationParams {
            transit_advances: 0,
            ..Default::default()
        };
        let ctrl = NavigationCtrl::with_params(MockDrive::new(), params);
        assert_eq!(ctrl.params().transit_advances, 1);
    }

    #[test]
    fn test_setters_validate() {
        let mut ctrl = NavigationCtrl::new(MockDrive::new());
        assert_eq!(
            ctrl.set_target_position(Sector::Error, 1),
            Err(PositionError::UnknownSector)
        );
        assert_eq!(
            ctrl.set_actual_position(Sector::SorticHandover, 0),
            Err(PositionError::InvalidLine(0))
        );
        // Rejected input leaves the position untouched
        assert_eq!(ctrl.target(), &TargetPos::new(Sector::SorticHandover, 1));
        assert_eq!(ctrl.line(), 1);
    }

    #[test]
    fn test_set_actual_position_starts_new_path() {
        let mut ctrl = NavigationCtrl::new(MockDrive::new());
        ctrl.set_actual_position(Sector::TransferHandover, 7).unwrap();
        assert_eq!(ctrl.sector(), Sector::TransferHandover);
        assert_eq!(ctrl.line(), 7);
        assert_eq!(ctrl.actual().start_sector, Sector::TransferHandover);
        assert_eq!(ctrl.actual().start_line, 7);
        assert_eq!(ctrl.actual().last_sector, Sector::SorticHandover);
    }

    #[test]
    fn test_end_point_is_idle() {
        let mut ctrl = NavigationCtrl::new(MockDrive::new());
        for _ in 0..10 {
            assert_eq!(ctrl.tick(), None);
        }
        assert_eq!(ctrl.state(), State::EndPoint);
        assert!(ctrl.drive().calls.is_empty());
    }

    // ========================================================================
    // Tests: scenarios
    // ========================================================================

    #[test]
    fn test_gateway_to_transit_scenario() {
        let mut ctrl = controller((Sector::SorticHandover, 3), (Sector::TransferGateway, 5));

        let t = ctrl.tick_with(Event::MoveToTargetPosition).unwrap();
        assert_eq!(t.from, State::EndPoint);
        assert_eq!(t.to, State::ToGateway);

        let t = tick_until_transition(&mut ctrl, 10).unwrap();
        assert_eq!(t.event, Event::PosReached);
        assert_eq!(ctrl.state(), State::Gateway);
        assert_eq!(ctrl.sector(), Sector::SorticWaitForGateway);

        // No token: gateway holds at checkpoint 0
        for _ in 0..5 {
            assert_eq!(ctrl.tick(), None);
            assert_eq!(ctrl.current_event(), Event::NoEvent);
            assert_eq!(
                ctrl.checkpoint(),
                Checkpoint::Gateway(GatewayStep::WaitForToken)
            );
        }
        let issued_before_token = ctrl.drive().started().len();

        ctrl.give_token();
        assert!(ctrl.has_token());

        let mut seen = Vec::<u8, 16>::new();
        let t = loop {
            if let Some(t) = ctrl.tick() {
                break t;
            }
            let code = ctrl.checkpoint().code();
            if seen.last() != Some(&code) {
                seen.push(code).unwrap();
            }
        };

        assert_eq!(seen.as_slice(), &[10, 20, 30, 40, 50]);
        assert_eq!(t.event, Event::PosTransitReached);
        assert_eq!(ctrl.state(), State::CrossTransit);
        assert!(!ctrl.has_token());
        assert_eq!(ctrl.line(), 5);
        assert_eq!(ctrl.sector(), Sector::TransitToTransfer);
        assert!(!ctrl.transit_once());

        let started = ctrl.drive().started();
        assert_eq!(
            &started[issued_before_token..],
            &[
                DriveCommand::Forward,
                DriveCommand::TurnRight,
                DriveCommand::Forward,
                DriveCommand::Forward,
                DriveCommand::TurnLeft,
                DriveCommand::Forward,
                DriveCommand::Forward,
            ]
        );
    }

    #[test]
    fn test_full_transit_path() {
        let mut ctrl = controller(
            (Sector::SorticHandover, 3),
            (Sector::TransferHandover, 5),
        );
        ctrl.tick_with(Event::MoveToTargetPosition);
        ctrl.give_token();

        let mut states = Vec::<State, 8>::new();
        for _ in 0..100 {
            if let Some(t) = ctrl.tick() {
                states.push(t.to).unwrap();
                if t.to == State::EndPoint {
                    break;
                }
            }
        }

        assert_eq!(
            states.as_slice(),
            &[
                State::Gateway,
                State::CrossTransit,
                State::ToEndPoint,
                State::EndPoint
            ]
        );
        assert_eq!(ctrl.sector(), Sector::TransferHandover);
        assert_eq!(ctrl.actual().last_sector, Sector::TransferToHandover);
        assert_eq!(ctrl.line(), 5);
        assert_eq!(ctrl.actual().start_sector, Sector::TransferHandover);
        assert!(ctrl.transit_once());
        assert!(!ctrl.has_token());
    }

    #[test]
    fn test_direct_end_point_scenario() {
        let mut ctrl = controller((Sector::SorticHandover, 2), (Sector::SorticHandover, 4));
        ctrl.tick_with(Event::MoveToTargetPosition);
        tick_until_transition(&mut ctrl, 10).unwrap();
        assert_eq!(ctrl.state(), State::Gateway);

        ctrl.give_token();
        let t = tick_until_transition(&mut ctrl, 30).unwrap();
        assert_eq!(t.from, State::Gateway);
        assert_eq!(t.event, Event::PosEndPointReached);
        assert_eq!(ctrl.state(), State::EndPoint);

        // Entry action overwrote actual from target
        assert_eq!(ctrl.sector(), Sector::SorticHandover);
        assert_eq!(ctrl.line(), 4);
        assert_eq!(ctrl.actual().start_line, 4);
        assert!(!ctrl.has_token());
    }

    #[test]
    fn test_move_command_ignored_while_moving() {
        let mut ctrl = controller((Sector::SorticHandover, 1), (Sector::TransferHandover, 1));
        ctrl.tick_with(Event::MoveToTargetPosition);
        assert_eq!(ctrl.tick_with(Event::MoveToTargetPosition), None);
        assert_eq!(ctrl.state(), State::ToGateway);
    }

    // ========================================================================
    // Tests: idempotence
    // ========================================================================

    #[test]
    fn test_pending_primitive_does_not_advance_cursor() {
        let mut ctrl = NavigationCtrl::new(MockDrive::slow(5));
        ctrl.set_target_position(Sector::TransferHandover, 2).unwrap();
        ctrl.tick_with(Event::MoveToTargetPosition);

        ctrl.tick();
        assert_eq!(ctrl.drive().last_started(), Some(DriveCommand::Backward));

        for _ in 0..5 {
            assert_eq!(ctrl.tick(), None);
            assert_eq!(
                ctrl.checkpoint(),
                Checkpoint::ToGateway(ToGatewayStep::Reverse)
            );
            assert_eq!(ctrl.drive().started().len(), 1);
        }

        ctrl.tick();
        assert_eq!(
            ctrl.checkpoint(),
            Checkpoint::ToGateway(ToGatewayStep::TurnAround)
        );
        assert_eq!(ctrl.drive().last_started(), Some(DriveCommand::TurnAround));
    }

    // ========================================================================
    // Tests: error, resume, reset
    // ========================================================================

    /// Drive into gateway checkpoint 30 with one line already followed
    fn controller_mid_follow_lines() -> NavigationCtrl<MockDrive> {
        let mut ctrl = controller((Sector::SorticHandover, 1), (Sector::TransferHandover, 4));
        ctrl.tick_with(Event::MoveToTargetPosition);
        tick_until_transition(&mut ctrl, 10).unwrap();
        ctrl.give_token();
        while !(ctrl.checkpoint() == Checkpoint::Gateway(GatewayStep::FollowLines)
            && ctrl.loop_count() == 1)
        {
            assert_eq!(ctrl.tick(), None);
        }
        ctrl
    }

    #[test]
    fn test_drive_fault_enters_error_state() {
        let mut ctrl = controller_mid_follow_lines();
        assert_eq!(ctrl.line(), 2);

        ctrl.drive_mut().fault = Some(DriveFault::Obstruction);
        let t = ctrl.tick().unwrap();
        assert_eq!(t.from, State::Gateway);
        assert_eq!(t.to, State::ErrorState);
        assert_eq!(t.event, Event::Error);

        assert_eq!(ctrl.last_state_before_error(), State::Gateway);
        assert_eq!(
            ctrl.last_checkpoint_before_error(),
            Checkpoint::Gateway(GatewayStep::FollowLines)
        );
        assert_eq!(ctrl.last_fault(), Some(DriveFault::Obstruction));
        assert!(!ctrl.has_token());
        assert_eq!(ctrl.drive().calls.last(), Some(&MockCall::Halt));

        // Error state is idle until resumed
        let calls = ctrl.drive().calls.len();
        for _ in 0..3 {
            assert_eq!(ctrl.tick(), None);
        }
        assert_eq!(ctrl.drive().calls.len(), calls);
        assert_eq!(ctrl.tick_with(Event::Error), None);
    }

    #[test]
    fn test_resume_continues_at_saved_checkpoint() {
        let mut ctrl = controller_mid_follow_lines();
        ctrl.drive_mut().fault = Some(DriveFault::Mechanical);
        ctrl.tick().unwrap();

        let t = ctrl.tick_with(Event::Resume).unwrap();
        assert_eq!(t.to, State::Gateway);
        assert_eq!(
            ctrl.checkpoint(),
            Checkpoint::Gateway(GatewayStep::FollowLines)
        );
        assert_eq!(ctrl.loop_count(), 1);

        // The interrupted primitive is issued again
        let before = ctrl.drive().started().len();
        assert_eq!(ctrl.tick(), None);
        assert_eq!(ctrl.drive().started().len(), before + 1);
        assert_eq!(ctrl.drive().last_started(), Some(DriveCommand::Forward));

        // And the maneuver finishes from there
        let t = tick_until_transition(&mut ctrl, 30).unwrap();
        assert_eq!(t.event, Event::PosTransitReached);
        assert_eq!(ctrl.line(), 4);
    }

    #[test]
    fn test_resume_to_gateway_turn_to_heading() {
        let mut ctrl = controller((Sector::SorticHandover, 3), (Sector::TransferHandover, 1));
        ctrl.tick_with(Event::MoveToTargetPosition);
        tick_until_transition(&mut ctrl, 10).unwrap();
        ctrl.give_token();
        while ctrl.checkpoint() != Checkpoint::Gateway(GatewayStep::TurnToHeading) {
            ctrl.tick();
        }

        ctrl.tick_with(Event::Error).unwrap();
        ctrl.tick_with(Event::Resume).unwrap();
        ctrl.tick();
        assert_eq!(ctrl.drive().last_started(), Some(DriveCommand::TurnRight));
    }

    #[test]
    fn test_error_from_every_moving_state_resumes_there() {
        for state in [
            State::ToGateway,
            State::Gateway,
            State::CrossTransit,
            State::ToEndPoint,
        ] {
            let mut ctrl =
                controller((Sector::SorticHandover, 1), (Sector::TransferHandover, 2));
            ctrl.tick_with(Event::MoveToTargetPosition);
            ctrl.give_token();
            while ctrl.state() != state {
                ctrl.tick();
            }
            ctrl.tick();
            let checkpoint = ctrl.checkpoint();

            ctrl.tick_with(Event::Error).unwrap();
            assert_eq!(ctrl.state(), State::ErrorState);
            assert_eq!(ctrl.last_state_before_error(), state);

            ctrl.tick_with(Event::Resume).unwrap();
            assert_eq!(ctrl.state(), state);
            assert_eq!(ctrl.checkpoint(), checkpoint);
        }
    }

    #[test]
    fn test_error_from_end_point() {
        let mut ctrl = NavigationCtrl::new(MockDrive::new());
        ctrl.tick_with(Event::Error).unwrap();
        assert_eq!(ctrl.last_state_before_error(), State::EndPoint);
        ctrl.tick_with(Event::Resume).unwrap();
        assert_eq!(ctrl.state(), State::EndPoint);
    }

    #[test]
    fn test_saved_state_is_overwritten_by_next_error() {
        let mut ctrl = controller((Sector::SorticHandover, 1), (Sector::TransferHandover, 2));
        ctrl.tick_with(Event::MoveToTargetPosition);
        ctrl.tick_with(Event::Error);
        ctrl.tick_with(Event::Resume);
        assert_eq!(ctrl.state(), State::ToGateway);

        tick_until_transition(&mut ctrl, 10).unwrap();
        ctrl.tick_with(Event::Error);
        assert_eq!(ctrl.last_state_before_error(), State::Gateway);
        assert_eq!(
            ctrl.last_checkpoint_before_error(),
            Checkpoint::Gateway(GatewayStep::WaitForToken)
        );
    }

    #[test]
    fn test_reset_returns_to_path_start() {
        let mut ctrl = controller_mid_follow_lines();
        ctrl.tick_with(Event::Error).unwrap();

        let t = ctrl.tick_with(Event::Reset).unwrap();
        assert_eq!(t.to, State::ResetState);
        assert_eq!(ctrl.target(), &TargetPos::new(Sector::SorticHandover, 1));

        let before = ctrl.drive().started().len();
        let t = tick_until_transition(&mut ctrl, 20).unwrap();
        assert_eq!(t.from, State::ResetState);
        assert_eq!(t.event, Event::PosEndPointReached);
        assert_eq!(ctrl.state(), State::EndPoint);
        assert_eq!(ctrl.sector(), Sector::SorticHandover);
        assert_eq!(ctrl.line(), 1);
        assert_eq!(
            &ctrl.drive().started()[before..],
            &[
                DriveCommand::Backward,
                DriveCommand::TurnAround,
                DriveCommand::Forward
            ]
        );
    }

    #[test]
    fn test_fault_during_reset() {
        let mut ctrl = controller_mid_follow_lines();
        ctrl.tick_with(Event::Error).unwrap();
        ctrl.tick_with(Event::Reset).unwrap();
        ctrl.tick();
        ctrl.drive_mut().fault = Some(DriveFault::Mechanical);
        let t = ctrl.tick().unwrap();
        assert_eq!(t.from, State::ResetState);
        assert_eq!(t.to, State::ErrorState);
        assert_eq!(ctrl.last_state_before_error(), State::ResetState);
    }

    // ========================================================================
    // Tests: token invariant
    // ========================================================================

    #[test]
    fn test_token_only_set_by_give_token() {
        let mut ctrl = controller((Sector::SorticHandover, 1), (Sector::TransferHandover, 1));
        ctrl.tick_with(Event::MoveToTargetPosition);
        for _ in 0..50 {
            ctrl.tick();
            assert!(!ctrl.has_token());
        }
        assert_eq!(ctrl.state(), State::Gateway);
    }

    #[test]
    fn test_token_released_on_gateway_error() {
        let mut ctrl = controller((Sector::SorticHandover, 1), (Sector::TransferHandover, 1));
        ctrl.tick_with(Event::MoveToTargetPosition);
        tick_until_transition(&mut ctrl, 10).unwrap();
        ctrl.give_token();
        ctrl.tick();
        assert!(ctrl.has_token());

        ctrl.tick_with(Event::Error).unwrap();
        assert!(!ctrl.has_token());
    }
}
