//! Navigation task
//!
//! Command front-end for [`NavigationCtrl`]. Commands arrive asynchronously
//! (fleet dispatcher, gateway arbiter, operator) and are queued; the owner
//! calls [`NavigationTask::update`] once per control period.
//!
//! # Update model
//!
//! Each update either applies one queued command or runs one controller
//! tick, never both. Commands that do not make sense in the current state
//! are rejected, logged and counted instead of being forwarded as events.

use core::fmt;

use heapless::Deque;
use sortic_nav_core::drive::DriveCtrl;
use sortic_nav_core::navigation::{
    Checkpoint, Event, NavigationCtrl, PositionError, State, Transition,
};
use sortic_nav_core::parameters::NavigationParams;
use sortic_nav_core::topology::Sector;

/// Maximum queued commands
pub const COMMAND_QUEUE_SIZE: usize = 8;

/// Command accepted by the navigation task
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavCommand {
    /// Drive to a new target position (endPoint only)
    MoveTo { sector: Sector, line: u16 },
    /// Overwrite the actual position (endPoint or errorState)
    SetActual { sector: Sector, line: u16 },
    /// Grant the gateway token
    GiveToken,
    /// Continue the interrupted path (errorState only)
    Resume,
    /// Abandon the path and return to its start (errorState only)
    Reset,
}

impl NavCommand {
    /// Command name for logging
    pub const fn name(&self) -> &'static str {
        match self {
            NavCommand::MoveTo { .. } => "MoveTo",
            NavCommand::SetActual { .. } => "SetActual",
            NavCommand::GiveToken => "GiveToken",
            NavCommand::Resume => "Resume",
            NavCommand::Reset => "Reset",
        }
    }
}

/// Navigation task errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskError {
    /// Command queue is full
    QueueFull,
    /// Command is not accepted in the current state
    WrongState {
        command: &'static str,
        state: State,
    },
    /// Command carried an invalid position
    InvalidPosition(PositionError),
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::QueueFull => write!(f, "command queue full"),
            TaskError::WrongState { command, state } => {
                write!(f, "{} not accepted in {}", command, state)
            }
            TaskError::InvalidPosition(e) => write!(f, "invalid position: {}", e),
        }
    }
}

impl From<PositionError> for TaskError {
    fn from(e: PositionError) -> Self {
        TaskError::InvalidPosition(e)
    }
}

/// Snapshot of the navigation task for telemetry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavStatus {
    pub state: State,
    pub sector: Sector,
    pub line: u16,
    pub token: bool,
    /// Numeric code of the active checkpoint
    pub checkpoint: u8,
    pub loop_count: u16,
    pub last_state_before_error: State,
    /// Controller ticks run so far
    pub ticks: u32,
    /// Commands rejected so far
    pub rejected_commands: u32,
}

/// Queued command front-end owning the navigation controller
pub struct NavigationTask<D: DriveCtrl> {
    ctrl: NavigationCtrl<D>,
    queue: Deque<NavCommand, COMMAND_QUEUE_SIZE>,
    ticks: u32,
    rejected_commands: u32,
    last_rejection: Option<TaskError>,
    last_checkpoint: Checkpoint,
}

impl<D: DriveCtrl> NavigationTask<D> {
    /// Create a task with default parameters
    pub fn new(drive: D) -> Self {
        Self::with_params(drive, NavigationParams::default())
    }

    /// Create a task with custom parameters
    pub fn with_params(drive: D, params: NavigationParams) -> Self {
        if let Err(e) = params.validate() {
            crate::log_warn!("nav: parameter {} out of range, clamped", e.name());
        }
        let ctrl = NavigationCtrl::with_params(drive, params);
        let last_checkpoint = ctrl.checkpoint();
        Self {
            ctrl,
            queue: Deque::new(),
            ticks: 0,
            rejected_commands: 0,
            last_rejection: None,
            last_checkpoint,
        }
    }

    /// Queue a command for a later update
    pub fn submit(&mut self, command: NavCommand) -> Result<(), TaskError> {
        self.queue.push_back(command).map_err(|_| {
            crate::log_warn!("nav: queue full, dropped {}", command.name());
            TaskError::QueueFull
        })
    }

    /// Number of commands waiting
    pub fn pending_commands(&self) -> usize {
        self.queue.len()
    }

    /// Apply one queued command, or run one controller tick if none is queued
    pub fn update(&mut self) -> Option<Transition> {
        let transition = match self.queue.pop_front() {
            Some(command) => match self.apply(command) {
                Ok(transition) => transition,
                Err(e) => {
                    self.reject(command, e);
                    None
                }
            },
            None => {
                self.ticks = self.ticks.wrapping_add(1);
                self.ctrl.tick()
            }
        };

        if let Some(t) = transition {
            self.log_transition(&t);
        }
        self.log_checkpoint();
        transition
    }

    fn apply(&mut self, command: NavCommand) -> Result<Option<Transition>, TaskError> {
        let state = self.ctrl.state();
        let wrong_state = TaskError::WrongState {
            command: command.name(),
            state,
        };

        match command {
            NavCommand::MoveTo { sector, line } => {
                if state != State::EndPoint {
                    return Err(wrong_state);
                }
                self.ctrl.set_target_position(sector, line)?;
                crate::log_info!("nav: move to {} line {}", sector.name(), line);
                Ok(self.ctrl.tick_with(Event::MoveToTargetPosition))
            }
            NavCommand::SetActual { sector, line } => {
                if !matches!(state, State::EndPoint | State::ErrorState) {
                    return Err(wrong_state);
                }
                self.ctrl.set_actual_position(sector, line)?;
                crate::log_info!("nav: actual set to {} line {}", sector.name(), line);
                Ok(None)
            }
            NavCommand::GiveToken => {
                self.ctrl.give_token();
                crate::log_debug!("nav: token granted in {}", state.name());
                Ok(None)
            }
            NavCommand::Resume | NavCommand::Reset => {
                if state != State::ErrorState {
                    return Err(wrong_state);
                }
                let event = if command == NavCommand::Resume {
                    Event::Resume
                } else {
                    Event::Reset
                };
                Ok(self.ctrl.tick_with(event))
            }
        }
    }

    fn reject(&mut self, command: NavCommand, error: TaskError) {
        self.rejected_commands = self.rejected_commands.wrapping_add(1);
        self.last_rejection = Some(error);
        crate::log_warn!(
            "nav: rejected {} in {}",
            command.name(),
            self.ctrl.state().name()
        );
    }

    fn log_transition(&self, t: &Transition) {
        crate::log_info!(
            "nav: {} -> {} on {}",
            t.from.name(),
            t.to.name(),
            t.event.name()
        );
        if t.to == State::ErrorState {
            match self.ctrl.last_fault() {
                Some(fault) if t.event == Event::Error => {
                    crate::log_error!("nav: halted in {} by {}", t.from.name(), fault.name());
                }
                _ => crate::log_error!("nav: halted in {}", t.from.name()),
            }
        }
    }

    fn log_checkpoint(&mut self) {
        let checkpoint = self.ctrl.checkpoint();
        if checkpoint != self.last_checkpoint {
            crate::log_debug!(
                "nav: {} checkpoint {}",
                self.ctrl.state().name(),
                checkpoint.code()
            );
            self.last_checkpoint = checkpoint;
        }
    }

    // -- Observers --

    /// Get a status snapshot
    pub fn status(&self) -> NavStatus {
        NavStatus {
            state: self.ctrl.state(),
            sector: self.ctrl.sector(),
            line: self.ctrl.line(),
            token: self.ctrl.has_token(),
            checkpoint: self.ctrl.checkpoint().code(),
            loop_count: self.ctrl.loop_count(),
            last_state_before_error: self.ctrl.last_state_before_error(),
            ticks: self.ticks,
            rejected_commands: self.rejected_commands,
        }
    }

    /// Get the last rejected command's error
    pub fn last_rejection(&self) -> Option<TaskError> {
        self.last_rejection
    }

    /// Get the wrapped controller
    pub fn controller(&self) -> &NavigationCtrl<D> {
        &self.ctrl
    }

    /// Get the wrapped controller mutably
    pub fn controller_mut(&mut self) -> &mut NavigationCtrl<D> {
        &mut self.ctrl
    }
}
