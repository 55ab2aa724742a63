pub mod config;

pub use config::{PositionConfig, VehicleConfig};

use std::collections::VecDeque;

use sortic_nav::navigation::{NavCommand, NavStatus, NavigationTask};
use sortic_nav_core::navigation::{Checkpoint, Event, GatewayStep, State, Transition};
use sortic_nav_core::parameters::NavigationParams;
use sortic_nav_core::topology::Sector;

use crate::drive::{SimDrive, SimDriveConfig};
use crate::error::{Result, SimulatorError};
use crate::types::VehicleId;

/// A live simulated vehicle: navigation task, simulated drive and its
/// remaining work.
pub struct Vehicle {
    id: VehicleId,
    task: NavigationTask<SimDrive>,
    targets: VecDeque<(Sector, u16)>,
    /// Target of the path being driven.
    current: Option<(Sector, u16)>,
    /// GiveToken queued but not yet applied.
    token_pending: bool,
    /// Steps left before the recovery policy is applied.
    recovery_countdown: Option<u32>,
    completed_paths: u32,
    faults: u32,
    resets: u32,
}

impl Vehicle {
    /// Create a vehicle standing at its configured start position.
    pub fn new(
        config: &VehicleConfig,
        params: NavigationParams,
        drive: SimDriveConfig,
    ) -> Result<Self> {
        let (sector, line) = config.start.resolve(config.id)?;
        let targets = config
            .targets
            .iter()
            .map(|t| t.resolve(config.id))
            .collect::<Result<VecDeque<_>>>()?;

        let params = NavigationParams {
            home_sector: sector,
            home_line: line,
            ..params
        };

        Ok(Self {
            id: config.id,
            task: NavigationTask::with_params(SimDrive::new(drive), params),
            targets,
            current: None,
            token_pending: false,
            recovery_countdown: None,
            completed_paths: 0,
            faults: 0,
            resets: 0,
        })
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    /// Status snapshot of the navigation task.
    pub fn status(&self) -> NavStatus {
        self.task.status()
    }

    pub fn state(&self) -> State {
        self.task.controller().state()
    }

    /// Navigation task (read access for inspection).
    pub fn task(&self) -> &NavigationTask<SimDrive> {
        &self.task
    }

    /// Simulated drive, e.g. to schedule faults.
    pub fn drive_mut(&mut self) -> &mut SimDrive {
        self.task.controller_mut().drive_mut()
    }

    pub fn remaining_targets(&self) -> usize {
        self.targets.len() + usize::from(self.current.is_some())
    }

    pub fn completed_paths(&self) -> u32 {
        self.completed_paths
    }

    pub fn faults(&self) -> u32 {
        self.faults
    }

    pub fn resets(&self) -> u32 {
        self.resets
    }

    /// At an end point with nothing left to do.
    pub fn is_finished(&self) -> bool {
        self.state() == State::EndPoint && self.remaining_targets() == 0
    }

    /// Queued in front of the gateway without a token.
    pub fn waits_for_token(&self) -> bool {
        let ctrl = self.task.controller();
        ctrl.state() == State::Gateway
            && ctrl.checkpoint() == Checkpoint::Gateway(GatewayStep::WaitForToken)
            && !ctrl.has_token()
    }

    /// Faulted past the gateway entry and not yet back at an end point.
    pub fn stranded_in_gateway(&self) -> bool {
        let ctrl = self.task.controller();
        matches!(ctrl.state(), State::ErrorState | State::ResetState)
            && ctrl.last_state_before_error() == State::Gateway
            && ctrl.last_checkpoint_before_error()
                != Checkpoint::Gateway(GatewayStep::WaitForToken)
    }

    /// Inside the gateway, granted its token, or stranded there after a fault.
    ///
    /// A stranded vehicle keeps the gateway through `errorState` and the whole
    /// reset maneuver, whatever the recovery policy.
    pub fn occupies_gateway(&self) -> bool {
        match self.state() {
            State::Gateway => !self.waits_for_token() || self.token_pending,
            State::ErrorState | State::ResetState => self.stranded_in_gateway(),
            _ => false,
        }
    }

    /// Submit a command to the navigation task.
    pub fn submit(&mut self, command: NavCommand) -> Result<()> {
        self.task
            .submit(command)
            .map_err(|e| SimulatorError::CommandRejected(self.id, e))
    }

    /// Start the next path if idle. Returns true if a path was started.
    pub fn dispatch_next(&mut self) -> Result<bool> {
        if self.state() != State::EndPoint || self.current.is_some() {
            return Ok(false);
        }
        let Some((sector, line)) = self.targets.pop_front() else {
            return Ok(false);
        };
        self.submit(NavCommand::MoveTo { sector, line })?;
        self.current = Some((sector, line));
        Ok(true)
    }

    /// Queue the gateway token unless the vehicle holds it already.
    pub fn grant_token(&mut self) -> Result<()> {
        if self.token_pending || self.task.controller().has_token() {
            return Ok(());
        }
        self.submit(NavCommand::GiveToken)?;
        self.token_pending = true;
        Ok(())
    }

    /// Count down after a fault; true once the recovery policy is due.
    pub fn recovery_due(&mut self) -> bool {
        match self.recovery_countdown {
            Some(0) => {
                self.recovery_countdown = None;
                true
            }
            Some(n) => {
                self.recovery_countdown = Some(n - 1);
                false
            }
            None => false,
        }
    }

    /// Run one navigation task update and keep the path bookkeeping current.
    pub fn update(&mut self, recovery_delay: u32) -> Option<Transition> {
        let had_token_pending = self.token_pending;
        let transition = self.task.update();
        if had_token_pending && self.task.pending_commands() == 0 {
            self.token_pending = false;
        }

        let t = transition?;
        match (t.from, t.to) {
            (_, State::ErrorState) => {
                self.faults += 1;
                self.token_pending = false;
                self.recovery_countdown = Some(recovery_delay);
            }
            (State::ErrorState, State::ResetState) => {
                self.resets += 1;
                // Path abandoned: retry the same target later
                if let Some(target) = self.current.take() {
                    self.targets.push_front(target);
                }
            }
            (State::ResetState, State::EndPoint) => {}
            (_, State::EndPoint) if t.event == Event::PosEndPointReached => {
                self.completed_paths += 1;
                self.current = None;
            }
            _ => {}
        }
        Some(t)
    }
}
