//! Periodic actions of the navigation states
//!
//! Each function runs one tick of a state's maneuver against the shared
//! [`NavContext`] and returns the event it generated. A tick polls at most
//! one outstanding primitive and issues at most one new primitive; when a
//! primitive completes the maneuver falls through to the next checkpoint
//! within the same tick.

use core::cmp::Ordering;

use super::checkpoint::{
    Checkpoint, CrossTransitStep, GatewayStep, ResetStep, SubState, ToEndPointStep, ToGatewayStep,
};
use super::state::Event;
use super::types::{ActualPos, TargetPos};
use crate::drive::{DriveCommand, DriveCtrl, DriveFault, DriveStatus};
use crate::parameters::NavigationParams;
use crate::topology::Area;

/// Controller data shared by the transition function and the state actions
#[derive(Clone, Copy, Debug)]
pub(crate) struct NavContext {
    pub actual: ActualPos,
    pub target: TargetPos,
    pub sub: SubState,
    /// Armed at the start of each path, consumed by the first transit exit
    pub transit_once: bool,
    /// Turn made at gateway checkpoint 20, undone at checkpoint 40
    pub last_gateway_turn: Option<DriveCommand>,
    pub last_fault: Option<DriveFault>,
}

/// Result of driving one checkpoint for one tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StepOutcome {
    /// Primitive issued or still running
    Pending,
    /// One repetition finished and the next one was issued
    Repeated,
    /// Checkpoint finished
    Done,
    Fault(DriveFault),
}

/// Issue `command` once, then poll it on later ticks
fn drive_once<D: DriveCtrl + ?Sized>(
    sub: &mut SubState,
    drive: &mut D,
    command: DriveCommand,
) -> StepOutcome {
    if !sub.issued {
        drive.start(command);
        sub.issued = true;
        return StepOutcome::Pending;
    }

    match drive.poll() {
        DriveStatus::Busy => StepOutcome::Pending,
        DriveStatus::Complete => {
            sub.issued = false;
            StepOutcome::Done
        }
        DriveStatus::Fault(fault) => StepOutcome::Fault(fault),
    }
}

/// Run `command` until it completed `times` times
fn drive_repeat<D: DriveCtrl + ?Sized>(
    sub: &mut SubState,
    drive: &mut D,
    command: DriveCommand,
    times: u16,
) -> StepOutcome {
    if sub.loop_count >= times {
        return StepOutcome::Done;
    }

    match drive_once(sub, drive, command) {
        StepOutcome::Done => {
            sub.loop_count += 1;
            if sub.loop_count >= times {
                StepOutcome::Done
            } else {
                drive.start(command);
                sub.issued = true;
                StepOutcome::Repeated
            }
        }
        other => other,
    }
}

/// Map a non-finished outcome to the event returned by the action
fn hold(ctx: &mut NavContext, outcome: StepOutcome) -> Event {
    match outcome {
        StepOutcome::Fault(fault) => {
            ctx.last_fault = Some(fault);
            Event::Error
        }
        _ => Event::NoEvent,
    }
}

fn areas(ctx: &NavContext) -> Option<(Area, Area)> {
    Some((ctx.actual.start_sector.area()?, ctx.target.sector.area()?))
}

/// endPoint and errorState: idle
pub(crate) fn idle() -> Event {
    Event::NoEvent
}

/// toGateway: back out of the handover, turn around, join the gateway queue
pub(crate) fn to_gateway<D: DriveCtrl + ?Sized>(ctx: &mut NavContext, drive: &mut D) -> Event {
    loop {
        let Checkpoint::ToGateway(step) = ctx.sub.checkpoint else {
            return Event::NoEvent;
        };

        let (command, next) = match step {
            ToGatewayStep::Reverse => (DriveCommand::Backward, Some(ToGatewayStep::TurnAround)),
            ToGatewayStep::TurnAround => (DriveCommand::TurnAround, Some(ToGatewayStep::Advance)),
            ToGatewayStep::Advance => (DriveCommand::Forward, None),
        };

        match drive_once(&mut ctx.sub, drive, command) {
            StepOutcome::Done => match next {
                Some(next) => ctx.sub.goto(Checkpoint::ToGateway(next)),
                None => {
                    if let Some((start, goal)) = areas(ctx) {
                        ctx.actual.move_to(start.waiting_sector(goal));
                    }
                    return Event::PosReached;
                }
            },
            other => return hold(ctx, other),
        }
    }
}

/// gateway: wait for the token, cross, line up with the target line, leave
pub(crate) fn gateway<D: DriveCtrl + ?Sized>(
    ctx: &mut NavContext,
    params: &NavigationParams,
    drive: &mut D,
) -> Event {
    loop {
        let Checkpoint::Gateway(step) = ctx.sub.checkpoint else {
            return Event::NoEvent;
        };

        match step {
            GatewayStep::WaitForToken => {
                if !ctx.actual.token {
                    return Event::NoEvent;
                }
                ctx.sub.goto(Checkpoint::Gateway(GatewayStep::Enter));
            }
            GatewayStep::Enter => match drive_once(&mut ctx.sub, drive, DriveCommand::Forward) {
                StepOutcome::Done => {
                    if let Some((start, goal)) = areas(ctx) {
                        ctx.actual.move_to(start.gateway_sector(goal));
                    }
                    ctx.sub.goto(Checkpoint::Gateway(GatewayStep::TurnToLine));
                }
                other => return hold(ctx, other),
            },
            GatewayStep::TurnToLine => {
                let turn = match ctx.target.line.cmp(&ctx.actual.line) {
                    Ordering::Greater => DriveCommand::TurnRight,
                    Ordering::Less => DriveCommand::TurnLeft,
                    Ordering::Equal => {
                        ctx.sub.goto(Checkpoint::Gateway(GatewayStep::Exit));
                        continue;
                    }
                };
                match drive_once(&mut ctx.sub, drive, turn) {
                    StepOutcome::Done => {
                        ctx.last_gateway_turn = Some(turn);
                        ctx.sub.goto(Checkpoint::Gateway(GatewayStep::FollowLines));
                    }
                    other => return hold(ctx, other),
                }
            }
            GatewayStep::FollowLines => {
                // completed + remaining stays equal to the initial line distance
                let remaining = ctx.target.line.abs_diff(ctx.actual.line);
                let times = ctx.sub.loop_count.saturating_add(remaining);
                match drive_repeat(&mut ctx.sub, drive, DriveCommand::Forward, times) {
                    StepOutcome::Repeated => {
                        step_line_toward_target(ctx);
                        return Event::NoEvent;
                    }
                    StepOutcome::Done => {
                        step_line_toward_target(ctx);
                        ctx.sub.goto(Checkpoint::Gateway(GatewayStep::TurnToHeading));
                    }
                    other => return hold(ctx, other),
                }
            }
            GatewayStep::TurnToHeading => {
                let Some(turn) = ctx.last_gateway_turn.and_then(DriveCommand::opposite_turn)
                else {
                    ctx.sub.goto(Checkpoint::Gateway(GatewayStep::Exit));
                    continue;
                };
                match drive_once(&mut ctx.sub, drive, turn) {
                    StepOutcome::Done => ctx.sub.goto(Checkpoint::Gateway(GatewayStep::Exit)),
                    other => return hold(ctx, other),
                }
            }
            GatewayStep::Exit => {
                let times = u16::from(params.gateway_exit_advances);
                match drive_repeat(&mut ctx.sub, drive, DriveCommand::Forward, times) {
                    StepOutcome::Done => {
                        ctx.actual.token = false;
                        return gateway_result(ctx);
                    }
                    other => return hold(ctx, other),
                }
            }
        }
    }
}

fn step_line_toward_target(ctx: &mut NavContext) {
    match ctx.target.line.cmp(&ctx.actual.line) {
        Ordering::Greater => ctx.actual.line += 1,
        Ordering::Less => ctx.actual.line -= 1,
        Ordering::Equal => {}
    }
}

/// Decide where the vehicle continues after leaving the gateway
///
/// Each path passes the gateway once before `endPoint` re-arms `transit_once`.
/// A disarmed flag only matters for a topology that routes back into the
/// gateway on the same path, and then ends the path instead of crossing again.
fn gateway_result(ctx: &mut NavContext) -> Event {
    if ctx.actual.start_sector == ctx.target.sector || !ctx.transit_once {
        return Event::PosEndPointReached;
    }

    ctx.transit_once = false;
    if let Some(goal) = ctx.target.sector.area() {
        ctx.actual.move_to(goal.transit_lane());
    }
    Event::PosTransitReached
}

/// crossTransit: drive forward through the transit area
pub(crate) fn cross_transit<D: DriveCtrl + ?Sized>(
    ctx: &mut NavContext,
    params: &NavigationParams,
    drive: &mut D,
) -> Event {
    let Checkpoint::CrossTransit(CrossTransitStep::Advance) = ctx.sub.checkpoint else {
        return Event::NoEvent;
    };

    let times = u16::from(params.transit_advances);
    match drive_repeat(&mut ctx.sub, drive, DriveCommand::Forward, times) {
        StepOutcome::Done => {
            match ctx.target.sector.area() {
                Some(goal) if goal != Area::Transit => {
                    ctx.actual.move_to(goal.gateway_sector(goal));
                }
                _ => {}
            }
            Event::PosReached
        }
        other => hold(ctx, other),
    }
}

/// toEndPoint: drive forward onto the final approach
pub(crate) fn to_end_point<D: DriveCtrl + ?Sized>(ctx: &mut NavContext, drive: &mut D) -> Event {
    let Checkpoint::ToEndPoint(ToEndPointStep::Advance) = ctx.sub.checkpoint else {
        return Event::NoEvent;
    };

    match drive_once(&mut ctx.sub, drive, DriveCommand::Forward) {
        StepOutcome::Done => {
            if let Some(goal) = ctx.target.sector.area() {
                ctx.actual.move_to(goal.approach_sector());
            }
            Event::PosEndPointReached
        }
        other => hold(ctx, other),
    }
}

/// resetState: back off, turn around and drive back toward the path start
pub(crate) fn reset<D: DriveCtrl + ?Sized>(ctx: &mut NavContext, drive: &mut D) -> Event {
    loop {
        let Checkpoint::Reset(step) = ctx.sub.checkpoint else {
            return Event::NoEvent;
        };

        let (command, next) = match step {
            ResetStep::Reverse => (DriveCommand::Backward, Some(ResetStep::TurnAround)),
            ResetStep::TurnAround => (DriveCommand::TurnAround, Some(ResetStep::Advance)),
            ResetStep::Advance => (DriveCommand::Forward, None),
        };

        match drive_once(&mut ctx.sub, drive, command) {
            StepOutcome::Done => match next {
                Some(next) => ctx.sub.goto(Checkpoint::Reset(next)),
                None => return Event::PosEndPointReached,
            },
            other => return hold(ctx, other),
        }
    }
}
