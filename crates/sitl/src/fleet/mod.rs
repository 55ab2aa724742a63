pub mod arbiter;

pub use arbiter::GatewayArbiter;

use std::collections::BTreeMap;

use serde::Serialize;
use sortic_nav::navigation::NavCommand;
use sortic_nav_core::navigation::State;
use sortic_nav_core::parameters::NavigationParams;
use tracing::{debug, info, warn};

use crate::config::{RecoveryConfig, RecoveryPolicy, ScenarioConfig};
use crate::drive::SimDriveConfig;
use crate::error::{Result, SimulatorError};
use crate::telemetry::StatusRecord;
use crate::types::VehicleId;
use crate::vehicle::{Vehicle, VehicleConfig};

/// Fleet orchestrator.
///
/// Owns the vehicles and the gateway arbiter. Each [`Fleet::step`] hands out
/// work, arbitrates the gateway token, applies the recovery policy and runs
/// one navigation update per vehicle, in vehicle id order.
pub struct Fleet {
    vehicles: BTreeMap<VehicleId, Vehicle>,
    arbiter: GatewayArbiter,
    params: NavigationParams,
    drive: SimDriveConfig,
    recovery: RecoveryConfig,
    tick: u64,
}

/// Per-vehicle summary of a run.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleReport {
    pub id: VehicleId,
    pub completed_paths: u32,
    pub faults: u32,
    pub resets: u32,
    pub sector: String,
    pub line: u16,
}

/// Summary of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct FleetReport {
    pub ticks: u64,
    pub gateway_grants: u64,
    pub vehicles: Vec<VehicleReport>,
}

impl Fleet {
    /// Create an empty fleet.
    pub fn new(params: NavigationParams, drive: SimDriveConfig, recovery: RecoveryConfig) -> Self {
        Self {
            vehicles: BTreeMap::new(),
            arbiter: GatewayArbiter::new(),
            params,
            drive,
            recovery,
            tick: 0,
        }
    }

    /// Create a fleet with every vehicle of a scenario.
    pub fn from_config(config: &ScenarioConfig) -> Result<Self> {
        config.validate()?;
        let mut fleet = Self::new(
            config.navigation.params(),
            config.drive.clone(),
            config.recovery.clone(),
        );
        for vehicle in &config.vehicles {
            fleet.spawn_vehicle(vehicle)?;
        }
        Ok(fleet)
    }

    // -- Vehicle management --

    /// Spawn a new vehicle at its start position.
    pub fn spawn_vehicle(&mut self, config: &VehicleConfig) -> Result<VehicleId> {
        let id = config.id;
        if self.vehicles.contains_key(&id) {
            return Err(SimulatorError::VehicleAlreadyExists(id));
        }
        // Distinct but reproducible fault sequence per vehicle
        let drive = SimDriveConfig {
            seed: self.drive.seed.map(|s| s.wrapping_add(u64::from(id.0))),
            ..self.drive.clone()
        };
        let vehicle = Vehicle::new(config, self.params.clone(), drive)?;
        self.vehicles.insert(id, vehicle);
        info!("{} spawned with {} targets", id, config.targets.len());
        Ok(id)
    }

    pub fn vehicle(&self, id: VehicleId) -> Result<&Vehicle> {
        self.vehicles
            .get(&id)
            .ok_or(SimulatorError::VehicleNotFound(id))
    }

    pub fn vehicle_mut(&mut self, id: VehicleId) -> Result<&mut Vehicle> {
        self.vehicles
            .get_mut(&id)
            .ok_or(SimulatorError::VehicleNotFound(id))
    }

    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.values()
    }

    pub fn arbiter(&self) -> &GatewayArbiter {
        &self.arbiter
    }

    /// Steps run so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Targets not yet reached across the fleet.
    pub fn pending_targets(&self) -> usize {
        self.vehicles.values().map(Vehicle::remaining_targets).sum()
    }

    /// Every vehicle is at an end point with no work left.
    pub fn is_finished(&self) -> bool {
        self.vehicles.values().all(Vehicle::is_finished)
    }

    // -- Simulation --

    /// Advance the fleet by one step.
    ///
    /// Returns a status record for each vehicle that changed state.
    pub fn step(&mut self) -> Result<Vec<StatusRecord>> {
        self.tick += 1;
        if let Some(holder) = self.arbiter.holder() {
            let occupied = self
                .vehicles
                .get(&holder)
                .is_some_and(Vehicle::occupies_gateway);
            if !occupied {
                self.arbiter.release(holder);
                debug!("{} released the gateway", holder);
            }
        }

        for vehicle in self.vehicles.values_mut() {
            if vehicle.dispatch_next()? {
                debug!("{} dispatched", vehicle.id());
            }
            if vehicle.waits_for_token() {
                self.arbiter.request(vehicle.id());
            }
            if vehicle.state() == State::ErrorState && vehicle.recovery_due() {
                let command = match self.recovery.policy {
                    RecoveryPolicy::Resume => NavCommand::Resume,
                    RecoveryPolicy::Reset => NavCommand::Reset,
                };
                warn!("{} recovering with {}", vehicle.id(), command.name());
                vehicle.submit(command)?;
            }
        }

        if let Some(id) = self.arbiter.grant() {
            debug!("{} granted the gateway", id);
        }
        if let Some(holder) = self.arbiter.holder() {
            let vehicle = self.vehicle_mut(holder)?;
            if vehicle.state() == State::Gateway {
                vehicle.grant_token()?;
            }
        }

        let mut records = Vec::new();
        for vehicle in self.vehicles.values_mut() {
            if let Some(t) = vehicle.update(self.recovery.delay_ticks) {
                info!(
                    "{}: {} -> {} on {}",
                    vehicle.id(),
                    t.from.name(),
                    t.to.name(),
                    t.event.name()
                );
                records.push(StatusRecord::new(
                    self.tick,
                    vehicle.id(),
                    &vehicle.status(),
                    Some(&t),
                ));
            }
        }
        Ok(records)
    }

    /// Step until every vehicle is finished.
    pub fn run(&mut self, max_ticks: u64) -> Result<FleetReport> {
        self.run_with(max_ticks, |_| Ok(()))
    }

    /// Step until every vehicle is finished, passing each step's records to
    /// `on_step`.
    pub fn run_with<F>(&mut self, max_ticks: u64, mut on_step: F) -> Result<FleetReport>
    where
        F: FnMut(&[StatusRecord]) -> Result<()>,
    {
        while !self.is_finished() {
            if self.tick >= max_ticks {
                return Err(SimulatorError::Stalled {
                    ticks: self.tick,
                    pending: self.pending_targets(),
                });
            }
            let records = self.step()?;
            on_step(&records)?;
        }
        Ok(self.report())
    }

    /// Summary of the fleet as it stands.
    pub fn report(&self) -> FleetReport {
        FleetReport {
            ticks: self.tick,
            gateway_grants: self.arbiter.grants(),
            vehicles: self
                .vehicles
                .values()
                .map(|v| {
                    let status = v.status();
                    VehicleReport {
                        id: v.id(),
                        completed_paths: v.completed_paths(),
                        faults: v.faults(),
                        resets: v.resets(),
                        sector: status.sector.name().to_string(),
                        line: status.line,
                    }
                })
                .collect(),
        }
    }
}
