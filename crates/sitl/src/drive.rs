//! Simulated drive layer.
//!
//! Primitives take a configurable number of polls to complete. Faults are
//! injected either at random (seeded, so runs are reproducible) or at a
//! scheduled primitive index.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sortic_nav_core::drive::{DriveCommand, DriveCtrl, DriveFault, DriveStatus};

/// Most recent primitives kept in the history.
pub const HISTORY_LEN: usize = 64;

/// Configuration for the simulated drive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimDriveConfig {
    /// Busy polls reported before a primitive completes.
    pub latency_polls: u8,
    /// Probability that a primitive faults (0.0 to 1.0).
    pub fault_probability: f64,
    /// RNG seed for deterministic mode. None = random.
    pub seed: Option<u64>,
}

impl Default for SimDriveConfig {
    fn default() -> Self {
        Self {
            latency_polls: 2,
            fault_probability: 0.0,
            seed: Some(1),
        }
    }
}

/// Simulated drive with latency and fault injection.
pub struct SimDrive {
    config: SimDriveConfig,
    rng: StdRng,
    /// Primitive currently executing.
    active: Option<DriveCommand>,
    remaining: u8,
    /// Fault the active primitive ends with.
    pending_fault: Option<DriveFault>,
    scheduled_faults: Vec<(usize, DriveFault)>,
    /// Last [`HISTORY_LEN`] primitives, oldest first.
    history: VecDeque<DriveCommand>,
    issued: usize,
    faults: u32,
    halts: u32,
}

impl SimDrive {
    /// Create a new simulated drive with the given configuration.
    pub fn new(config: SimDriveConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng,
            active: None,
            remaining: 0,
            pending_fault: None,
            scheduled_faults: Vec::new(),
            history: VecDeque::with_capacity(HISTORY_LEN),
            issued: 0,
            faults: 0,
            halts: 0,
        }
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SimDriveConfig::default())
    }

    /// Fail the primitive with zero-based issue index `index`.
    pub fn schedule_fault(&mut self, index: usize, fault: DriveFault) {
        self.scheduled_faults.push((index, fault));
    }

    /// Most recent primitives, oldest first. At most [`HISTORY_LEN`].
    pub fn history(&self) -> impl Iterator<Item = DriveCommand> + '_ {
        self.history.iter().copied()
    }

    /// Number of primitives issued so far.
    pub fn issued(&self) -> usize {
        self.issued
    }

    /// Primitive currently executing.
    pub fn active(&self) -> Option<DriveCommand> {
        self.active
    }

    /// Number of faults reported.
    pub fn fault_count(&self) -> u32 {
        self.faults
    }

    /// Number of halt requests.
    pub fn halt_count(&self) -> u32 {
        self.halts
    }

    fn draw_fault(&mut self) -> Option<DriveFault> {
        let index = self.issued;
        if let Some(pos) = self.scheduled_faults.iter().position(|(i, _)| *i == index) {
            return Some(self.scheduled_faults.swap_remove(pos).1);
        }

        let p = self.config.fault_probability.clamp(0.0, 1.0);
        if p > 0.0 && self.rng.gen_bool(p) {
            let fault = if self.rng.gen_bool(0.5) {
                DriveFault::Obstruction
            } else {
                DriveFault::Mechanical
            };
            return Some(fault);
        }
        None
    }
}

impl DriveCtrl for SimDrive {
    fn start(&mut self, command: DriveCommand) {
        self.pending_fault = self.draw_fault();
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(command);
        self.issued += 1;
        self.active = Some(command);
        self.remaining = self.config.latency_polls;
    }

    fn poll(&mut self) -> DriveStatus {
        if self.active.is_none() {
            return DriveStatus::Complete;
        }
        if self.remaining > 0 {
            self.remaining -= 1;
            return DriveStatus::Busy;
        }

        self.active = None;
        match self.pending_fault.take() {
            Some(fault) => {
                self.faults += 1;
                DriveStatus::Fault(fault)
            }
            None => DriveStatus::Complete,
        }
    }

    fn halt(&mut self) {
        self.halts += 1;
        self.active = None;
        self.remaining = 0;
        self.pending_fault = None;
    }
}
