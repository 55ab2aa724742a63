use std::collections::VecDeque;

use crate::types::VehicleId;

/// Fleet-wide gateway token authority.
///
/// Vehicles waiting in front of the gateway are served first come, first
/// served. At most one vehicle holds the token at any time.
#[derive(Debug, Default)]
pub struct GatewayArbiter {
    queue: VecDeque<VehicleId>,
    holder: Option<VehicleId>,
    grants: u64,
}

impl GatewayArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a request. Repeated requests keep their original place.
    pub fn request(&mut self, id: VehicleId) {
        if self.holder != Some(id) && !self.queue.contains(&id) {
            self.queue.push_back(id);
        }
    }

    /// Give the token to the next waiting vehicle if it is free.
    ///
    /// Returns the new holder.
    pub fn grant(&mut self) -> Option<VehicleId> {
        if self.holder.is_some() {
            return None;
        }
        let id = self.queue.pop_front()?;
        self.holder = Some(id);
        self.grants += 1;
        Some(id)
    }

    /// Take the token back from `id`, or withdraw its pending request.
    ///
    /// Returns true if `id` was the holder.
    pub fn release(&mut self, id: VehicleId) -> bool {
        self.queue.retain(|queued| *queued != id);
        if self.holder == Some(id) {
            self.holder = None;
            true
        } else {
            false
        }
    }

    pub fn holder(&self) -> Option<VehicleId> {
        self.holder
    }

    /// Vehicles waiting, in grant order.
    pub fn waiting(&self) -> impl Iterator<Item = VehicleId> + '_ {
        self.queue.iter().copied()
    }

    /// Total grants so far.
    pub fn grants(&self) -> u64 {
        self.grants
    }
}
