// The role record (`Memory.creeps[name].role`) belongs to whoever spawned the
// creep and is only read here. Anything the bot itself needs to remember
// between ticks goes in this struct, which lives in a raw memory segment.

use std::collections::BTreeMap;
use std::default::Default;

use log::*;
use minicbor::{Encode, Decode};

use crate::creeps::worker::WorkerState;

/// How often we sweep memory for creeps that have died.
pub const CLEAN_UP_PERIOD: u32 = 1000;

#[derive(PartialEq, Debug, Default, Encode, Decode)]
pub struct Memory {
  /// Worker phase by creep name.
  #[n(0)] pub creeps: BTreeMap<String, WorkerState>,
  /// Tracks the last tick we wrote the memory.
  #[n(1)] pub last_time: u32,
}

impl Memory {
  pub fn worker_state(&self, name: &str) -> WorkerState {
    self.creeps.get(name).copied().unwrap_or_default()
  }

  pub fn set_worker_state(&mut self, name: &str, state: WorkerState) {
    if self.creeps.get(name) != Some(&state) {
      debug!("{} is now {:?}", name, state);
    }
    self.creeps.insert(name.to_string(), state);
  }

  /// Drop state for every creep `is_alive` rejects. Returns how many went.
  pub fn forget_dead(&mut self, mut is_alive: impl FnMut(&str) -> bool) -> usize {
    let before = self.creeps.len();
    self.creeps.retain(|name, _| is_alive(name));
    before - self.creeps.len()
  }

  /// Every [`CLEAN_UP_PERIOD`] ticks, forget dead creeps.
  ///
  /// Only touches our own state. `Memory.creeps` belongs to the host.
  pub fn clean_up(&mut self, now: u32, is_alive: impl FnMut(&str) -> bool) -> usize {
    if now % CLEAN_UP_PERIOD != 0 {
      return 0;
    }
    self.forget_dead(is_alive)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unknown_creeps_start_refueling() {
    let mem = Memory::default();
    assert_eq!(mem.worker_state("Harvester-3"), WorkerState::Refuel);
  }

  #[test]
  fn forget_dead_keeps_the_living() {
    let mut mem = Memory::default();
    mem.set_worker_state("alive", WorkerState::Deliver);
    mem.set_worker_state("dead", WorkerState::Refuel);
    assert_eq!(mem.forget_dead(|name| name == "alive"), 1);
    assert_eq!(mem.worker_state("alive"), WorkerState::Deliver);
    assert!(!mem.creeps.contains_key("dead"));
  }

  #[test]
  fn clean_up_only_runs_on_period() {
    let mut mem = Memory::default();
    mem.set_worker_state("dead", WorkerState::Deliver);
    assert_eq!(mem.clean_up(CLEAN_UP_PERIOD + 1, |_| false), 0);
    assert!(mem.creeps.contains_key("dead"));
    assert_eq!(mem.clean_up(2 * CLEAN_UP_PERIOD, |_| false), 1);
    assert!(mem.creeps.is_empty());
  }
}
