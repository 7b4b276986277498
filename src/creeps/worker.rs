use minicbor::{Encode, Decode};
use log::*;
use screeps::constants::{ErrorCode, ResourceType};
use screeps::{find, prelude::*, Creep, Room};

use crate::log_warn;
use crate::memory::Memory;
use crate::util::{energy_empty, energy_full, filter_map_closest_by_range, move_to_do};
use super::energy_sink::EnergySink;

/// Range creeps can build and upgrade from.
const WORK_RANGE: u32 = 3;

/// Which half of the gather/spend cycle a worker is in.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Default, Encode, Decode)]
#[cbor(index_only)]
pub enum WorkerState {
  #[default]
  #[n(0)] Refuel,
  #[n(1)] Deliver,
}

impl WorkerState {
  /// Flip once the store is full or empty, otherwise keep going.
  pub fn next(self, empty: bool, full: bool) -> WorkerState {
    match self {
      WorkerState::Refuel if full => WorkerState::Deliver,
      WorkerState::Deliver if empty => WorkerState::Refuel,
      state => state,
    }
  }
}

/// What a worker spends its energy on.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Job {
  /// Fill spawns and extensions.
  Supply,
  Upgrade,
  Build,
}

pub fn run(creep: &Creep, job: Job, memory: &mut Memory) {
  let name = creep.name();
  let state = memory.worker_state(&name)
    .next(energy_empty(creep), energy_full(creep));
  memory.set_worker_state(&name, state);

  let Some(room) = creep.room() else {
    warn!("worker {} is not in a visible room", name);
    return
  };
  match state {
    WorkerState::Refuel => refuel(creep),
    WorkerState::Deliver => match job {
      Job::Supply => supply(creep, &room),
      Job::Upgrade => upgrade(creep, &room),
      Job::Build => build(creep, &room),
    },
  }
}

fn refuel(creep: &Creep) {
  let Some(source) = creep.pos().find_closest_by_path(find::SOURCES_ACTIVE, None) else {
    debug!("no active source for {}", creep.name());
    return
  };
  move_to_do(creep, &source, 1, || {
    log_warn!(creep.harvest(&source),
              err => "Could not harvest energy from source {err:?}");
  });
}

fn supply(creep: &Creep, room: &Room) {
  let sink = filter_map_closest_by_range(
    find::MY_STRUCTURES, creep.pos(), |structure| {
      EnergySink::from_structure(structure).filter(|sink| !energy_full(sink))
    });
  let Some(sink) = sink else {
    // everything is full, so spend it on the controller instead
    upgrade(creep, room);
    return
  };
  move_to_do(creep, &sink, 1, || {
    match creep.transfer(&sink, ResourceType::Energy, None) {
      Ok(()) => (),
      // filled up by someone else this tick
      Err(ErrorCode::Full) => (),
      Err(err) => warn!("Could not deposit energy because: {err:?}"),
    }
  });
}

fn upgrade(creep: &Creep, room: &Room) {
  let Some(controller) = room.controller() else {
    debug!("no controller in {}", room.name());
    return
  };
  move_to_do(creep, &controller, WORK_RANGE, || {
    log_warn!(creep.upgrade_controller(&controller),
              err => "Creep could not upgrade controller: {err:?}");
  });
}

fn build(creep: &Creep, room: &Room) {
  let Some(site) = creep.pos().find_closest_by_range(find::MY_CONSTRUCTION_SITES) else {
    upgrade(creep, room);
    return
  };
  move_to_do(creep, &site, WORK_RANGE, || {
    log_warn!(creep.build(&site),
              err => "Creep could not build construction site: {err:?}");
  });
}
