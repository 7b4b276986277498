use super::memory::CreepMemory;
use super::role::run_role;
use crate::memory::Memory;

use log::*;
use screeps::{game, prelude::*};

pub fn creep_loop(memory: &mut Memory) {
  for creep in game::creeps().values() {
    if creep.spawning() {
      continue;
    }
    let name = creep.name();
    match CreepMemory::load(&creep) {
      Ok(role_memory) => {
        debug!("running {} {} ({:?})", role_memory.role, name, role_memory.sub_role);
        run_role(&creep, &role_memory, memory);
      }
      Err(err) => warn!("skipping creep {}: {}", name, err),
    }
  }
}
