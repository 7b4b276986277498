use screeps::Creep;

use crate::memory::Memory;
use super::fighter;
use super::memory::{CreepMemory, RoleTag};
use super::worker::{self, Job};

/// Run the creep's behavior for this tick.
///
/// Every role is matched here, so a new `RoleTag` won't compile until it has
/// a behavior.
pub fn run_role(creep: &Creep, role_memory: &CreepMemory, memory: &mut Memory) {
  match role_memory.role {
    RoleTag::Fighter => fighter::run(creep),
    RoleTag::Ranged => fighter::run_ranged(creep),
    RoleTag::Harvester => worker::run(creep, Job::Supply, memory),
    RoleTag::Upgrader => worker::run(creep, Job::Upgrade, memory),
    RoleTag::Builder => worker::run(creep, Job::Build, memory),
  }
}
