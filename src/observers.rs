use std::str::FromStr;

use log::*;
use screeps::constants::ErrorCode;
use screeps::local::ObjectId;
use screeps::{RoomName, StructureObserver};

#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct ObserverBinding {
  pub id: &'static str,
  pub target_room: &'static str,
}

/// Observers we own and the remote room each one keeps an eye on.
pub const OBSERVER_BINDINGS: [ObserverBinding; 3] = [
  ObserverBinding { id: "5cf5150f2d06a97e67901da7", target_room: "E23N36" },
  ObserverBinding { id: "5cf6a3e52b9bc27a2a2a5b1c", target_room: "E25N36" },
  ObserverBinding { id: "5cf7c1d98e3a4f5e1b4b7d20", target_room: "E24N38" },
];

pub trait Observer {
  fn observe(&self, room: RoomName) -> Result<(), ErrorCode>;
}

impl Observer for StructureObserver {
  fn observe(&self, room: RoomName) -> Result<(), ErrorCode> {
    self.observe_room(room)
  }
}

/// Looks up a live observer we can see.
///
/// `None` when the id is malformed, or the structure is gone or not visible.
fn resolve_observer(id: &str) -> Option<StructureObserver> {
  ObjectId::<StructureObserver>::from_str(id).ok()?.resolve()
}

/// Point every observer in [`OBSERVER_BINDINGS`] at its room.
pub fn run_all_observers() {
  let issued = run_observers_with(&OBSERVER_BINDINGS, resolve_observer);
  debug!("issued {} observe commands", issued);
}

/// Returns how many observe commands were issued.
pub fn run_observers_with<O: Observer>(
  bindings: &[ObserverBinding],
  mut resolve: impl FnMut(&str) -> Option<O>,
) -> usize {
  let mut issued = 0;
  for binding in bindings {
    let Ok(room) = RoomName::new(binding.target_room) else {
      warn!("observer {} bound to bad room name {}", binding.id, binding.target_room);
      continue;
    };
    let Some(observer) = resolve(binding.id) else {
      continue;
    };
    let _ = observer.observe(room);
    issued += 1;
  }
  issued
}
