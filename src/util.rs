use log::*;
use screeps::{
  Creep, ErrorCode, FindConstant, ResourceType, game, prelude::*,
};
use screeps::local::Position;

pub fn energy_full<T: HasStore>(obj: &T) -> bool {
  obj.store().get_free_capacity(Some(ResourceType::Energy)) == 0
}

pub fn energy_empty<T: HasStore>(obj: &T) -> bool {
  obj.store().get_used_capacity(Some(ResourceType::Energy)) == 0
}

/// Find the closest object in the room that passes the filter.
pub fn filter_map_closest_by_range<F: FindConstant, T>(
  find: F,
  pos: Position,
  mut pred: impl FnMut(F::Item) -> Option<T>
) -> Option<T> where F::Item: HasPosition {
  let room = game::rooms().get(pos.room_name())?;
  room.find(find, None)
    .into_iter()
    .filter_map(move |item| {
      let item_pos = item.pos();
      pred(item).map(|val| (item_pos, val))
    })
    .min_by_key(|(item_pos,_)| item_pos.get_range_to(pos))
    .map(|(_,val)| val)
}

/// Run `op` if the creep is within `range` of `obj`, otherwise walk toward it.
pub fn move_to_do<T: HasPosition>(
  creep: &Creep, obj: &T, range: u32, op: impl FnOnce()
) {
  if creep.pos().in_range_to(obj.pos(), range) {
    op();
  } else {
    match creep.move_to(obj.pos()) {
      Ok(()) => (),
      Err(ErrorCode::Tired) => (),
      Err(e) => warn!("Creep {} couldn't move because: {:?}", creep.name(), e),
    }
  }
}

#[macro_export]
macro_rules! log_warn {
  ($e:expr, $err_name:ident => $l:literal) => {
    if let Err($err_name) = $e {
      log::warn!($l);
    }
  };
  ($e:expr, $err_name:ident => $l:literal, $($arg:expr),*) => {
    if let Err($err_name) = $e {
      log::warn!($l, $($arg),*);
    }
  };
}
