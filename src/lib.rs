mod util;
mod storage;
mod logging;
mod memory;
mod creeps;
mod notify;
mod observers;

use log::*;
use screeps::game;
use wasm_bindgen::prelude::*;

use crate::memory::Memory;
use crate::notify::{GameNotifier, NotifyLimiter};
use crate::storage::serialization::with_memory;

static INIT_LOGGING: std::sync::Once = std::sync::Once::new();

#[wasm_bindgen(js_name = loop)]
pub fn game_loop() {
  INIT_LOGGING.call_once(|| {
    logging::setup_logging(logging::Info);
  });
  with_memory(|mem| {
    creeps::creep_loop::creep_loop(mem);
    clean_up(mem);
  });
  observers::run_all_observers();

  let limiter = notify::alert_hostiles(NotifyLimiter::load(), &mut GameNotifier);
  limiter.store();

  info!("done! cpu: {}", game::cpu::get_used());
}

fn clean_up(memory: &mut Memory) {
  let game_creeps = game::creeps();
  let forgotten = memory.clean_up(game::time(), |name| game_creeps.get(name.to_string()).is_some());
  if forgotten > 0 {
    debug!("forgot worker state for {} dead creeps", forgotten);
  }
}
