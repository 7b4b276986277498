//! Rate limited alerts through `Game.notify`.
//!
//! The limiter is plain data. It's loaded from `Memory.noNotificationBefore`
//! at the start of a tick, passed through every [`notify`] call, and stored
//! back once at the end.

use js_sys::{JsString, Reflect};
use log::*;
use screeps::{find, game, prelude::*};
use wasm_bindgen::JsValue;

/// Minimum number of ticks between two notifications.
pub const NOTIFY_INTERVAL: u32 = 1000;

const LIMITER_KEY: &str = "noNotificationBefore";

#[derive(PartialEq, Eq, Debug, Copy, Clone, Default)]
pub struct NotifyLimiter {
  pub no_notification_before: u32,
}

impl NotifyLimiter {
  pub fn allows(self, now: u32) -> bool {
    now >= self.no_notification_before
  }

  pub fn load() -> NotifyLimiter {
    let no_notification_before = Reflect::get(&screeps::memory::ROOT, &JsString::from(LIMITER_KEY))
      .ok()
      .and_then(|val| val.as_f64())
      .filter(|val| val.is_finite() && *val >= 0.0)
      .map_or(0, |val| val as u32);
    NotifyLimiter { no_notification_before }
  }

  pub fn store(self) {
    let val = JsValue::from_f64(self.no_notification_before as f64);
    if Reflect::set(&screeps::memory::ROOT, &JsString::from(LIMITER_KEY), &val).is_err() {
      warn!("could not write {} to memory", LIMITER_KEY);
    }
  }
}

pub trait Notifier {
  fn send(&mut self, message: &str);
}

pub struct GameNotifier;

impl Notifier for GameNotifier {
  fn send(&mut self, message: &str) {
    game::notify(message, None);
  }
}

/// Send `message` unless we've sent one in the last [`NOTIFY_INTERVAL`] ticks.
///
/// Returns the limiter to use for the next call.
pub fn notify(
  limiter: NotifyLimiter, now: u32, message: &str, sender: &mut impl Notifier
) -> NotifyLimiter {
  if !limiter.allows(now) {
    debug!("suppressed notification: {}", message);
    return limiter;
  }
  sender.send(message);
  NotifyLimiter { no_notification_before: now.saturating_add(NOTIFY_INTERVAL) }
}

fn hostile_message(room: &str, count: usize, now: u32) -> String {
  format!("{} hostile creeps in {} at tick {}", count, room, now)
}

/// Alert on every room we own that has hostiles in it.
pub fn alert_hostiles(limiter: NotifyLimiter, sender: &mut impl Notifier) -> NotifyLimiter {
  let now = game::time();
  let mut limiter = limiter;
  for room in game::rooms().values() {
    let owned = room.controller().map_or(false, |controller| controller.my());
    if !owned {
      continue;
    }
    let count = room.find(find::HOSTILE_CREEPS, None).len();
    if count > 0 {
      let message = hostile_message(&room.name().to_string(), count, now);
      info!("{}", message);
      limiter = notify(limiter, now, &message, sender);
    }
  }
  limiter
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Default)]
  struct Outbox(Vec<String>);

  impl Notifier for Outbox {
    fn send(&mut self, message: &str) {
      self.0.push(message.to_string());
    }
  }

  #[test]
  fn first_notification_goes_through() {
    let mut outbox = Outbox::default();
    let limiter = notify(NotifyLimiter::default(), 42, "hello", &mut outbox);
    assert_eq!(outbox.0, vec!["hello".to_string()]);
    assert_eq!(limiter.no_notification_before, 42 + NOTIFY_INTERVAL);
  }

  #[test]
  fn suppresses_until_interval_passes() {
    let mut outbox = Outbox::default();
    let limiter = notify(NotifyLimiter::default(), 100, "a", &mut outbox);
    let limiter = notify(limiter, 101, "b", &mut outbox);
    let limiter = notify(limiter, 100 + NOTIFY_INTERVAL - 1, "c", &mut outbox);
    assert_eq!(outbox.0, vec!["a".to_string()]);
    let limiter = notify(limiter, 100 + NOTIFY_INTERVAL, "d", &mut outbox);
    assert_eq!(outbox.0, vec!["a".to_string(), "d".to_string()]);
    assert_eq!(limiter.no_notification_before, 100 + 2 * NOTIFY_INTERVAL);
  }

  #[test]
  fn suppressed_call_leaves_limiter_alone() {
    let mut outbox = Outbox::default();
    let limiter = NotifyLimiter { no_notification_before: 500 };
    assert_eq!(notify(limiter, 499, "x", &mut outbox), limiter);
    assert!(outbox.0.is_empty());
  }

  #[test]
  fn limiter_saturates_near_max_time() {
    let mut outbox = Outbox::default();
    let limiter = notify(NotifyLimiter::default(), u32::MAX - 1, "late", &mut outbox);
    assert_eq!(limiter.no_notification_before, u32::MAX);
  }

  #[test]
  fn hostile_message_names_room() {
    assert_eq!(hostile_message("W1N1", 3, 77), "3 hostile creeps in W1N1 at tick 77");
  }
}
