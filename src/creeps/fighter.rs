use log::*;
use screeps::constants::ErrorCode;
use screeps::{find, prelude::*, Creep, Flag, MoveToOptions, PolyStyle};

/// Name of the flag fighters gather at when there's nothing to attack.
pub const REST_FLAG: &str = "rest";

/// Stroke color for the path drawn while closing in on a target.
const CHARGE_PATH_COLOR: &str = "#ff0000";

/// The host calls the fighter routine needs.
///
/// `Creep` is the real implementation; tests use a recording fake.
pub trait Combatant {
  type Hostile;
  type Flag;

  /// Hostile creeps in the unit's room, in whatever order the host gives them.
  fn hostiles(&self) -> Vec<Self::Hostile>;
  fn flags(&self) -> Vec<Self::Flag>;
  fn flag_name(flag: &Self::Flag) -> String;

  fn attack(&self, target: &Self::Hostile) -> Result<(), ErrorCode>;
  fn ranged_attack(&self, target: &Self::Hostile) -> Result<(), ErrorCode>;
  /// Move toward a hostile, drawing the path in red.
  fn charge(&self, target: &Self::Hostile) -> Result<(), ErrorCode>;
  fn move_to_flag(&self, flag: &Self::Flag) -> Result<(), ErrorCode>;
}

#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Weapon {
  Melee,
  Ranged,
}

/// Melee fighter: hit the first hostile, or rest at the rally flag.
pub fn run<C: Combatant>(unit: &C) {
  engage(unit, Weapon::Melee)
}

/// Same as [`run`] but with `ranged_attack`.
pub fn run_ranged<C: Combatant>(unit: &C) {
  engage(unit, Weapon::Ranged)
}

pub fn engage<C: Combatant>(unit: &C, weapon: Weapon) {
  let hostiles = unit.hostiles();
  // first in whatever order the host returns, not the nearest
  if let Some(target) = hostiles.first() {
    let result = match weapon {
      Weapon::Melee => unit.attack(target),
      Weapon::Ranged => unit.ranged_attack(target),
    };
    if let Err(ErrorCode::NotInRange) = result {
      let _ = unit.charge(target);
    }
  } else if let Some(flag) = find_rest_flag(unit) {
    let _ = unit.move_to_flag(&flag);
  }
}

fn find_rest_flag<C: Combatant>(unit: &C) -> Option<C::Flag> {
  unit.flags()
    .into_iter()
    .find(|flag| C::flag_name(flag) == REST_FLAG)
}

impl Combatant for Creep {
  type Hostile = Creep;
  type Flag = Flag;

  fn hostiles(&self) -> Vec<Creep> {
    match self.room() {
      Some(room) => room.find(find::HOSTILE_CREEPS, None),
      None => {
        debug!("creep {} has no visible room", self.name());
        Vec::new()
      }
    }
  }

  fn flags(&self) -> Vec<Flag> {
    self.room()
      .map(|room| room.find(find::FLAGS, None))
      .unwrap_or_default()
  }

  fn flag_name(flag: &Flag) -> String {
    String::from(flag.name())
  }

  fn attack(&self, target: &Creep) -> Result<(), ErrorCode> {
    Creep::attack(self, target)
  }

  fn ranged_attack(&self, target: &Creep) -> Result<(), ErrorCode> {
    Creep::ranged_attack(self, target)
  }

  fn charge(&self, target: &Creep) -> Result<(), ErrorCode> {
    let style = PolyStyle::default().stroke(CHARGE_PATH_COLOR);
    self.move_to_with_options(
      target.pos(), Some(MoveToOptions::new().visualize_path_style(style)))
  }

  fn move_to_flag(&self, flag: &Flag) -> Result<(), ErrorCode> {
    self.move_to(flag.pos())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::cell::RefCell;

  #[derive(PartialEq, Eq, Debug, Clone)]
  enum Command {
    Attack(&'static str),
    RangedAttack(&'static str),
    Charge(&'static str),
    MoveToFlag(&'static str),
  }

  struct FakeUnit {
    hostiles: Vec<&'static str>,
    flags: Vec<&'static str>,
    attack_result: Result<(), ErrorCode>,
    commands: RefCell<Vec<Command>>,
  }

  impl FakeUnit {
    fn new(hostiles: &[&'static str], flags: &[&'static str]) -> FakeUnit {
      FakeUnit {
        hostiles: hostiles.to_vec(),
        flags: flags.to_vec(),
        attack_result: Ok(()),
        commands: RefCell::new(Vec::new()),
      }
    }

    fn attack_result(mut self, result: Result<(), ErrorCode>) -> FakeUnit {
      self.attack_result = result;
      self
    }

    fn commands(&self) -> Vec<Command> {
      self.commands.borrow().clone()
    }
  }

  impl Combatant for FakeUnit {
    type Hostile = &'static str;
    type Flag = &'static str;

    fn hostiles(&self) -> Vec<&'static str> {
      self.hostiles.clone()
    }

    fn flags(&self) -> Vec<&'static str> {
      self.flags.clone()
    }

    fn flag_name(flag: &&'static str) -> String {
      flag.to_string()
    }

    fn attack(&self, target: &&'static str) -> Result<(), ErrorCode> {
      self.commands.borrow_mut().push(Command::Attack(*target));
      self.attack_result.clone()
    }

    fn ranged_attack(&self, target: &&'static str) -> Result<(), ErrorCode> {
      self.commands.borrow_mut().push(Command::RangedAttack(*target));
      self.attack_result.clone()
    }

    fn charge(&self, target: &&'static str) -> Result<(), ErrorCode> {
      self.commands.borrow_mut().push(Command::Charge(*target));
      Ok(())
    }

    fn move_to_flag(&self, flag: &&'static str) -> Result<(), ErrorCode> {
      self.commands.borrow_mut().push(Command::MoveToFlag(*flag));
      Ok(())
    }
  }

  #[test]
  fn attacks_first_hostile() {
    let unit = FakeUnit::new(&["H1", "H2"], &["rest"]);
    run(&unit);
    assert_eq!(unit.commands(), vec![Command::Attack("H1")]);
  }

  #[test]
  fn charges_same_target_when_out_of_range() {
    let unit = FakeUnit::new(&["H1", "H2"], &[])
      .attack_result(Err(ErrorCode::NotInRange));
    run(&unit);
    assert_eq!(unit.commands(), vec![Command::Attack("H1"), Command::Charge("H1")]);
  }

  #[test]
  fn other_attack_failures_are_ignored() {
    for err in [ErrorCode::NoBodypart, ErrorCode::Busy, ErrorCode::InvalidTarget] {
      let unit = FakeUnit::new(&["H1"], &["rest"]).attack_result(Err(err));
      run(&unit);
      assert_eq!(unit.commands(), vec![Command::Attack("H1")]);
    }
  }

  #[test]
  fn rests_at_flag_without_hostiles() {
    let unit = FakeUnit::new(&[], &["home", "rest", "rest2"]);
    run(&unit);
    assert_eq!(unit.commands(), vec![Command::MoveToFlag("rest")]);
  }

  #[test]
  fn flag_name_must_match_exactly() {
    let unit = FakeUnit::new(&[], &["Rest", "rest "]);
    run(&unit);
    assert!(unit.commands().is_empty());
  }

  #[test]
  fn idles_without_hostiles_or_flag() {
    let unit = FakeUnit::new(&[], &[]);
    run(&unit);
    assert!(unit.commands().is_empty());
  }

  #[test]
  fn ranged_uses_ranged_attack() {
    let unit = FakeUnit::new(&["H2", "H1"], &[])
      .attack_result(Err(ErrorCode::NotInRange));
    run_ranged(&unit);
    assert_eq!(
      unit.commands(),
      vec![Command::RangedAttack("H2"), Command::Charge("H2")]);

    let unit = FakeUnit::new(&[], &["rest"]);
    run_ranged(&unit);
    assert_eq!(unit.commands(), vec![Command::MoveToFlag("rest")]);
  }

  #[test]
  fn other_ranged_failures_are_ignored() {
    let unit = FakeUnit::new(&["H1", "H2"], &["rest"])
      .attack_result(Err(ErrorCode::NoBodypart));
    run_ranged(&unit);
    assert_eq!(unit.commands(), vec![Command::RangedAttack("H1")]);
  }
}
