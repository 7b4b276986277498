use std::fmt;
use std::str::FromStr;

use js_sys::{JsString, Reflect};
use screeps::Creep;
use thiserror::Error;
use wasm_bindgen::JsValue;

macro_rules! gen_roles {
  ($($s:literal => $t:ident)*) => {
    /// The behavior a creep runs each tick.
    ///
    /// Stored in the creep's memory as the lowercase literal.
    #[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
    pub enum RoleTag {
      $($t),*
    }

    impl RoleTag {
      pub fn as_str(self) -> &'static str {
        match self {
          $(RoleTag::$t => $s),*
        }
      }
    }

    impl FromStr for RoleTag {
      type Err = RoleMemoryError;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
          $($s => Ok(RoleTag::$t),)*
          other => Err(RoleMemoryError::UnknownRole(other.to_string())),
        }
      }
    }
  }
}

gen_roles! {
  "harvester" => Harvester
  "upgrader" => Upgrader
  "builder" => Builder
  "ranged" => Ranged
  "fighter" => Fighter
}

impl fmt::Display for RoleTag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoleMemoryError {
  #[error("creep memory has no role")]
  MissingRole,
  #[error("unknown role {0:?}")]
  UnknownRole(String),
}

/// The host-owned memory record of a single creep.
///
/// Created by whoever spawned the creep. We only ever read it.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct CreepMemory {
  pub role: RoleTag,
  pub sub_role: Option<String>,
}

const ROLE_KEY: &str = "role";
const SUB_ROLE_KEY: &str = "subRole";

fn string_field(obj: &JsValue, key: &str) -> Option<String> {
  Reflect::get(obj, &JsString::from(key))
    .ok()
    .and_then(|val| val.as_string())
}

impl CreepMemory {
  pub fn from_fields(
    role: Option<String>, sub_role: Option<String>
  ) -> Result<CreepMemory, RoleMemoryError> {
    let role = role.ok_or(RoleMemoryError::MissingRole)?.parse()?;
    Ok(CreepMemory { role, sub_role })
  }

  pub fn load(creep: &Creep) -> Result<CreepMemory, RoleMemoryError> {
    let mem = creep.memory();
    if mem.is_undefined() || mem.is_null() {
      return Err(RoleMemoryError::MissingRole);
    }
    Self::from_fields(string_field(&mem, ROLE_KEY), string_field(&mem, SUB_ROLE_KEY))
  }
}
