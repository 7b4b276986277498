use wasm_bindgen::prelude::*;
use screeps::{
  StructureSpawn, StructureExtension, StructureObject, Transferable, RoomObject,
  Structure, HasStore, Store,
};

/// Energy sink can be:
/// - spawn
/// - spawn extension
///
/// Should only wrap owned structures that are Transferable.
#[wasm_bindgen]
extern "C" {
  /// Somewhere a harvester drops off energy.
  #[wasm_bindgen(extends = RoomObject, extends = Structure)]
  #[derive(Clone, Debug)]
  pub type EnergySink;

  #[wasm_bindgen(method, getter)]
  pub fn store(this: &EnergySink) -> Store;
}

impl EnergySink {
  /// Meant for `filter_map` over `find::MY_STRUCTURES`.
  pub fn from_structure(structure: StructureObject) -> Option<EnergySink> {
    match structure {
      StructureObject::StructureSpawn(spawn) => Some(spawn.into()),
      StructureObject::StructureExtension(ext) => Some(ext.into()),
      _ => None,
    }
  }
}

impl From<StructureSpawn> for EnergySink {
  fn from(value: StructureSpawn) -> Self {
    JsValue::from(value).into()
  }
}

impl From<StructureExtension> for EnergySink {
  fn from(value: StructureExtension) -> Self {
    JsValue::from(value).into()
  }
}

impl Transferable for EnergySink {}

impl HasStore for EnergySink {
  fn store(&self) -> Store {
    EnergySink::store(self)
  }
}
