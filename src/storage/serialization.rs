use std::cell::RefCell;
use std::fmt::Debug;
use std::ops::{Deref, DerefMut};

use base64::{Engine as _, engine::general_purpose};
use log::*;
use minicbor::Encoder;
use screeps::raw_memory;
use thiserror::Error;

use crate::memory::Memory;

/// Raw memory segment holding the encoded [`Memory`].
pub const MEMORY_SEGMENT: u8 = 1;

#[derive(Debug, Error)]
pub enum MemError {
  #[error("segment is not valid base64: {0}")]
  Base64(#[from] base64::DecodeError),
  #[error("could not decode memory: {0}")]
  DecodeCbor(#[from] minicbor::decode::Error),
  #[error("could not encode memory")]
  EncodeCbor,
}

impl<T: Debug> From<minicbor::encode::Error<T>> for MemError {
  fn from(err: minicbor::encode::Error<T>) -> MemError {
    warn!("Encoding error with cbor: {:?}", err);
    MemError::EncodeCbor
  }
}

fn from_buffer(buffer: &[u8]) -> Result<Memory, MemError> {
  Ok(minicbor::decode(buffer)?)
}

fn to_buffer(memory: &Memory, buffer: &mut Vec<u8>) -> Result<(), MemError> {
  let mut encoder = Encoder::new(buffer);
  encoder.encode(memory)?;
  Ok(())
}

fn to_mem_string(data: &[u8]) -> String {
  general_purpose::STANDARD_NO_PAD.encode(data)
}

fn from_mem_string(string: &str, target: &mut Vec<u8>) -> Result<(), MemError> {
  Ok(general_purpose::STANDARD_NO_PAD.decode_vec(string, target)?)
}

fn load_mem(mem_str: &str, buffer: &mut Vec<u8>) -> Result<Memory, MemError> {
  // a wiped segment reads back as the empty string
  if mem_str.is_empty() {
    return Ok(Memory::default());
  }
  from_mem_string(mem_str, buffer)?;
  from_buffer(buffer.deref())
}

fn save_mem(memory: &Memory, buffer: &mut Vec<u8>) -> Result<String, MemError> {
  buffer.clear();
  to_buffer(memory, buffer)?;
  Ok(to_mem_string(buffer.deref()))
}

thread_local! {
  static MEMORY_DECODE_BUFFER: RefCell<Vec<u8>> = RefCell::new(Vec::new());
}

/// Decode the memory segment, hand it to `fun`, then write it back.
///
/// The segment we ask for only shows up on the following tick. Until then
/// `fun` gets a default memory and nothing is written.
pub fn with_memory(fun: impl FnOnce(&mut Memory)) {
  raw_memory::set_active_segments(&[MEMORY_SEGMENT]);

  MEMORY_DECODE_BUFFER.with(|buf_refcell| {
    let active_segments = raw_memory::segments();
    let Some(mem_str) = active_segments.get(MEMORY_SEGMENT) else {
      warn!("memory segment {} not loaded yet", MEMORY_SEGMENT);
      fun(&mut Memory::default());
      return;
    };
    let mut buffer = buf_refcell.borrow_mut();
    buffer.clear();
    let mut memory = match load_mem(&mem_str, buffer.deref_mut()) {
      Err(err) => {
        warn!("generating default memory because of error: {err}");
        Memory::default()
      },
      Ok(mem) => mem
    };
    fun(&mut memory);
    memory.last_time = screeps::game::time();
    match save_mem(&memory, buffer.deref_mut()) {
      Ok(new_mem_str) => active_segments.set(MEMORY_SEGMENT, new_mem_str),
      Err(err) => warn!("not saving memory: {err}"),
    }
  });
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::creeps::worker::WorkerState;

  #[test]
  fn serialize_deserialize_memory() {
    let mut buffer = Vec::new();
    let mut mem = Memory::default();
    mem.set_worker_state("Harvester-0", WorkerState::Deliver);
    mem.set_worker_state("Builder-1", WorkerState::Refuel);
    mem.last_time = 12345;
    let mem_str = save_mem(&mem, &mut buffer).expect("encode");
    assert!(!mem_str.ends_with('='));
    buffer.clear();
    let memory = load_mem(&mem_str, &mut buffer).expect("memory");
    assert_eq!(memory, mem);
  }

  #[test]
  fn empty_segment_is_default_memory() {
    let mut buffer = Vec::new();
    assert_eq!(load_mem("", &mut buffer).expect("memory"), Memory::default());
  }

  #[test]
  fn garbage_segment_is_an_error() {
    let mut buffer = Vec::new();
    assert!(matches!(load_mem("not base64!", &mut buffer), Err(MemError::Base64(_))));
    buffer.clear();
    let junk = to_mem_string(&[0xff, 0x00, 0x13]);
    assert!(matches!(load_mem(&junk, &mut buffer), Err(MemError::DecodeCbor(_))));
  }
}
