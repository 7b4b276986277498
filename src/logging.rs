use std::panic;

use js_sys::JsString;
use wasm_bindgen::prelude::*;
use web_sys::console;

pub use log::LevelFilter::*;

struct JsLog;

impl log::Log for JsLog {
  fn enabled(&self, _: &log::Metadata<'_>) -> bool {
    true
  }

  fn log(&self, record: &log::Record<'_>) {
    console::log_1(&JsString::from(format!("{}", record.args())));
  }

  fn flush(&self) {}
}

/// Route `log` output to the game console.
///
/// Only call once per global reset; a second `apply` fails and is ignored.
pub fn setup_logging(verbosity: log::LevelFilter) {
  let applied = fern::Dispatch::new()
    .level(verbosity)
    .format(|out, message, record| {
      out.finish(format_args!(
        "({}) {}: {}",
        record.level(),
        record.target(),
        message
      ))
    })
    .chain(Box::new(JsLog) as Box<dyn log::Log>)
    .apply();
  if applied.is_err() {
    console::warn_1(&JsString::from("logger was already set up"));
  }
  panic::set_hook(Box::new(panic_hook));
}

#[wasm_bindgen]
extern "C" {
  type Error;

  #[wasm_bindgen(constructor)]
  fn new() -> Error;

  #[wasm_bindgen(structural, method, getter)]
  fn stack(error: &Error) -> String;
}

fn panic_report(message: &str, stack: &str) -> String {
  format!("panic: {}\n{}", message, stack)
}

fn panic_hook(info: &panic::PanicHookInfo<'_>) {
  let stack = Error::new().stack();
  console::error_1(&JsString::from(panic_report(&info.to_string(), &stack)));
}
