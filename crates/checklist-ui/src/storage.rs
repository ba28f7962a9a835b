use anyhow::anyhow;
use checklist_core::KeyValueStorage;
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// `window.localStorage`, looked up on every
/// call so a storage that becomes unavailable
/// mid-session only fails that one call.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
  fn local_storage() -> anyhow::Result<Storage> {
    web_sys::window()
      .ok_or_else(|| anyhow!("no window object"))?
      .local_storage()
      .map_err(js_error)?
      .ok_or_else(|| {
        anyhow!("localStorage is unavailable")
      })
  }
}

impl KeyValueStorage for BrowserStorage {
  fn get_item(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    Self::local_storage()?
      .get_item(key)
      .map_err(js_error)
  }

  fn set_item(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    Self::local_storage()?
      .set_item(key, value)
      .map_err(js_error)
  }
}

fn js_error(err: JsValue) -> anyhow::Error {
  match err.as_string() {
    | Some(message) => anyhow!(message),
    | None => anyhow!("{err:?}")
  }
}
