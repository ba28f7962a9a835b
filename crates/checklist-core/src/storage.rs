use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use anyhow::bail;
use tracing::trace;

/// String key/value medium the store persists
/// into, shaped after `window.localStorage`.
pub trait KeyValueStorage {
  fn get_item(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>>;

  fn set_item(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()>;
}

impl<S> KeyValueStorage for Rc<S>
where
  S: KeyValueStorage + ?Sized
{
  fn get_item(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    (**self).get_item(key)
  }

  fn set_item(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    (**self).set_item(key, value)
  }
}

/// In-process storage for tests and native
/// hosts. An optional quota (in bytes of keys
/// plus values) makes oversized writes fail
/// the way a full browser store does.
#[derive(Debug, Default)]
pub struct MemoryStorage {
  entries:     RefCell<BTreeMap<String, String>>,
  quota_bytes: Option<usize>
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_quota(quota_bytes: usize) -> Self {
    Self {
      entries:     RefCell::default(),
      quota_bytes: Some(quota_bytes)
    }
  }

  pub fn used_bytes(&self) -> usize {
    self
      .entries
      .borrow()
      .iter()
      .map(|(k, v)| k.len() + v.len())
      .sum()
  }

  pub fn remove_item(&self, key: &str) {
    self.entries.borrow_mut().remove(key);
  }

  pub fn len(&self) -> usize {
    self.entries.borrow().len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.borrow().is_empty()
  }
}

impl KeyValueStorage for MemoryStorage {
  fn get_item(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    Ok(self.entries.borrow().get(key).cloned())
  }

  fn set_item(
    &self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    if let Some(quota) = self.quota_bytes {
      let replaced = self
        .entries
        .borrow()
        .get(key)
        .map(|old| key.len() + old.len())
        .unwrap_or(0);
      let projected = self.used_bytes()
        - replaced
        + key.len()
        + value.len();
      if projected > quota {
        bail!(
          "storage quota exceeded: writing \
           `{key}` needs {projected} bytes, \
           quota is {quota}"
        );
      }
    }

    trace!(key, bytes = value.len(), "set item");
    self
      .entries
      .borrow_mut()
      .insert(key.to_string(), value.to_string());
    Ok(())
  }
}
