//! Load/save helpers bridging store state to a
//! [`KeyValueStorage`]. Loads never fail: any
//! problem degrades to the default value and is
//! logged. Saves never fail either; errors are
//! logged and dropped.

use anyhow::{
  Context,
  bail
};
use chrono::{
  DateTime,
  NaiveDate,
  Utc
};
use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  error,
  warn
};

use crate::filter::FilterMode;
use crate::storage::KeyValueStorage;
use crate::task::{
  Task,
  TaskId
};

pub const DEFAULT_LIST_KEY: &str =
  "mindbox-todos";
pub const DEFAULT_FILTER_KEY: &str =
  "mindbox-filter";

/// The two storage entries the store owns.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(default)]
pub struct StorageKeys {
  pub list_key:   String,
  pub filter_key: String
}

impl Default for StorageKeys {
  fn default() -> Self {
    Self {
      list_key:   DEFAULT_LIST_KEY.to_string(),
      filter_key: DEFAULT_FILTER_KEY
        .to_string()
    }
  }
}

#[tracing::instrument(skip(storage, keys), fields(key = %keys.list_key))]
pub fn load_list<S>(
  storage: &S,
  keys: &StorageKeys
) -> Vec<Task>
where
  S: KeyValueStorage + ?Sized
{
  match read_list(storage, &keys.list_key) {
    | Ok(tasks) => {
      debug!(
        count = tasks.len(),
        "loaded task list"
      );
      tasks
    }
    | Err(err) => {
      error!(
        error = %format_args!("{err:#}"),
        "failed loading task list from \
         storage; starting empty"
      );
      Vec::new()
    }
  }
}

#[tracing::instrument(skip(storage, keys, tasks), fields(key = %keys.list_key, count = tasks.len()))]
pub fn save_list<S>(
  storage: &S,
  keys: &StorageKeys,
  tasks: &[Task]
) where
  S: KeyValueStorage + ?Sized
{
  let result = serde_json::to_string(tasks)
    .context("failed serializing task list")
    .and_then(|json| {
      storage.set_item(&keys.list_key, &json)
    });

  match result {
    | Ok(()) => debug!("saved task list"),
    | Err(err) => {
      error!(
        error = %format_args!("{err:#}"),
        "failed saving task list to storage"
      );
    }
  }
}

#[tracing::instrument(skip(storage, keys), fields(key = %keys.filter_key))]
pub fn load_filter<S>(
  storage: &S,
  keys: &StorageKeys
) -> FilterMode
where
  S: KeyValueStorage + ?Sized
{
  let stored = match storage
    .get_item(&keys.filter_key)
  {
    | Ok(stored) => stored,
    | Err(err) => {
      error!(
        error = %format_args!("{err:#}"),
        "failed loading filter from storage"
      );
      return FilterMode::default();
    }
  };

  match stored.as_deref() {
    | None | Some("") => FilterMode::default(),
    | Some(raw) => {
      FilterMode::parse(raw).unwrap_or_else(|| {
        warn!(
          value = raw,
          "ignoring unknown stored filter"
        );
        FilterMode::default()
      })
    }
  }
}

#[tracing::instrument(skip(storage, keys), fields(key = %keys.filter_key))]
pub fn save_filter<S>(
  storage: &S,
  keys: &StorageKeys,
  mode: FilterMode
) where
  S: KeyValueStorage + ?Sized
{
  match storage
    .set_item(&keys.filter_key, mode.as_str())
  {
    | Ok(()) => debug!("saved filter"),
    | Err(err) => {
      error!(
        error = %format_args!("{err:#}"),
        "failed saving filter to storage"
      );
    }
  }
}

fn read_list<S>(
  storage: &S,
  key: &str
) -> anyhow::Result<Vec<Task>>
where
  S: KeyValueStorage + ?Sized
{
  let raw = storage
    .get_item(key)
    .with_context(|| {
      format!("failed reading `{key}`")
    })?;

  let Some(raw) = raw.filter(|r| !r.is_empty())
  else {
    return Ok(Vec::new());
  };

  let value: serde_json::Value =
    serde_json::from_str(&raw).with_context(
      || format!("`{key}` is not valid JSON")
    )?;

  let records = match value {
    | serde_json::Value::Array(records) => {
      records
    }
    | other => {
      bail!(
        "`{key}` holds {}, expected an array",
        json_kind(&other)
      )
    }
  };

  let total = records.len();
  let tasks: Vec<Task> = records
    .into_iter()
    .enumerate()
    .filter_map(|(index, record)| {
      match decode_record(record) {
        | Ok(task) => Some(task),
        | Err(err) => {
          warn!(
            index,
            error = %format_args!("{err:#}"),
            "skipping malformed task record"
          );
          None
        }
      }
    })
    .collect();

  if tasks.len() < total {
    warn!(
      kept = tasks.len(),
      skipped = total - tasks.len(),
      "loaded task list partially"
    );
  }
  Ok(tasks)
}

/// A stored record as written by any version of
/// the widget. `createdAt` may be missing,
/// `null` (an invalid date serialized by a
/// browser), date-only, or a full timestamp.
#[derive(Deserialize)]
struct StoredTask {
  id:         TaskId,
  text:       String,
  #[serde(default)]
  completed:  bool,
  #[serde(default, rename = "createdAt")]
  created_at: Option<serde_json::Value>
}

fn decode_record(
  record: serde_json::Value
) -> anyhow::Result<Task> {
  let stored: StoredTask =
    serde_json::from_value(record).context(
      "record needs a numeric id and a text"
    )?;

  let created_at = stored
    .created_at
    .as_ref()
    .and_then(serde_json::Value::as_str)
    .and_then(parse_created_at)
    .or_else(|| {
      debug!(
        id = stored.id,
        "deriving createdAt from id"
      );
      DateTime::from_timestamp_millis(stored.id)
    })
    .with_context(|| {
      format!(
        "record {} has no usable createdAt",
        stored.id
      )
    })?;

  Ok(Task {
    id: stored.id,
    text: stored.text,
    completed: stored.completed,
    created_at
  })
}

fn parse_created_at(
  raw: &str
) -> Option<DateTime<Utc>> {
  if let Ok(parsed) =
    DateTime::parse_from_rfc3339(raw)
  {
    return Some(parsed.with_timezone(&Utc));
  }

  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .ok()
    .and_then(|date| date.and_hms_opt(0, 0, 0))
    .map(|midnight| midnight.and_utc())
}

fn json_kind(
  value: &serde_json::Value
) -> &'static str {
  match value {
    | serde_json::Value::Null => "null",
    | serde_json::Value::Bool(_) => "a boolean",
    | serde_json::Value::Number(_) => {
      "a number"
    }
    | serde_json::Value::String(_) => {
      "a string"
    }
    | serde_json::Value::Array(_) => {
      "an array"
    }
    | serde_json::Value::Object(_) => {
      "an object"
    }
  }
}

#[cfg(test)]
mod tests {
  use anyhow::anyhow;
  use chrono::{
    Duration,
    TimeZone,
    Utc
  };

  use super::*;
  use crate::storage::MemoryStorage;

  struct BrokenStorage;

  impl KeyValueStorage for BrokenStorage {
    fn get_item(
      &self,
      _key: &str
    ) -> anyhow::Result<Option<String>> {
      Err(anyhow!("storage unavailable"))
    }

    fn set_item(
      &self,
      _key: &str,
      _value: &str
    ) -> anyhow::Result<()> {
      Err(anyhow!("storage unavailable"))
    }
  }

  fn sample() -> Vec<Task> {
    let start = Utc
      .timestamp_opt(1_760_000_000, 987_654_321)
      .single()
      .expect("valid timestamp");
    let first =
      Task::new("Buy milk", start).expect("task");
    let second = Task::new(
      "Call mom",
      start + Duration::milliseconds(5)
    )
    .expect("task")
    .toggled();
    vec![first, second]
  }

  #[test]
  fn list_round_trips_through_storage() {
    let storage = MemoryStorage::new();
    let keys = StorageKeys::default();
    let tasks = sample();

    save_list(&storage, &keys, &tasks);

    assert_eq!(load_list(&storage, &keys), tasks);
  }

  #[test]
  fn stored_layout_matches_browser_format() {
    let storage = MemoryStorage::new();
    let keys = StorageKeys::default();
    save_list(&storage, &keys, &sample());

    let raw = storage
      .get_item(DEFAULT_LIST_KEY)
      .expect("get")
      .expect("list entry written");
    let value: serde_json::Value =
      serde_json::from_str(&raw).expect("json");

    assert_eq!(
      value[0]["createdAt"],
      "2025-10-09T08:53:20.987Z"
    );
    assert_eq!(value[1]["completed"], true);
    assert_eq!(value[1]["text"], "Call mom");
  }

  #[test]
  fn missing_or_empty_entry_loads_empty_list() {
    let storage = MemoryStorage::new();
    let keys = StorageKeys::default();
    assert!(load_list(&storage, &keys).is_empty());

    storage
      .set_item(DEFAULT_LIST_KEY, "")
      .expect("set");
    assert!(load_list(&storage, &keys).is_empty());
  }

  #[test]
  fn malformed_payloads_load_empty_list() {
    let storage = MemoryStorage::new();
    let keys = StorageKeys::default();

    for raw in [
      "{not json",
      "{\"id\":1}",
      "42",
      "\"text\"",
      "null"
    ] {
      storage
        .set_item(DEFAULT_LIST_KEY, raw)
        .expect("set");
      assert!(
        load_list(&storage, &keys).is_empty(),
        "payload {raw} should load empty"
      );
    }
  }

  #[test]
  fn bad_record_does_not_drop_good_ones() {
    let storage = MemoryStorage::new();
    let keys = StorageKeys::default();
    let good = sample();
    let mut records: Vec<serde_json::Value> =
      good
        .iter()
        .map(|t| {
          serde_json::to_value(t).expect("to value")
        })
        .collect();
    records.insert(1, serde_json::json!(42));
    records.push(serde_json::json!({
      "text": "no id"
    }));
    records.push(serde_json::json!({
      "id": 7,
      "text": "bad flag",
      "completed": "yes"
    }));
    storage
      .set_item(
        DEFAULT_LIST_KEY,
        &serde_json::Value::Array(records)
          .to_string()
      )
      .expect("set");

    assert_eq!(load_list(&storage, &keys), good);
  }

  #[test]
  fn lenient_created_at_keeps_records() {
    let storage = MemoryStorage::new();
    let keys = StorageKeys::default();
    let good = &sample()[0];
    let raw = serde_json::json!([
      good,
      {
        "id": 1_760_000_000_500_i64,
        "text": "null date",
        "completed": false,
        "createdAt": null
      },
      {
        "id": 1_760_000_000_600_i64,
        "text": "date only",
        "completed": true,
        "createdAt": "2025-10-09"
      },
      {
        "id": 1_760_000_000_700_i64,
        "text": "no date"
      },
      {
        "id": 1_760_000_000_800_i64,
        "text": "garbage date",
        "completed": false,
        "createdAt": "yesterday"
      }
    ]);
    storage
      .set_item(DEFAULT_LIST_KEY, &raw.to_string())
      .expect("set");

    let loaded = load_list(&storage, &keys);

    assert_eq!(loaded.len(), 5);
    assert_eq!(&loaded[0], good);
    assert_eq!(
      loaded[1].created_at.timestamp_millis(),
      1_760_000_000_500
    );
    assert_eq!(
      loaded[2].created_at,
      Utc
        .with_ymd_and_hms(2025, 10, 9, 0, 0, 0)
        .single()
        .expect("valid timestamp")
    );
    assert!(loaded[2].completed);
    assert!(!loaded[3].completed);
    assert_eq!(
      loaded[3].created_at.timestamp_millis(),
      1_760_000_000_700
    );
    assert_eq!(
      loaded[4].created_at.timestamp_millis(),
      1_760_000_000_800
    );
  }

  #[test]
  fn filter_round_trips_as_raw_literal() {
    let storage = MemoryStorage::new();
    let keys = StorageKeys::default();

    save_filter(
      &storage,
      &keys,
      FilterMode::Completed
    );

    assert_eq!(
      storage
        .get_item(DEFAULT_FILTER_KEY)
        .expect("get"),
      Some("completed".to_string())
    );
    assert_eq!(
      load_filter(&storage, &keys),
      FilterMode::Completed
    );
  }

  #[test]
  fn unknown_filter_falls_back_to_all() {
    let storage = MemoryStorage::new();
    let keys = StorageKeys::default();
    assert_eq!(
      load_filter(&storage, &keys),
      FilterMode::All
    );

    for raw in ["\"active\"", "Active", "done"] {
      storage
        .set_item(DEFAULT_FILTER_KEY, raw)
        .expect("set");
      assert_eq!(
        load_filter(&storage, &keys),
        FilterMode::All
      );
    }
  }

  #[test]
  fn broken_storage_degrades_to_defaults() {
    let keys = StorageKeys::default();

    assert!(load_list(&BrokenStorage, &keys).is_empty());
    assert_eq!(
      load_filter(&BrokenStorage, &keys),
      FilterMode::All
    );

    save_list(&BrokenStorage, &keys, &sample());
    save_filter(
      &BrokenStorage,
      &keys,
      FilterMode::Active
    );
  }

  #[test]
  fn quota_failure_keeps_previous_entry() {
    let storage = MemoryStorage::with_quota(200);
    let keys = StorageKeys::default();
    let tasks = sample();
    save_list(&storage, &keys, &tasks[..1]);

    let mut big = tasks.clone();
    big.push(
      Task::new(&"x".repeat(500), Utc::now())
        .expect("task")
    );
    save_list(&storage, &keys, &big);

    assert_eq!(
      load_list(&storage, &keys),
      tasks[..1].to_vec()
    );
  }

  #[test]
  fn custom_keys_are_respected() {
    let storage = MemoryStorage::new();
    let keys = StorageKeys {
      list_key:   "a".to_string(),
      filter_key: "b".to_string()
    };

    save_list(&storage, &keys, &sample());
    save_filter(&storage, &keys, FilterMode::Active);

    assert!(
      storage
        .get_item(DEFAULT_LIST_KEY)
        .expect("get")
        .is_none()
    );
    assert_eq!(load_list(&storage, &keys).len(), 2);
    assert_eq!(
      load_filter(&storage, &keys),
      FilterMode::Active
    );
  }
}
