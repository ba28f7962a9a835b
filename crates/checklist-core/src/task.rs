use chrono::{
  DateTime,
  SubsecRound,
  Utc
};
use serde::{
  Deserialize,
  Serialize
};

/// Creation timestamp in Unix milliseconds.
///
/// Two tasks added within the same
/// millisecond share an id.
pub type TaskId = i64;

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Task {
  pub id:         TaskId,
  pub text:       String,
  pub completed:  bool,
  #[serde(with = "iso_millis")]
  pub created_at: DateTime<Utc>
}

impl Task {
  /// Builds a pending task from raw user
  /// input. Returns `None` when the input is
  /// empty after trimming.
  pub fn new(
    raw_text: &str,
    now: DateTime<Utc>
  ) -> Option<Self> {
    let text = normalize_text(raw_text)?;
    let created_at = now.trunc_subsecs(3);

    Some(Self {
      id: created_at.timestamp_millis(),
      text: text.to_string(),
      completed: false,
      created_at
    })
  }

  pub fn is_active(&self) -> bool {
    !self.completed
  }

  pub fn toggled(&self) -> Self {
    Self {
      completed: !self.completed,
      ..self.clone()
    }
  }
}

/// Trims whitespace and byte-order marks the
/// way a browser's `String.prototype.trim`
/// does.
pub fn normalize_text(
  raw: &str
) -> Option<&str> {
  let trimmed = raw.trim_matches(|c: char| {
    c.is_whitespace() || c == '\u{feff}'
  });
  if trimmed.is_empty() {
    None
  } else {
    Some(trimmed)
  }
}

/// `createdAt` as an ISO-8601 string with
/// millisecond precision, e.g.
/// `2026-10-18T09:30:00.123Z`.
mod iso_millis {
  use chrono::{
    DateTime,
    SecondsFormat,
    Utc
  };
  use serde::{
    Deserialize,
    Deserializer,
    Serializer,
    de
  };

  pub fn serialize<S>(
    value: &DateTime<Utc>,
    serializer: S
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer
  {
    serializer.serialize_str(
      &value.to_rfc3339_opts(
        SecondsFormat::Millis,
        true
      )
    )
  }

  pub fn deserialize<'de, D>(
    deserializer: D
  ) -> Result<DateTime<Utc>, D::Error>
  where
    D: Deserializer<'de>
  {
    let raw =
      String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
      .map(|dt| dt.with_timezone(&Utc))
      .map_err(|err| {
        de::Error::custom(format!(
          "invalid createdAt `{raw}`: \
           {err}"
        ))
      })
  }
}

#[cfg(test)]
mod tests {
  use chrono::{
    TimeZone,
    Utc
  };

  use super::Task;

  #[test]
  fn new_trims_and_starts_pending() {
    let now = Utc
      .with_ymd_and_hms(
        2026, 10, 18, 9, 30, 0
      )
      .single()
      .expect("valid timestamp");

    let task = Task::new("  Buy milk \n", now)
      .expect("non-empty text");

    assert_eq!(task.text, "Buy milk");
    assert!(!task.completed);
    assert_eq!(
      task.id,
      now.timestamp_millis()
    );
    assert_eq!(task.created_at, now);
  }

  #[test]
  fn new_rejects_blank_input() {
    let now = Utc::now();
    assert!(Task::new("", now).is_none());
    assert!(Task::new(" \t\n ", now).is_none());
  }

  #[test]
  fn byte_order_mark_counts_as_blank() {
    let now = Utc::now();
    assert!(Task::new("\u{feff}", now).is_none());
    assert!(
      Task::new(" \u{feff}\u{a0} ", now).is_none()
    );

    let task = Task::new("\u{feff}Buy milk\u{feff}", now)
      .expect("non-empty text");
    assert_eq!(task.text, "Buy milk");
  }

  #[test]
  fn created_at_is_truncated_to_millis() {
    let now = Utc
      .timestamp_opt(1_760_000_000, 123_456_789)
      .single()
      .expect("valid timestamp");

    let task =
      Task::new("x", now).expect("task");

    assert_eq!(
      task.created_at.timestamp_subsec_nanos(),
      123_000_000
    );
    assert_eq!(task.id, 1_760_000_000_123);
  }

  #[test]
  fn serializes_with_camel_case_and_iso_date() {
    let now = Utc
      .timestamp_opt(1_760_000_000, 123_000_000)
      .single()
      .expect("valid timestamp");
    let task =
      Task::new("Write docs", now).expect("task");

    let json = serde_json::to_value(&task)
      .expect("serialize task");

    assert_eq!(
      json,
      serde_json::json!({
        "id": 1_760_000_000_123_i64,
        "text": "Write docs",
        "completed": false,
        "createdAt": "2025-10-09T08:53:20.123Z"
      })
    );
  }

  #[test]
  fn parses_browser_style_record() {
    let raw = r#"{"id":1760000000123,"text":"a","completed":true,"createdAt":"2025-10-09T08:53:20.123Z"}"#;

    let task: Task = serde_json::from_str(raw)
      .expect("parse task");

    assert!(task.completed);
    assert_eq!(
      task.created_at.timestamp_millis(),
      1_760_000_000_123
    );
  }

  #[test]
  fn toggled_flips_only_completion() {
    let task =
      Task::new("a", Utc::now()).expect("task");
    let flipped = task.toggled();

    assert!(flipped.completed);
    assert_eq!(flipped.id, task.id);
    assert_eq!(flipped.text, task.text);
    assert_eq!(flipped.toggled(), task);
  }
}
