use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{
  Deserialize,
  Serialize
};

use crate::task::Task;

/// Display filter over the task list.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
  #[default]
  All,
  Active,
  Completed
}

impl FilterMode {
  pub const VALUES: [FilterMode; 3] = [
    FilterMode::All,
    FilterMode::Active,
    FilterMode::Completed
  ];

  /// The literal persisted for this mode.
  pub fn as_str(self) -> &'static str {
    match self {
      | FilterMode::All => "all",
      | FilterMode::Active => "active",
      | FilterMode::Completed => {
        "completed"
      }
    }
  }

  /// Strict parse of a persisted literal.
  /// Case and surrounding whitespace are
  /// significant.
  pub fn parse(raw: &str) -> Option<Self> {
    match raw {
      | "all" => Some(FilterMode::All),
      | "active" => Some(FilterMode::Active),
      | "completed" => {
        Some(FilterMode::Completed)
      }
      | _ => None
    }
  }

  pub fn matches(self, task: &Task) -> bool {
    match self {
      | FilterMode::All => true,
      | FilterMode::Active => !task.completed,
      | FilterMode::Completed => task.completed
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | FilterMode::All => "All",
      | FilterMode::Active => "Active",
      | FilterMode::Completed => "Completed"
    }
  }

  /// Text shown when the filtered view has no
  /// rows.
  pub fn empty_message(self) -> &'static str {
    match self {
      | FilterMode::All => {
        "The task list is empty"
      }
      | FilterMode::Active => "No active tasks",
      | FilterMode::Completed => {
        "No completed tasks"
      }
    }
  }
}

impl fmt::Display for FilterMode {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for FilterMode {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    FilterMode::parse(s).ok_or_else(|| {
      anyhow!(
        "unknown filter mode `{s}`; expected \
         all, active or completed"
      )
    })
  }
}
