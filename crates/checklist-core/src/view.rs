use crate::filter::FilterMode;
use crate::task::Task;

/// Sub-sequence of `list` selected by `mode`,
/// in insertion order.
pub fn filtered_view(
  list: &[Task],
  mode: FilterMode
) -> Vec<&Task> {
  list
    .iter()
    .filter(|task| mode.matches(task))
    .collect()
}

/// Counts over the full list, independent of
/// the current filter.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub struct TaskCounts {
  pub total:     usize,
  pub active:    usize,
  pub completed: usize
}

impl TaskCounts {
  pub fn of(list: &[Task]) -> Self {
    Self {
      total:     list.len(),
      active:    list
        .iter()
        .filter(|task| !task.completed)
        .count(),
      completed: list
        .iter()
        .filter(|task| task.completed)
        .count()
    }
  }

  pub fn for_mode(
    &self,
    mode: FilterMode
  ) -> usize {
    match mode {
      | FilterMode::All => self.total,
      | FilterMode::Active => self.active,
      | FilterMode::Completed => {
        self.completed
      }
    }
  }

  /// The clear-completed action is offered
  /// only when there is something to clear.
  pub fn show_clear_completed(&self) -> bool {
    self.completed > 0
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
  pub mode:    FilterMode,
  pub visible: Vec<Task>,
  pub counts:  TaskCounts
}

impl TaskView {
  pub fn project(
    list: &[Task],
    mode: FilterMode
  ) -> Self {
    Self {
      mode,
      visible: filtered_view(list, mode)
        .into_iter()
        .cloned()
        .collect(),
      counts: TaskCounts::of(list)
    }
  }

  pub fn is_empty(&self) -> bool {
    self.visible.is_empty()
  }
}
