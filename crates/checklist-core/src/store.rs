use std::rc::Rc;

use tracing::{
  debug,
  info
};

use crate::clock::{
  Clock,
  SystemClock
};
use crate::filter::FilterMode;
use crate::persist::{
  StorageKeys,
  load_filter,
  load_list,
  save_filter,
  save_list
};
use crate::storage::KeyValueStorage;
use crate::task::{
  Task,
  TaskId
};
use crate::view::{
  TaskCounts,
  TaskView
};

/// Owner of the task list and filter mode.
///
/// The list is shared immutably; every
/// mutation swaps in a freshly built sequence,
/// so `Rc::ptr_eq` on [`TaskStore::tasks`]
/// tells a caller whether anything changed.
/// Each transition that changes state writes
/// the affected entry back to storage before
/// returning.
#[derive(Debug, Clone)]
pub struct TaskStore<S, C = SystemClock> {
  storage: S,
  keys:    StorageKeys,
  clock:   C,
  tasks:   Rc<[Task]>,
  filter:  FilterMode
}

impl<S, C> TaskStore<S, C>
where
  S: KeyValueStorage,
  C: Clock
{
  /// Hydrates list and filter from storage.
  #[tracing::instrument(skip_all, fields(list_key = %keys.list_key, filter_key = %keys.filter_key))]
  pub fn open(
    storage: S,
    keys: StorageKeys,
    clock: C
  ) -> Self {
    let tasks = load_list(&storage, &keys);
    let filter = load_filter(&storage, &keys);

    info!(
      tasks = tasks.len(),
      %filter,
      "opened task store"
    );

    Self {
      storage,
      keys,
      clock,
      tasks: tasks.into(),
      filter
    }
  }

  pub fn tasks(&self) -> &Rc<[Task]> {
    &self.tasks
  }

  pub fn filter(&self) -> FilterMode {
    self.filter
  }

  pub fn storage(&self) -> &S {
    &self.storage
  }

  pub fn counts(&self) -> TaskCounts {
    TaskCounts::of(&self.tasks)
  }

  pub fn view(&self) -> TaskView {
    TaskView::project(&self.tasks, self.filter)
  }

  /// Appends a pending task. Blank input is
  /// ignored and returns `None`.
  #[tracing::instrument(skip(self, text))]
  pub fn add(
    &mut self,
    text: &str
  ) -> Option<TaskId> {
    let Some(task) =
      Task::new(text, self.clock.now())
    else {
      debug!("ignoring blank task text");
      return None;
    };

    let id = task.id;
    let next: Vec<Task> = self
      .tasks
      .iter()
      .cloned()
      .chain(std::iter::once(task))
      .collect();
    self.replace_tasks(next);

    debug!(id, "added task");
    Some(id)
  }

  /// Flips completion on every task with `id`.
  #[tracing::instrument(skip(self))]
  pub fn toggle(&mut self, id: TaskId) -> bool {
    if !self.tasks.iter().any(|t| t.id == id) {
      debug!(id, "toggle: no such task");
      return false;
    }

    let next = self
      .tasks
      .iter()
      .map(|task| {
        if task.id == id {
          task.toggled()
        } else {
          task.clone()
        }
      })
      .collect();
    self.replace_tasks(next);
    true
  }

  #[tracing::instrument(skip(self))]
  pub fn delete(&mut self, id: TaskId) -> bool {
    self.retain(|task| task.id != id)
  }

  #[tracing::instrument(skip(self))]
  pub fn clear_completed(&mut self) -> bool {
    self.retain(Task::is_active)
  }

  #[tracing::instrument(skip(self))]
  pub fn set_filter(
    &mut self,
    mode: FilterMode
  ) -> bool {
    if self.filter == mode {
      return false;
    }

    self.filter = mode;
    save_filter(&self.storage, &self.keys, mode);
    true
  }

  fn retain<F>(&mut self, keep: F) -> bool
  where
    F: Fn(&Task) -> bool
  {
    let next: Vec<Task> = self
      .tasks
      .iter()
      .filter(|&task| keep(task))
      .cloned()
      .collect();

    if next.len() == self.tasks.len() {
      return false;
    }

    debug!(
      removed = self.tasks.len() - next.len(),
      "removed tasks"
    );
    self.replace_tasks(next);
    true
  }

  fn replace_tasks(&mut self, next: Vec<Task>) {
    self.tasks = next.into();
    save_list(&self.storage, &self.keys, &self.tasks);
  }
}
