pub mod clock;
pub mod config;
pub mod filter;
pub mod logging;
pub mod persist;
pub mod storage;
pub mod store;
pub mod task;
pub mod view;

pub use clock::{
  Clock,
  SteppingClock,
  SystemClock
};
pub use config::Config;
pub use filter::FilterMode;
pub use persist::{
  StorageKeys,
  load_filter,
  load_list,
  save_filter,
  save_list
};
pub use storage::{
  KeyValueStorage,
  MemoryStorage
};
pub use store::TaskStore;
pub use task::{
  Task,
  TaskId
};
pub use view::{
  TaskCounts,
  TaskView,
  filtered_view
};
