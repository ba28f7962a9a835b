mod filter_bar;
mod stats_bar;
mod task_list;
mod task_list_row;

pub use filter_bar::FilterBar;
pub use stats_bar::StatsBar;
pub use task_list::TaskList;
pub use task_list_row::TaskListRow;
