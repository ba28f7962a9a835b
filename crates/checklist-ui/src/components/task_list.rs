use checklist_core::{
  FilterMode,
  Task,
  TaskId
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub mode:      FilterMode,
  pub tasks:     Vec<Task>,
  pub on_toggle: Callback<TaskId>,
  pub on_delete: Callback<TaskId>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  if props.tasks.is_empty() {
    return html! {
      <section class="card empty">
        { props.mode.empty_message() }
      </section>
    };
  }

  html! {
    <section class="card list">
      {
        for props.tasks.iter().map(|task| html! {
          <TaskListRow
            task={task.clone()}
            on_toggle={props.on_toggle.clone()}
            on_delete={props.on_delete.clone()}
          />
        })
      }
    </section>
  }
}
