use checklist_core::{
  Task,
  TaskId
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub task:      Task,
  pub on_toggle: Callback<TaskId>,
  pub on_delete: Callback<TaskId>
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let id = props.task.id;
  let done = props.task.completed;
  let on_toggle = props.on_toggle.clone();
  let on_delete = props.on_delete.clone();

  html! {
    <div class="row" data-testid="todo-item">
      <button
        class={classes!("toggle", done.then_some("done"))}
        onclick={move |_| on_toggle.emit(id)}
        data-testid="toggle-todo"
      >
        { if done { "✓" } else { "○" } }
      </button>
      <span class={classes!("text", done.then_some("done"))}>
        { &props.task.text }
      </span>
      <button
        class="delete"
        onclick={move |_| on_delete.emit(id)}
        data-testid="delete-todo"
      >
        { "✕" }
      </button>
    </div>
  }
}
