use std::rc::Rc;

use checklist_core::task::normalize_text;
use checklist_core::{
  Config,
  FilterMode,
  StorageKeys,
  SystemClock,
  TaskId,
  TaskStore
};
use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  InputEvent,
  KeyboardEvent,
  MouseEvent,
  Properties,
  Reducible,
  TargetCast,
  function_component,
  html,
  use_reducer,
  use_state
};

use crate::components::{
  FilterBar,
  StatsBar,
  TaskList
};
use crate::storage::BrowserStorage;

pub enum Action {
  Add(String),
  Toggle(TaskId),
  Delete(TaskId),
  ClearCompleted,
  SetFilter(FilterMode)
}

pub struct ChecklistState {
  store: TaskStore<BrowserStorage>
}

impl ChecklistState {
  fn open(keys: StorageKeys) -> Self {
    Self {
      store: TaskStore::open(
        BrowserStorage,
        keys,
        SystemClock
      )
    }
  }
}

impl Reducible for ChecklistState {
  type Action = Action;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut store = self.store.clone();
    let changed = match action {
      | Action::Add(text) => {
        store.add(&text).is_some()
      }
      | Action::Toggle(id) => store.toggle(id),
      | Action::Delete(id) => store.delete(id),
      | Action::ClearCompleted => {
        store.clear_completed()
      }
      | Action::SetFilter(mode) => {
        store.set_filter(mode)
      }
    };

    if changed {
      Rc::new(Self { store })
    } else {
      self
    }
  }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
  pub config: Config
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
  let keys = props.config.storage.clone();
  let state =
    use_reducer(move || ChecklistState::open(keys));
  let draft = use_state(String::new);

  let on_input = {
    let draft = draft.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      draft.set(input.value());
    })
  };

  let submit = {
    let draft = draft.clone();
    let state = state.clone();
    Callback::from(move |_: ()| {
      if normalize_text(&draft).is_none() {
        return;
      }
      state.dispatch(Action::Add(
        (*draft).clone()
      ));
      draft.set(String::new());
    })
  };

  let on_add_click = {
    let submit = submit.clone();
    Callback::from(move |_: MouseEvent| {
      submit.emit(())
    })
  };

  let on_keydown = {
    let submit = submit.clone();
    Callback::from(move |e: KeyboardEvent| {
      if e.key() == "Enter" {
        submit.emit(());
      }
    })
  };

  let on_toggle = {
    let state = state.clone();
    Callback::from(move |id: TaskId| {
      state.dispatch(Action::Toggle(id))
    })
  };

  let on_delete = {
    let state = state.clone();
    Callback::from(move |id: TaskId| {
      state.dispatch(Action::Delete(id))
    })
  };

  let on_clear = {
    let state = state.clone();
    Callback::from(move |_: ()| {
      state.dispatch(Action::ClearCompleted)
    })
  };

  let on_filter = {
    let state = state.clone();
    Callback::from(move |mode: FilterMode| {
      state.dispatch(Action::SetFilter(mode))
    })
  };

  let view = state.store.view();

  html! {
    <main class="checklist">
      <h1 class="title">{ "Checklist" }</h1>

      <section class="card input-row">
        <input
          type="text"
          value={(*draft).clone()}
          oninput={on_input}
          onkeydown={on_keydown}
          placeholder="Add a new task..."
          data-testid="todo-input"
        />
        <button
          onclick={on_add_click}
          data-testid="add-button"
        >
          { "Add" }
        </button>
      </section>

      <FilterBar
        mode={view.mode}
        counts={view.counts}
        on_select={on_filter}
      />

      <StatsBar
        counts={view.counts}
        on_clear={on_clear}
      />

      <TaskList
        mode={view.mode}
        tasks={view.visible}
        on_toggle={on_toggle}
        on_delete={on_delete}
      />
    </main>
  }
}
