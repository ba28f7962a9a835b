use checklist_core::{
  FilterMode,
  TaskCounts
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
pub struct FilterBarProps {
  pub mode:      FilterMode,
  pub counts:    TaskCounts,
  pub on_select: Callback<FilterMode>
}

#[function_component(FilterBar)]
pub fn filter_bar(
  props: &FilterBarProps
) -> Html {
  html! {
    <nav class="card filters">
      {
        for FilterMode::VALUES.into_iter().map(|mode| {
          let on_select = props.on_select.clone();
          let class = classes!(
            "filter",
            (props.mode == mode).then_some("active")
          );
          html! {
            <button
              class={class}
              onclick={move |_| on_select.emit(mode)}
              data-testid={format!("filter-{}", mode.as_str())}
            >
              { format!("{} ({})", mode.label(), props.counts.for_mode(mode)) }
            </button>
          }
        })
      }
    </nav>
  }
}
