use checklist_core::TaskCounts;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct StatsBarProps {
  pub counts:   TaskCounts,
  pub on_clear: Callback<()>
}

#[function_component(StatsBar)]
pub fn stats_bar(
  props: &StatsBarProps
) -> Html {
  let on_clear = props.on_clear.clone();

  html! {
    <section class="card stats">
      <span>
        { "Tasks left: " }
        <strong>{ props.counts.active.to_string() }</strong>
      </span>
      {
        if props.counts.show_clear_completed() {
          html! {
            <button
              class="clear"
              onclick={move |_| on_clear.emit(())}
              data-testid="clear-completed"
            >
              { "Clear completed" }
            </button>
          }
        } else {
          html! {}
        }
      }
    </section>
  }
}
