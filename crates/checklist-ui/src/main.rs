mod app;
mod components;
mod storage;

use checklist_core::Config;
use wasm_tracing::WasmLayerConfig;

const BUNDLED_CONFIG: &str =
  include_str!("../checklist.toml");

fn main() {
  console_error_panic_hook::set_once();

  let parsed =
    Config::from_toml_str(BUNDLED_CONFIG);
  let config = parsed
    .as_ref()
    .cloned()
    .unwrap_or_default();

  let mut layer_config = WasmLayerConfig::new();
  if let Ok(level) = config.log.max_level() {
    layer_config.set_max_level(level);
  }
  let _ = wasm_tracing::set_as_global_default_with_config(
    layer_config
  );

  if let Err(error) = parsed {
    tracing::error!(
      error = %format_args!("{error:#}"),
      "failed parsing bundled config; using \
       defaults"
    );
  }

  tracing::info!(
    level = %config.log.level,
    "starting checklist widget"
  );

  let mount = web_sys::window()
    .and_then(|window| window.document())
    .and_then(|document| {
      document.get_element_by_id("app")
    })
    .expect("missing #app mount element");

  yew::Renderer::<app::App>::with_root_and_props(
    mount,
    app::AppProps { config }
  )
  .render();
}
