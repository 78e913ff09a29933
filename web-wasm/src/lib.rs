//! CareerSync browser front end (Leptos + WASM)

mod api;
mod app;
mod bootstrap;
mod components;
mod logging;
mod state;
mod storage;

use app::App;
use leptos::prelude::*;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = bootstrap::load_config();
    logging::init(&config.log_level);
    if let Some(e) = config_error {
        warn!(error = %e, "invalid client config, using defaults");
    }

    let page = bootstrap::load_page();
    info!(page = ?page.page, "starting CareerSync");
    leptos::mount::mount_to_body(move || view! { <App config=config page=page /> });
}
