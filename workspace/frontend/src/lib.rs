use yew::prelude::*;

mod components;
pub mod api_client;
pub mod charts;
pub mod hooks;
pub mod settings;
pub mod status;

use components::dashboard::Dashboard;
use components::layout::Layout;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <Layout title="SARIMA forecast">
            <Dashboard />
        </Layout>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    // Initialize settings first
    settings::init_settings();

    // Initialize logger with settings
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== Forecast Dashboard Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("API base URL: {}", settings.api_base);

    // Chart library global state is checked once, before the first render
    charts::init_chart_runtime();

    log::trace!("Initializing Yew renderer");
    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
