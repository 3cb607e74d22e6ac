mod api;
mod app;
mod cache;
mod chart;
mod config;
mod dashboard;
mod error;
mod form;
mod format;
mod icons;
mod model;
mod notify;
mod settings;
mod site;
mod stats;
mod storage;
mod table;
mod theme;

fn main() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    yew::Renderer::<app::App>::new().render();
}
