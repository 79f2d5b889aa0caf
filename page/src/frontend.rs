use std::rc::Rc;

use tracing::info;
use wasm_bindgen::prelude::wasm_bindgen;

use crate::config::PageConfig;
use crate::controller::run_when_ready;
use crate::host::web::WebHost;
use crate::utils::or_else_log::OrElseLog as _;

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "diagnostics")]
    setup_logging();
    info!("Starting client");

    let window = web_sys::window().or_throw("window");
    let host = WebHost::new(window).or_throw("WebHost");
    let pending = run_when_ready(Rc::new(host), PageConfig::default()).or_throw("Start page");

    // The controller lives as long as the page.
    std::mem::forget(pending);
}

#[cfg(feature = "diagnostics")]
pub fn setup_logging() {
    use tracing_subscriber_wasm::MakeConsoleWriter;

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(MakeConsoleWriter::default())
        .without_time()
        .with_ansi(false)
        .with_line_number(true)
        .with_file(true)
        .with_target(false)
        .init();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Setting logging");
}
