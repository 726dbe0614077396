//! Todo App Frontend Entry Point

mod app;
mod collection;
mod commands;
mod components;
mod context;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
    }
    mount_to_body(App);
}
