//! Todo App Frontend App
//!
//! Page layout: header, list panel, footer. Builds the store once for the
//! lifetime of the app and injects it into the list panel.

use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::JsValue;

use todo_core::{AppConfig, BackendKind, MemoryStore, OrderedQuery, RemoteStore};

use crate::collection::TauriCollection;
use crate::components::{Footer, Header, TodoList};
use crate::context::SharedStore;

/// Read config from the page URL; the document service is available when
/// running inside the Tauri shell
fn load_config() -> AppConfig {
    let Some(window) = web_sys::window() else {
        return AppConfig::from_query("", false);
    };
    let query = window.location().search().unwrap_or_default();
    let has_service = js_sys::Reflect::has(&window, &JsValue::from_str("__TAURI__")).unwrap_or(false);
    AppConfig::from_query(&query, has_service)
}

fn build_store(config: &AppConfig) -> SharedStore {
    match config.backend {
        BackendKind::Local => Rc::new(MemoryStore::new()),
        BackendKind::Synced => Rc::new(RemoteStore::new(
            TauriCollection::new(),
            OrderedQuery::newest_first(config.collection.clone()),
        )),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = load_config();
    log::info!("[APP] Starting with {:?} backend", config.backend);

    let store = StoredValue::new_local(build_store(&config));

    view! {
        <div class="page">
            <Header />
            <main class="page-main">
                <TodoList store=store failure_policy=config.failure_policy />
            </main>
            <Footer />
        </div>
    }
}
