//! Page Header

use leptos::prelude::*;

pub const APP_TITLE: &str = "My Todo App";

/// Title banner
#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="page-header">
            <div class="container">
                <h1>{APP_TITLE}</h1>
            </div>
        </header>
    }
}
