//! Page Footer

use leptos::prelude::*;

use super::header::APP_TITLE;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="page-footer">
            <div class="container">
                <p>{format!("© 2023 {}. All rights reserved.", APP_TITLE)}</p>
            </div>
        </footer>
    }
}
