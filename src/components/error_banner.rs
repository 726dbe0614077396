//! Error Banner Component
//!
//! Shows the last failed store request. Dismissed by the user or after a
//! few seconds.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::PanelContext;

const AUTO_DISMISS_MS: u32 = 6_000;

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let ctx = use_context::<PanelContext>().expect("PanelContext should be provided");

    let message = move || ctx.state.with(|s| s.error().map(str::to_string));

    Effect::new(move |_| {
        if let Some(shown) = message() {
            spawn_local(async move {
                TimeoutFuture::new(AUTO_DISMISS_MS).await;
                // a newer failure keeps its own timer
                let _ = ctx.state.try_update(|s| {
                    if s.error() == Some(shown.as_str()) {
                        s.dismiss_error();
                    }
                });
            });
        }
    });

    view! {
        {move || message().map(|msg| view! {
            <div class="error-banner" role="alert">
                <span class="error-text">{msg}</span>
                <button class="icon-btn" title="Dismiss" on:click=move |_| ctx.dismiss_error()>"×"</button>
            </div>
        })}
    }
}
