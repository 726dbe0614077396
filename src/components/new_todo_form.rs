//! New Todo Form Component
//!
//! Text input plus submit control for adding items.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::context::PanelContext;

/// Form for creating new items
#[component]
pub fn NewTodoForm() -> impl IntoView {
    let ctx = use_context::<PanelContext>().expect("PanelContext should be provided");

    let create_item = move |ev: SubmitEvent| {
        ev.prevent_default();
        ctx.submit();
    };

    view! {
        <form class="new-todo-form" on:submit=create_item>
            <input
                type="text"
                class="new-todo-input"
                placeholder="Add a new todo"
                prop:value=move || ctx.state.with(|s| s.draft().to_string())
                on:input=move |ev| ctx.set_draft(event_target_value(&ev))
            />
            <button type="submit" class="add-btn" title="Add">"+"</button>
        </form>
    }
}
