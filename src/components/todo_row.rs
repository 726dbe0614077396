//! Todo Row Component
//!
//! A single item in the list: checkbox, text or inline editor, edit and
//! delete controls.

use leptos::ev::KeyboardEvent;
use leptos::prelude::*;
use web_sys::HtmlInputElement;

use todo_core::Item;

use crate::context::PanelContext;

#[component]
pub fn TodoRow(item: Item) -> impl IntoView {
    let ctx = use_context::<PanelContext>().expect("PanelContext should be provided");

    let id = StoredValue::new(item.id.clone());
    let completed = item.completed;
    let text = item.text;

    let is_editing = move || ctx.state.with(|s| id.with_value(|id| s.is_editing(id)));
    let edit_text = move || {
        ctx.state
            .with(|s| s.editing().map(|e| e.text.clone()).unwrap_or_default())
    };

    // `autofocus` is ignored for inputs inserted after load
    let editor = NodeRef::<leptos::html::Input>::new();
    Effect::new(move |_| {
        if let Some(input) = editor.get() {
            let _ = input.focus();
        }
    });

    let on_edit_key = move |ev: KeyboardEvent| match ev.key().as_str() {
        "Enter" => ctx.commit_edit(),
        "Escape" => ctx.cancel_edit(),
        _ => {}
    };

    view! {
        <li class=move || if completed { "todo-row completed" } else { "todo-row" }>
            // Checkbox
            <input
                type="checkbox"
                class="todo-check"
                prop:checked=completed
                on:change=move |ev| {
                    // the row re-renders only when a snapshot changes it
                    event_target::<HtmlInputElement>(&ev).set_checked(completed);
                    ctx.toggle(id.get_value());
                }
            />

            <Show
                when=is_editing
                fallback=move || view! {
                    // Text
                    <span class="todo-text">{text.clone()}</span>
                    <button
                        class="icon-btn edit-btn"
                        title="Edit"
                        on:click=move |_| id.with_value(|id| ctx.begin_edit(id))
                    >
                        "✎"
                    </button>
                    <button
                        class="icon-btn delete-btn"
                        title="Delete"
                        on:click=move |_| ctx.delete(id.get_value())
                    >
                        "×"
                    </button>
                }
            >
                <div class="todo-edit">
                    <input
                        type="text"
                        class="todo-edit-input"
                        node_ref=editor
                        prop:value=edit_text
                        on:input=move |ev| ctx.set_edit_text(event_target_value(&ev))
                        on:keydown=on_edit_key
                    />
                    <button class="icon-btn save-btn" title="Save" on:click=move |_| ctx.commit_edit()>
                        "✓"
                    </button>
                    <button class="icon-btn cancel-btn" title="Cancel" on:click=move |_| ctx.cancel_edit()>
                        "✗"
                    </button>
                </div>
            </Show>
        </li>
    }
}
