//! Todo List Component
//!
//! The list-and-form panel. Works against any `TodoStore`: the panel
//! subscribes on mount, replaces its list on every snapshot and releases the
//! subscription on unmount.

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;

use todo_core::{FailurePolicy, PanelState};

use crate::components::{ErrorBanner, NewTodoForm, TodoRow};
use crate::context::{PanelContext, SharedStore};

#[component]
pub fn TodoList(
    store: StoredValue<SharedStore, LocalStorage>,
    #[prop(optional)] failure_policy: FailurePolicy,
) -> impl IntoView {
    let state = RwSignal::new(PanelState::mounting(failure_policy));
    let ctx = PanelContext::new(state, store);
    provide_context(ctx);

    let subscription = ctx.watch();
    on_cleanup(move || subscription.abort());

    let is_loading = move || state.with(|s| s.is_loading());

    view! {
        <section class="todo-panel">
            <h2 class="todo-panel-title">"Todo List"</h2>

            <ErrorBanner />

            <NewTodoForm />

            <Show
                when=move || !is_loading()
                fallback=|| view! { <div class="todo-loading">"Loading..."</div> }
            >
                <ul class="todo-items">
                    <For
                        each=move || state.with(|s| s.items().to_vec())
                        key=|item| {
                            // Include mutable fields so edits re-render the row
                            (item.id.clone(), item.text.clone(), item.completed)
                        }
                        children=move |item| view! { <TodoRow item=item /> }
                    />
                </ul>
            </Show>

            <p class="item-count">
                {move || state.with(|s| {
                    let done = s.items().iter().filter(|i| i.completed).count();
                    format!("{} items, {} done", s.items().len(), done)
                })}
            </p>
        </section>
    }
}
