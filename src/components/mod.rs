//! UI Components
//!
//! Reusable Leptos components.

mod error_banner;
mod footer;
mod header;
mod new_todo_form;
mod todo_list;
mod todo_row;

pub use error_banner::ErrorBanner;
pub use footer::Footer;
pub use header::Header;
pub use new_todo_form::NewTodoForm;
pub use todo_list::TodoList;
pub use todo_row::TodoRow;
