//! Plain-text rendering of the list state.

use std::fmt::Write;

use todo_list_core::TodoListState;

/// Render the whole view: status line, optional error, then one row per item.
pub fn render(state: &TodoListState) -> String {
    let mut out = String::new();
    let loading = state.loading();
    let status = if loading.is_idle() { "Done" } else { "Loading..." };
    let _ = writeln!(out, "To-do List [{status}]");

    if let Some(place) = state.place() {
        let _ = writeln!(out, "Current place is: {place}");
    }
    if let Some(error) = state.last_error() {
        let _ = writeln!(out, "! {error}");
    }
    if state.list().is_empty() && !loading.is_list_loading() {
        let _ = writeln!(out, "  (nothing to do)");
    }

    for (row, item) in state.list().iter().enumerate() {
        let check = if loading.is_checkbox_loading(&item.id) {
            "[~]"
        } else if item.is_finish {
            "[x]"
        } else {
            "[ ]"
        };
        let _ = write!(out, "{:>3}. {check} {}", row + 1, item.title);
        if let Some(place) = &item.place {
            let _ = write!(out, " || {place}");
        }
        if loading.is_delete_loading(&item.id) {
            let _ = write!(out, " (deleting)");
        }
        let _ = writeln!(out);
    }
    out
}
