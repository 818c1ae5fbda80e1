//! View state for the to-do list and its reconciliation rules.
//!
//! # Design
//! All mutation of `list` goes through [`TodoListState::apply`], which maps
//! `(old state, confirmed server outcome)` to a new state. Nothing is changed
//! before the server confirms, so there is never anything to roll back. Order
//! is whatever the server last returned, adjusted by append, filter and
//! in-place map.

use crate::loading::{Loading, Operation};
use crate::types::{Place, TodoItem};

/// A confirmed outcome of one round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    FetchSucceeded(Vec<TodoItem>),
    CreateSucceeded(TodoItem),
    DeleteSucceeded(String),
    ToggleSucceeded(String),
    /// The round-trip for `op` failed; only its flag is cleared.
    Failed { op: Operation, message: String },
}

impl Transition {
    /// The operation whose flag this outcome clears.
    pub fn operation(&self) -> Operation {
        match self {
            Transition::FetchSucceeded(_) => Operation::FetchList,
            Transition::CreateSucceeded(_) => Operation::Submit,
            Transition::DeleteSucceeded(id) => Operation::Delete(id.clone()),
            Transition::ToggleSucceeded(id) => Operation::Toggle(id.clone()),
            Transition::Failed { op, .. } => op.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoListState {
    list: Vec<TodoItem>,
    draft_title: String,
    place: Option<Place>,
    loading: Loading,
    last_error: Option<String>,
}

impl TodoListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[TodoItem] {
        &self.list
    }

    pub fn item(&self, id: &str) -> Option<&TodoItem> {
        self.list.iter().find(|item| item.id == id)
    }

    pub fn draft_title(&self) -> &str {
        &self.draft_title
    }

    pub fn place(&self) -> Option<&Place> {
        self.place.as_ref()
    }

    pub fn loading(&self) -> &Loading {
        &self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replace the draft title. Ignored while a submission is in flight;
    /// returns whether the edit was taken.
    pub fn set_draft_title(&mut self, title: impl Into<String>) -> bool {
        if self.loading.is_input_loading() {
            return false;
        }
        self.draft_title = title.into();
        true
    }

    pub fn set_place(&mut self, place: Option<Place>) {
        self.place = place;
    }

    /// Mark `op` in flight. Returns `false` if it already was.
    pub fn begin(&mut self, op: &Operation) -> bool {
        self.loading.acquire(op)
    }

    /// Apply a confirmed outcome and clear the matching loading flag.
    pub fn apply(mut self, transition: Transition) -> Self {
        self.loading.release(&transition.operation());
        match transition {
            Transition::FetchSucceeded(items) => {
                self.list = items;
                self.last_error = None;
            }
            Transition::CreateSucceeded(item) => {
                match self.list.iter_mut().find(|existing| existing.id == item.id) {
                    Some(existing) => *existing = item,
                    None => self.list.push(item),
                }
                self.draft_title.clear();
                self.last_error = None;
            }
            Transition::DeleteSucceeded(id) => {
                self.list.retain(|item| item.id != id);
                self.last_error = None;
            }
            Transition::ToggleSucceeded(id) => {
                for item in self.list.iter_mut().filter(|item| item.id == id) {
                    item.is_finish = !item.is_finish;
                }
                self.last_error = None;
            }
            Transition::Failed { op, message } => {
                self.last_error = Some(format!("{op} failed: {message}"));
            }
        }
        self
    }
}
