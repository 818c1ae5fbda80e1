//! Loading flags, treated as operation locks.
//!
//! # Design
//! A flag shows a spinner and also gates re-entry. List fetch and
//! create-submission each take one global slot; delete and toggle are keyed
//! by item id, so different items can be in flight together while a second
//! request for the same id is refused.

use std::collections::BTreeSet;
use std::fmt;

/// One class of in-flight request, keyed by id where it applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchList,
    Submit,
    Delete(String),
    Toggle(String),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::FetchList => write!(f, "list fetch"),
            Operation::Submit => write!(f, "submission"),
            Operation::Delete(id) => write!(f, "delete of {id}"),
            Operation::Toggle(id) => write!(f, "toggle of {id}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Loading {
    list: bool,
    input: bool,
    checkbox: BTreeSet<String>,
    delete: BTreeSet<String>,
}

impl Loading {
    /// Mark `op` as in flight. Returns `false` if it already was.
    pub fn acquire(&mut self, op: &Operation) -> bool {
        match op {
            Operation::FetchList => !std::mem::replace(&mut self.list, true),
            Operation::Submit => !std::mem::replace(&mut self.input, true),
            Operation::Delete(id) => self.delete.insert(id.clone()),
            Operation::Toggle(id) => self.checkbox.insert(id.clone()),
        }
    }

    pub fn release(&mut self, op: &Operation) {
        match op {
            Operation::FetchList => self.list = false,
            Operation::Submit => self.input = false,
            Operation::Delete(id) => {
                self.delete.remove(id);
            }
            Operation::Toggle(id) => {
                self.checkbox.remove(id);
            }
        }
    }

    pub fn is_held(&self, op: &Operation) -> bool {
        match op {
            Operation::FetchList => self.list,
            Operation::Submit => self.input,
            Operation::Delete(id) => self.delete.contains(id),
            Operation::Toggle(id) => self.checkbox.contains(id),
        }
    }

    pub fn is_list_loading(&self) -> bool {
        self.list
    }

    pub fn is_input_loading(&self) -> bool {
        self.input
    }

    pub fn is_checkbox_loading(&self, id: &str) -> bool {
        self.checkbox.contains(id)
    }

    pub fn is_delete_loading(&self, id: &str) -> bool {
        self.delete.contains(id)
    }

    /// True when nothing at all is in flight.
    pub fn is_idle(&self) -> bool {
        !self.list && !self.input && self.checkbox.is_empty() && self.delete.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_slot_is_exclusive() {
        let mut loading = Loading::default();
        assert!(loading.acquire(&Operation::Submit));
        assert!(!loading.acquire(&Operation::Submit));
        assert!(loading.is_input_loading());
        loading.release(&Operation::Submit);
        assert!(loading.acquire(&Operation::Submit));
    }

    #[test]
    fn keyed_slots_are_independent_per_id() {
        let mut loading = Loading::default();
        assert!(loading.acquire(&Operation::Toggle("1".into())));
        assert!(loading.acquire(&Operation::Toggle("2".into())));
        assert!(!loading.acquire(&Operation::Toggle("1".into())));
        assert!(loading.acquire(&Operation::Delete("1".into())));
        assert!(loading.is_checkbox_loading("2"));
        loading.release(&Operation::Toggle("2".into()));
        assert!(!loading.is_checkbox_loading("2"));
        assert!(loading.is_checkbox_loading("1"));
    }

    #[test]
    fn idle_after_everything_released() {
        let mut loading = Loading::default();
        let ops = [
            Operation::FetchList,
            Operation::Submit,
            Operation::Delete("9".into()),
            Operation::Toggle("9".into()),
        ];
        for op in &ops {
            assert!(loading.acquire(op));
        }
        assert!(!loading.is_idle());
        for op in &ops {
            loading.release(op);
        }
        assert!(loading.is_idle());
    }
}
