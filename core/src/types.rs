//! Domain DTOs for the todo-list API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any schema drift between the two crates. Ids are
//! opaque strings assigned by the server, so the client never invents one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single to-do item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: String,
    pub title: String,
    #[serde(rename = "isFinish", default)]
    pub is_finish: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<Place>,
}

/// Where an item is meant to be done: one of the fixed places or free text.
///
/// Serialized as `"home"`, `"work"` or `{"custom": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Place {
    Fixed(FixedPlace),
    Custom { custom: String },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FixedPlace {
    Home,
    Work,
}

impl Place {
    pub fn home() -> Self {
        Place::Fixed(FixedPlace::Home)
    }

    pub fn work() -> Self {
        Place::Fixed(FixedPlace::Work)
    }

    pub fn custom(text: impl Into<String>) -> Self {
        Place::Custom {
            custom: text.into(),
        }
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Place::Fixed(FixedPlace::Home) => write!(f, "home"),
            Place::Fixed(FixedPlace::Work) => write!(f, "work"),
            Place::Custom { custom } => write!(f, "{custom}"),
        }
    }
}

/// Request payload for creating a new item: exactly `{"title": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodoItem {
    pub title: String,
}
