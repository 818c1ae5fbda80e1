//! Client core for the to-do list service.
//!
//! # Overview
//! Holds the to-do list view state and reconciles it with server responses.
//! Requests are built as plain data and executed by the host (host-does-IO
//! pattern), so every state change is deterministic and testable.
//!
//! # Design
//! - `TodoListApi` is stateless: it holds only `base_url` and splits each
//!   endpoint into `build_*` / `parse_*`.
//! - `TodoListState` changes only through `apply(Transition)`, after the
//!   server confirms.
//! - Loading flags double as operation locks (`Loading`): global for fetch
//!   and submit, per id for delete and toggle.
//! - `TodoListClient` ties the three together behind `begin_*` / `finish_*`
//!   pairs and one-shot wrappers over a `Transport`.

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod loading;
pub mod state;
pub mod types;

pub use api::TodoListApi;
pub use client::{Outcome, TodoListClient};
pub use error::{ApiError, ClientError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use loading::{Loading, Operation};
pub use state::{TodoListState, Transition};
pub use types::{CreateTodoItem, FixedPlace, Place, TodoItem};
