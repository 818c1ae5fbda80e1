//! Terminal front end for the to-do list service.
//!
//! `App` owns a `TodoListClient`, runs its requests through
//! `UreqTransport`, and redraws the list after every state change.

pub mod app;
pub mod cmd_args;
pub mod command;
pub mod config;
pub mod transport;
pub mod view;

pub use app::{App, Flow};
pub use cmd_args::CommandLineArgs;
pub use command::Command;
pub use transport::UreqTransport;
