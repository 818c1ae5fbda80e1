//! Configuration constants for the todo-list front end.

/// Base URL used when neither `--base-url` nor the environment sets one.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Environment variable holding the service base URL.
pub const BASE_URL_ENV_VAR: &str = "TODO_LIST_BASE_URL";

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Resolve the base URL from the environment, falling back to the default.
pub fn base_url_from_env() -> String {
    std::env::var_os(BASE_URL_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .filter(|val| !val.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}
