//! Configuration: TOML file, then `PATHBOX_*` environment, then CLI flags.

mod loader;
mod types;

pub use loader::{ConfigError, CONFIG_PATH_ENV};
pub use types::{Config, DEFAULT_PERSISTENT_HOME, DEFAULT_WORKSPACE_ROOT};
