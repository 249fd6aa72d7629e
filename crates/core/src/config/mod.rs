//! Configuration loading and schema definitions
//!
//! Configuration is read from TOML, then overridden by `EVENTMANAGER_*`
//! environment variables.

mod loader;
mod schema;

pub use loader::{
    apply_overrides, user_config_path, validate, Config, ENV_API_URL, ENV_SERVER_HOST,
    ENV_SERVER_PORT, ENV_SESSION_FILE, ENV_TIMEOUT_SECS,
};
pub use schema::*;
