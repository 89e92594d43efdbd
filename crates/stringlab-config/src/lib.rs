//! stringlab configuration
//!
//! Loads [`ServerConfig`] from built-in defaults, an optional TOML file, the
//! environment, and finally command-line overrides, in increasing precedence.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::ConfigManager;
pub use types::{ConfigOverrides, ServerConfig};
