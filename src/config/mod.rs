//! Configuration module.
//!
//! - `loader`: TOML config file and the defaults → file → env → CLI chain
//! - `keybindings`: key event → action map

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{resolve_config, ConfigError, ConfigFile, ResolvedConfig};
