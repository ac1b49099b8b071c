//! Configuration for the terminator overlay tools.
//!
//! Settings persist to disk as `config.ron`, every section tolerates missing
//! fields, and command-line arguments override whatever was loaded.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, parse_hex_color};
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, LayerConfig, RenderConfig};
pub use error::ConfigError;
