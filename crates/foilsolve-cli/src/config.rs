//! Layered analysis configuration: built-in defaults, an optional TOML file, dedicated CLI
//! flags and `-S KEY=VALUE` overrides, in increasing order of precedence.

pub mod builder;
pub mod defaults;
pub mod file;

pub use builder::build_config;
