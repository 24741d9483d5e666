//! Configuration loading and merging with CLI arguments.
mod loader;
mod resolve;
pub mod types;


pub use loader::load_config;
pub use resolve::{RunSettings, resolve_settings};

#[cfg(test)]
pub(crate) use loader::load_config_file;
