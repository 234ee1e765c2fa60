//! Configuration file parsing for sqlbench
//!
//! Supports `<config_dir>/sqlbench/config.toml`, environment overrides and
//! command-line overrides, applied in that order.

pub mod settings;
pub mod types;

pub use settings::{
    apply_env_overrides, apply_overrides, default_config_path, endpoints_from, load_settings,
    ConfigOverrides, CONFIG_FILENAME, ENV_API_URL, ENV_SUGGESTOR_URL,
};
pub use types::*;
