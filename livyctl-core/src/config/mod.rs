//! Configuration management for `livyctl`
//!
//! This module provides the `ConfigManager` for loading and saving
//! `config.toml`, and the `LivySettings` stored in it.

mod manager;
mod settings;

pub use manager::{CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigManager};
pub use settings::LivySettings;
