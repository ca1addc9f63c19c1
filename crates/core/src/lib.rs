//! Climate API Core Library
//!
//! Shared utilities for the climate API server:
//! - Configuration loading (XDG-compliant)
//! - Filesystem checks for the observation database

mod config;
pub mod fs;

pub use config::{find_config_file, load_config, ConfigSource};
pub use fs::is_sqlite_file;

/// Application name used for XDG paths
pub const APP_NAME: &str = "climate-api";

/// Default HTTP port
pub const DEFAULT_API_PORT: u16 = 5000;

/// Default location of the observation database
pub const DEFAULT_DATABASE_PATH: &str = "./Resources/hawaii.sqlite";
