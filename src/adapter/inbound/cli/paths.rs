//! Path utilities for stocklens.
//!
//! User data lives under `~/.stocklens/`:
//! - `~/.stocklens/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the stocklens home directory (`~/.stocklens/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".stocklens")
}

/// Returns the default config file path (`~/.stocklens/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
