//! Where vimkeys keeps its files
//!
//! - `$VIMKEYS_CONFIG_DIR` when set
//! - Unix/macOS: `$XDG_CONFIG_HOME/vimkeys`, else `~/.config/vimkeys`
//! - Windows: `%APPDATA%\vimkeys`

use std::{env, fs, io, path::PathBuf};

const APP_DIR: &str = "vimkeys";

/// Overrides the config directory, mostly for scripted runs
pub const DIR_ENV: &str = "VIMKEYS_CONFIG_DIR";

pub fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = env::var_os(DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    platform_config_home().map(|home| home.join(APP_DIR))
}

#[cfg(target_os = "windows")]
fn platform_config_home() -> Option<PathBuf> {
    dirs::config_dir()
}

#[cfg(not(target_os = "windows"))]
fn platform_config_home() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
}

/// Session settings (`config.yaml`)
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// User mappings loaded at startup (`mappings.yaml`)
pub fn mappings_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("mappings.yaml"))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Create the logs directory if needed and return it
pub fn ensure_logs_dir() -> io::Result<PathBuf> {
    let logs = logs_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no config directory"))?;
    fs::create_dir_all(&logs)?;
    Ok(logs)
}
