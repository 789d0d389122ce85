//! Centralized configuration paths for slide-sheet
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/slide-sheet/`
//! - Windows: `%APPDATA%\slide-sheet\`

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "slide-sheet";

/// Prefix of the rolling log files (`slide-sheet.log.YYYY-MM-DD`)
pub const LOG_FILE_PREFIX: &str = "slide-sheet.log";

/// Base config directory
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/slide-sheet`
///   - Else: `~/.config/slide-sheet`
///
/// Windows:
///   - `%APPDATA%\slide-sheet`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/slide-sheet/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/slide-sheet/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// `~/.config/slide-sheet/dumps/`
pub fn dumps_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("dumps"))
}

/// Newest daily log file in the logs directory
///
/// Falls back to the undated name when no rotated file exists yet.
pub fn log_file() -> Option<PathBuf> {
    let logs_dir = logs_dir()?;
    newest_log_in(&logs_dir).or_else(|| Some(logs_dir.join(LOG_FILE_PREFIX)))
}

fn newest_log_in(dir: &Path) -> Option<PathBuf> {
    let mut log_files: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(LOG_FILE_PREFIX))
        })
        .collect();

    // YYYY-MM-DD suffixes sort naturally
    log_files.sort_by(|a, b| b.cmp(a));
    log_files.into_iter().next()
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&dir)?;
    Ok(dir)
}

pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = ensure_config_dir()?.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}

pub fn ensure_dumps_dir() -> Result<PathBuf, String> {
    let dumps = ensure_config_dir()?.join("dumps");
    ensure_dir(&dumps)?;
    Ok(dumps)
}
