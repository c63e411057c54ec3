//! Platform-aware configuration paths for campaign-pulse

use std::env;
use std::path::{Path, PathBuf};

use crate::core::constants::config_files;

/// Directory holding the user-wide configuration.
///
/// `CAMPAIGN_PULSE_CONFIG_DIR` overrides the platform default.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(custom_dir) = env::var("CAMPAIGN_PULSE_CONFIG_DIR") {
        return Some(PathBuf::from(custom_dir));
    }

    dirs::config_dir().map(|p| p.join(config_files::APP_DIR))
}

/// User-wide config file
pub fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(config_files::GLOBAL_CONFIG))
}

/// Project-local config file inside `dir`
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(config_files::LOCAL_CONFIG)
}

/// Pick the config file to load: an explicit path wins, then the
/// project-local file, then the user-wide file. Falls back to the
/// project-local path (which may not exist) so `config init` knows where
/// to write.
pub fn resolve_config_path(explicit: Option<&Path>, working_dir: &Path) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let local = local_config_path(working_dir);
    if local.exists() {
        return local;
    }

    match global_config_path() {
        Some(global) if global.exists() => global,
        _ => local,
    }
}
