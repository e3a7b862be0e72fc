use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "REGCLEAN_CONFIG";

/// Get the default config file location (`~/.config/regclean/config.yaml`)
pub fn get_config_path() -> PathBuf {
    if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(config_path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("regclean").join("config.yaml")
    } else {
        // Fallback to current directory
        PathBuf::from("config.yaml")
    }
}

/// Pick the config file to load.
///
/// An explicit `--config` path is always returned so that a missing file is
/// reported. The default location is only used when it exists.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    resolve_with_default(explicit, get_config_path())
}

fn resolve_with_default(explicit: Option<&Path>, default: PathBuf) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None if default.is_file() => Some(default),
        None => None,
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
