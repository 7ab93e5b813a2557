use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "forest-hunt")
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("forest_hunt_config.json"))
    }

    /// Where `--log-file` writes when no path is given
    pub fn default_log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("forest-hunt")
                .join("hunt.log")
        } else {
            ProjectDirs::from("", "", "forest-hunt")
                .map(|pd| pd.data_local_dir().join("hunt.log"))
                .unwrap_or_else(|| PathBuf::from("forest_hunt.log"))
        }
    }
}
