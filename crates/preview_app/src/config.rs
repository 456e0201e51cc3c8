use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use preview_core::DEBOUNCE_DELAY;
use preview_engine::FetchSettings;
use preview_logging::{preview_info, preview_warn};
use serde::{Deserialize, Serialize};

/// Settings assembled from defaults and the optional config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub fetch: FetchSettings,
    pub debounce: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fetch: FetchSettings::default(),
            debounce: DEBOUNCE_DELAY,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// On-disk shape; every key is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct FileConfig {
    connect_timeout_ms: u64,
    request_timeout_ms: u64,
    redirect_limit: usize,
    max_bytes: u64,
    user_agent: String,
    debounce_ms: u64,
}

impl Default for FileConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            connect_timeout_ms: fetch.connect_timeout.as_millis() as u64,
            request_timeout_ms: fetch.request_timeout.as_millis() as u64,
            redirect_limit: fetch.redirect_limit,
            max_bytes: fetch.max_bytes,
            user_agent: fetch.user_agent,
            debounce_ms: DEBOUNCE_DELAY.as_millis() as u64,
        }
    }
}

impl From<FileConfig> for Settings {
    fn from(file: FileConfig) -> Self {
        Self {
            fetch: FetchSettings {
                connect_timeout: Duration::from_millis(file.connect_timeout_ms),
                request_timeout: Duration::from_millis(file.request_timeout_ms),
                redirect_limit: file.redirect_limit,
                max_bytes: file.max_bytes,
                user_agent: file.user_agent,
            },
            debounce: Duration::from_millis(file.debounce_ms),
        }
    }
}

/// Loads settings, falling back to defaults when the file is missing or broken.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let Some(path) = path else {
        return Settings::default();
    };
    match read_settings(path) {
        Ok(settings) => {
            preview_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            preview_warn!("{}; using default settings", err);
            Settings::default()
        }
    }
}

fn read_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: FileConfig = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    Ok(file.into())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(load_settings(None), Settings::default());
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let file = write_config("(redirect_limit: 2, debounce_ms: 150)");
        let settings = load_settings(Some(file.path()));
        assert_eq!(settings.fetch.redirect_limit, 2);
        assert_eq!(settings.debounce, Duration::from_millis(150));
        assert_eq!(
            settings.fetch.request_timeout,
            FetchSettings::default().request_timeout
        );
    }

    #[test]
    fn missing_or_broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.ron");
        assert_eq!(load_settings(Some(&missing)), Settings::default());

        let broken = write_config("(redirect_limit: \"many\"");
        assert!(matches!(
            read_settings(broken.path()),
            Err(ConfigError::Parse { .. })
        ));
        assert_eq!(load_settings(Some(broken.path())), Settings::default());
    }
}
