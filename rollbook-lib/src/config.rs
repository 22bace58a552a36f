use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use xdg::BaseDirectories;

use crate::{Error, Result};

const FILE_NAME: &str = "config.toml";
const BASE_URL_VAR: &str = "ROLLBOOK_BASE_URL";

/// The client's core configuration, serialized to TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Base URL of the student-records backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl CoreConfig {
    /// Load the configuration from the XDG config directory.
    ///
    /// A missing file falls back on the defaults; `ROLLBOOK_BASE_URL`
    /// overrides whatever the file says.
    pub fn load() -> Result<Self> {
        let file = match config_path() {
            Some(path) if path.exists() => Some(Self::from_path(&path)?),
            _ => None,
        };

        Ok(resolve(file, env::var(BASE_URL_VAR).ok()))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn resolve(file: Option<CoreConfig>, env_url: Option<String>) -> CoreConfig {
    let mut cfg = file.unwrap_or_default();
    if let Some(url) = env_url {
        cfg.base_url = url;
    }
    cfg
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn config_path() -> Option<PathBuf> {
    BaseDirectories::with_prefix("rollbook")
        .get_config_home()
        .map(|dir| dir.join(FILE_NAME))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_point_at_loopback() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.base_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn reads_base_url_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://records.internal:9000\"").unwrap();

        let cfg = CoreConfig::from_path(file.path()).unwrap();
        assert_eq!(cfg.base_url, "http://records.internal:9000");
    }

    #[test]
    fn empty_file_falls_back_on_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let cfg = CoreConfig::from_path(file.path()).unwrap();
        assert_eq!(cfg.base_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = [not toml").unwrap();

        assert!(matches!(
            CoreConfig::from_path(file.path()),
            Err(Error::ConfigParse { .. })
        ));
    }

    #[test]
    fn environment_overrides_the_file() {
        let file = CoreConfig {
            base_url: "http://from-file:1".to_string(),
        };

        let cfg = resolve(Some(file), Some("http://from-env:2".to_string()));
        assert_eq!(cfg.base_url, "http://from-env:2");

        let cfg = resolve(None, Some("http://from-env:2".to_string()));
        assert_eq!(cfg.base_url, "http://from-env:2");
    }
}
