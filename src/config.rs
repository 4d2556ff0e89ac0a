//! Runtime configuration.
//!
//! Configuration is layered: baked-in defaults, then an optional YAML file,
//! then CLI flags on top (applied by the binaries). The file is deliberately
//! small; anything operational (log level) comes from the environment via
//! the tracing filter instead.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Capture pipeline configuration.
///
/// # Example file
///
/// ```yaml
/// origin: "http://br.reuters.com"
/// database: "capture.db"
/// timeout_secs: 30
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Site origin prefixed onto listing paths and relative article links.
    pub origin: String,
    /// Path of the SQLite database file; created on first open.
    pub database: PathBuf,
    /// Timeout applied to every HTTP request, in seconds.
    pub timeout_secs: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            origin: "http://br.reuters.com".to_string(),
            database: PathBuf::from("acervo.db"),
            timeout_secs: 30,
            user_agent: format!("acervo/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file, filling missing keys from the
    /// defaults.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the YAML file
    ///
    /// # Returns
    ///
    /// The parsed configuration, or [`Error::Config`] naming the file and
    /// the underlying read or parse failure.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        serde_yaml::from_str(&raw)
            .map_err(|e| Error::Config(format!("cannot parse {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.origin, "http://br.reuters.com");
        assert_eq!(config.database, PathBuf::from("acervo.db"));
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("acervo/"));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "database: \"/tmp/news.db\"\ntimeout_secs: 5\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.database, PathBuf::from("/tmp/news.db"));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.origin, "http://br.reuters.com");
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = Config::load(Path::new("/nonexistent/config.yaml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "orgin: \"http://example.com\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
