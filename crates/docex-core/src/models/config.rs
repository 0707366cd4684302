//! Configuration structures for extraction runs and export.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::export::CsvDialect;

/// Main configuration for docex.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocexConfig {
    /// Extraction run settings.
    pub extraction: ExtractionSettings,

    /// Extraction backend credentials.
    pub api: ApiConfig,

    /// CSV export settings.
    pub export: ExportConfig,
}

/// Extraction run settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Maximum time to wait for the extraction service, in seconds (0 = no limit).
    pub timeout_secs: u64,

    /// Maximum size of a single input file, in megabytes (0 = unlimited).
    pub max_file_size_mb: u64,

    /// Default document language.
    pub language: String,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_file_size_mb: 10,
            language: "English".to_string(),
        }
    }
}

impl ExtractionSettings {
    /// Service timeout, `None` when disabled (0).
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// File size limit in bytes, `None` when unlimited or too large for `u64`.
    pub fn max_file_size_bytes(&self) -> Option<u64> {
        if self.max_file_size_mb == 0 {
            return None;
        }
        self.max_file_size_mb.checked_mul(1024 * 1024)
    }
}

/// Extraction backend credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Mistral API key.
    pub mistral_api_key: Option<String>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field(
                "mistral_api_key",
                &self.mistral_api_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// CSV export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// CSV flavour for exports.
    pub dialect: CsvDialect,

    /// File name for bulk exports.
    pub results_file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dialect: CsvDialect::default(),
            results_file_name: crate::export::RESULTS_FILE_NAME.to_string(),
        }
    }
}

impl DocexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Default location of the config file relative to a config root.
    pub fn default_path(config_root: &Path) -> PathBuf {
        config_root.join("docex").join("config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_settings_form() {
        let config = DocexConfig::default();
        assert_eq!(config.extraction.timeout_secs, 30);
        assert_eq!(config.extraction.max_file_size_mb, 10);
        assert_eq!(config.extraction.language, "English");
        assert_eq!(config.extraction.max_file_size_bytes(), Some(10 * 1024 * 1024));
        assert_eq!(config.export.results_file_name, "extraction_results.csv");
        assert!(config.api.mistral_api_key.is_none());
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let config: DocexConfig =
            serde_json::from_str(r#"{"extraction":{"timeout_secs":5}}"#).unwrap();
        assert_eq!(config.extraction.timeout_secs, 5);
        assert_eq!(config.extraction.max_file_size_mb, 10);
        assert_eq!(config.export.dialect, CsvDialect::Plain);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = DocexConfig::default();
        config.extraction.max_file_size_mb = 0;
        config.api.mistral_api_key = Some("secret".to_string());
        config.save(&path).unwrap();

        let loaded = DocexConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.max_file_size_bytes(), None);
        assert_eq!(loaded.api.mistral_api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_huge_size_limit_means_unlimited() {
        let settings: ExtractionSettings =
            serde_json::from_str(r#"{"max_file_size_mb":18446744073709551615}"#).unwrap();
        assert_eq!(settings.max_file_size_bytes(), None);

        let settings = ExtractionSettings {
            max_file_size_mb: u64::MAX / (1024 * 1024),
            ..Default::default()
        };
        assert_eq!(settings.max_file_size_bytes(), Some((u64::MAX / (1024 * 1024)) * 1024 * 1024));
    }

    #[test]
    fn test_api_key_is_redacted_in_debug() {
        let api = ApiConfig {
            mistral_api_key: Some("secret".to_string()),
        };
        let debug = format!("{:?}", api);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("redacted"));
    }
}
