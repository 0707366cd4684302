pub mod config;
pub mod extract;
pub mod schema;

use std::path::{Path, PathBuf};

use docex_core::DocexConfig;

/// `<config dir>/docex/config.json`.
pub fn default_config_path() -> PathBuf {
    let root = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    DocexConfig::default_path(&root)
}

/// Explicit path if given, else the default file if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DocexConfig> {
    if let Some(path) = config_path {
        return Ok(DocexConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        Ok(DocexConfig::from_file(&default_path)?)
    } else {
        Ok(DocexConfig::default())
    }
}
