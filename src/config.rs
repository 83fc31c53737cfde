//! Runtime configuration.
//!
//! Read from YAML at `config/kontrak.yaml` or the path in `KONTRAK_CONFIG`.
//! A `.env` file is loaded first so either can be set there. Every field has
//! a default and a missing file yields the defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kontrak_layout::PageLayout;
use kontrak_templates::TemplateCatalog;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

/// Environment variable naming an alternative config file
pub const CONFIG_ENV: &str = "KONTRAK_CONFIG";

/// Config path used when `KONTRAK_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "config/kontrak.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KontrakConfig {
    /// Directory of template YAML files; the built-in catalog when unset
    pub templates_dir: Option<PathBuf>,
    /// Where exported layouts are written
    pub export_dir: PathBuf,
    /// Contract generation service endpoint
    pub generation_endpoint: Option<Url>,
    pub layout: PageLayout,
}

impl Default for KontrakConfig {
    fn default() -> Self {
        Self {
            templates_dir: None,
            export_dir: PathBuf::from("."),
            generation_endpoint: None,
            layout: PageLayout::default(),
        }
    }
}

impl KontrakConfig {
    /// Load `.env`, then the config file named by `KONTRAK_CONFIG` or the default path
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let path = std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from(path)
    }

    /// Load a config file; defaults when it does not exist
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // an empty document deserialises as null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Template catalog: the configured directory, else the built-in templates
    pub fn catalog(&self) -> Result<TemplateCatalog> {
        match &self.templates_dir {
            Some(dir) => TemplateCatalog::load_from_dir(dir)
                .with_context(|| format!("Failed to load templates from {:?}", dir)),
            None => TemplateCatalog::builtin().context("Failed to load built-in templates"),
        }
    }
}
