use anyhow::{anyhow, Context, Result};
use lens_indexer::ScanOptions;
use lens_outline::OutlineConfig;
use lens_search::RankingConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "CONTEXT_LENS_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "context-lens.toml";

/// Top-level configuration file.
///
/// ```toml
/// clone_root = "repos"
/// docs_dir = "docs"
///
/// [scan]
/// extensions = ["py", "rs"]
///
/// [ranking]
/// recommend_limit = 10
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    /// Directory holding one checkout per repository
    pub clone_root: PathBuf,

    /// Where API documentation is written
    pub docs_dir: PathBuf,

    pub scan: ScanOptions,
    pub outline: OutlineConfig,
    pub ranking: RankingConfig,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            clone_root: PathBuf::from("repos"),
            docs_dir: PathBuf::from("docs"),
            scan: ScanOptions::default(),
            outline: OutlineConfig::default(),
            ranking: RankingConfig::default(),
        }
    }
}

impl LensConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.clone_root.as_os_str().is_empty() {
            return Err("clone_root must not be empty".to_string());
        }
        if self.docs_dir.as_os_str().is_empty() {
            return Err("docs_dir must not be empty".to_string());
        }
        self.scan.validate()?;
        self.outline.validate()?;
        self.ranking.validate()
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("Failed to parse configuration")?;
        config
            .validate()
            .map_err(|msg| anyhow!("Invalid configuration: {msg}"))?;
        Ok(config)
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("In {}", path.display()))
    }

    /// `explicit`, else `$CONTEXT_LENS_CONFIG`, else `./context-lens.toml`
    /// when present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }
        if let Some(path) = env::var_os(CONFIG_ENV).filter(|value| !value.is_empty()) {
            return Self::load_file(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::load_file(local);
        }
        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }
}
