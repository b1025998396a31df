//! Configuration management for the card linter
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (cardlint.toml)
//! - Environment variables (CARDLINT_*)
//!
//! ## Example config file (cardlint.toml):
//! ```toml
//! [schema]
//! document = "card_logic_schema.md"
//!
//! [scan]
//! cards_dir = "assets/data/cards"
//! exclude = ["card_manifest.json"]
//!
//! [report]
//! format = "text"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the card linter
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LintConfig {
    /// Schema document settings
    #[serde(default)]
    pub schema: SchemaDocConfig,

    /// Card scan settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,
}

/// Schema document configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDocConfig {
    /// Path to the schema document the rule sets are extracted from
    #[serde(default = "default_document")]
    pub document: PathBuf,
}

/// Card scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Directory holding card data files
    #[serde(default = "default_cards_dir")]
    pub cards_dir: PathBuf,

    /// File names excluded from bulk scans
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

/// Report configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReportConfig {
    /// Output format (text or json)
    #[serde(default)]
    pub format: ReportFormat,
}

/// Output format for the run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

// Default value functions
fn default_document() -> PathBuf {
    PathBuf::from("card_logic_schema.md")
}

fn default_cards_dir() -> PathBuf {
    PathBuf::from("assets/data/cards")
}

fn default_exclude() -> Vec<String> {
    vec!["card_manifest.json".to_string()]
}

impl Default for SchemaDocConfig {
    fn default() -> Self {
        Self {
            document: default_document(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            cards_dir: default_cards_dir(),
            exclude: default_exclude(),
        }
    }
}

impl LintConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = ["cardlint.toml", ".cardlint.toml", "config/cardlint.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "cardlint") {
            let xdg_config = config_dir.config_dir().join("cardlint.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (CARDLINT_*)
        builder = builder.add_source(
            Environment::with_prefix("CARDLINT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Get the schema document path (resolves relative paths)
    pub fn document_path(&self) -> PathBuf {
        if self.schema.document.is_absolute() {
            self.schema.document.clone()
        } else {
            std::env::current_dir()
                .unwrap_or_default()
                .join(&self.schema.document)
        }
    }

    /// Get the cards directory (resolves relative paths)
    pub fn cards_dir(&self) -> PathBuf {
        if self.scan.cards_dir.is_absolute() {
            self.scan.cards_dir.clone()
        } else {
            std::env::current_dir()
                .unwrap_or_default()
                .join(&self.scan.cards_dir)
        }
    }
}
