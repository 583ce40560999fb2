//! Configuration handling for tcparse

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TcParseError;

/// tcparse configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Extraction settings
    #[serde(default)]
    pub extract: ExtractConfig,
}

/// Which grammars run during extraction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Read ```json / ```testcase fenced blocks
    #[serde(default = "enabled")]
    pub fenced: bool,

    /// Read `=== TESTCASE START ===` regions
    #[serde(default = "enabled")]
    pub markers: bool,

    /// Read `| field | value |` Markdown tables
    #[serde(default = "enabled")]
    pub tables: bool,
}

fn enabled() -> bool {
    true
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            fenced: true,
            markers: true,
            tables: true,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, TcParseError> {
        toml::from_str(content).map_err(|e| TcParseError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, TcParseError> {
        if !path.is_file() {
            return Err(TcParseError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
