//! Settings file
//!
//! Optional TOML file passed with `--config`. Every key has a default:
//!
//! ```toml
//! [converter]
//! program = "soffice"
//!
//! [render]
//! strict = false
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::convert::DEFAULT_CONVERTER;
use crate::error::{ResumeError, Result};
use crate::render::RenderOptions;

/// Top-level settings structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// External PDF converter
    pub converter: ConverterSettings,
    /// Placeholder binding
    pub render: RenderSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Read settings from a file
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading config: {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| ResumeError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content).map_err(|e| ResumeError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Read settings from `path` if given, defaults otherwise
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Rendering options derived from these settings
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            strict: self.render.strict,
        }
    }
}

/// External converter settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConverterSettings {
    /// Program invoked in headless mode
    pub program: String,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            program: DEFAULT_CONVERTER.to_string(),
        }
    }
}

/// Placeholder binding settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RenderSettings {
    /// Fail on placeholders with no value
    pub strict: bool,
}
