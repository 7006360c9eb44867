//! IBCS color palette
//!
//! Chart elements ask for colors by token (`actual`, `budget`, `positive`, ...).
//! A stylesheet maps tokens to concrete CSS colors and can be loaded from TOML
//! to re-brand every chart without touching the renderers.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A stylesheet mapping color tokens to concrete values
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Color mappings: token name -> CSS color
    pub colors: BTreeMap<String, String>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Default IBCS palette: dark actuals, light previous year, outlined plan,
/// green/red variances
const DEFAULT_PALETTE: &str = r##"
[metadata]
name = "IBCS"

[colors]
# Scenarios
actual = "#404040"
budget = "#404040"
previous-year = "#a6a6a6"
forecast = "#7f7f7f"

# Variances
positive = "#8cb400"
negative = "#ff0000"

# Chrome
background = "#ffffff"
axis = "#404040"
grid = "#e6e6e6"
text = "#262626"
text-muted = "#737373"
comment = "#f2f2f2"
comment-marker = "#404040"
debug = "#ff00ff"
"##;

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load stylesheet from TOML string
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        Ok(Stylesheet {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors: parsed.colors,
        })
    }

    /// Resolve a color token to a concrete value
    ///
    /// Returns None if the token is not defined in this stylesheet.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a color token with fallback to the default palette
    ///
    /// Fallback order:
    /// 1. Check this stylesheet for exact token
    /// 2. Check default palette for exact token
    /// 3. Use category default (variances, scenarios, chrome)
    pub fn resolve_or_default(&self, token: &str) -> String {
        if let Some(color) = self.resolve(token) {
            return color.to_string();
        }

        let default = Self::default();
        if let Some(color) = default.resolve(token) {
            return color.to_string();
        }

        if token.starts_with("positive") {
            return "#8cb400".to_string();
        }
        if token.starts_with("negative") {
            return "#ff0000".to_string();
        }
        if token.starts_with("background") {
            return "#ffffff".to_string();
        }
        if token.starts_with("text") {
            return "#262626".to_string();
        }

        // Unknown category - scenario gray
        "#404040".to_string()
    }

    /// Variance color for a favorable or unfavorable variance
    pub fn variance_color(&self, favorable: bool) -> String {
        self.resolve_or_default(if favorable { "positive" } else { "negative" })
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::from_str(DEFAULT_PALETTE).expect("Default palette should be valid TOML")
    }
}
