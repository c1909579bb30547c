//! Designer configuration parsed from environment variables.

use crate::consts::DEFAULT_STORAGE_KEY;
use crate::schema::Layout;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignerConfig {
    /// Key the schema is saved under.
    pub storage_key: String,
    /// Layout of a fresh schema.
    pub default_layout: Layout,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self { storage_key: DEFAULT_STORAGE_KEY.to_owned(), default_layout: Layout::Horizontal }
    }
}

impl DesignerConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `FORM_DESIGNER_STORAGE_KEY`: default `formDesignerSchema`
    /// - `FORM_DESIGNER_DEFAULT_LAYOUT`: `horizontal` (default) or `vertical`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an empty storage key or an
    /// unknown layout.
    pub fn from_env() -> Result<Self, ConfigError> {
        let storage_key = match std::env::var("FORM_DESIGNER_STORAGE_KEY") {
            Ok(key) if key.trim().is_empty() => {
                return Err(ConfigError::Invalid { var: "FORM_DESIGNER_STORAGE_KEY", value: key });
            }
            Ok(key) => key,
            Err(_) => DEFAULT_STORAGE_KEY.to_owned(),
        };
        let default_layout = parse_layout(std::env::var("FORM_DESIGNER_DEFAULT_LAYOUT").as_deref().unwrap_or(""))?;

        Ok(Self { storage_key, default_layout })
    }
}

fn parse_layout(raw: &str) -> Result<Layout, ConfigError> {
    match raw.trim() {
        "" | "horizontal" => Ok(Layout::Horizontal),
        "vertical" => Ok(Layout::Vertical),
        other => Err(ConfigError::Invalid { var: "FORM_DESIGNER_DEFAULT_LAYOUT", value: other.to_owned() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
