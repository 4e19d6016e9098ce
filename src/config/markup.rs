//! Markup conventions: which attributes mark components, targets and actions

use serde::Deserialize;

use crate::error::ConfigError;

/// Attribute names the loader and binder read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupConfig {
    /// Marks a component root; its value is the registered name
    pub component_attribute: String,

    /// Prefix of target declarations, completed with the component name
    pub target_prefix: String,

    /// Prefix of action declarations, completed with the component name
    pub action_prefix: String,

    /// Separates event and method in an action value
    pub action_separator: char,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            component_attribute: "data-component".to_string(),
            target_prefix: "data-target-".to_string(),
            action_prefix: "data-action-".to_string(),
            action_separator: '#',
        }
    }
}

/// Markup section as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileMarkup {
    pub component_attribute: Option<String>,
    pub target_prefix: Option<String>,
    pub action_prefix: Option<String>,
    pub action_separator: Option<String>,
}

impl MarkupConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileMarkup>) -> Result<Self, ConfigError> {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let action_separator = match file.action_separator {
            Some(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_alphanumeric() && !c.is_whitespace() => c,
                    _ => {
                        return Err(ConfigError::Invalid {
                            key: "markup.action_separator",
                            message: format!("expected one punctuation character, got {:?}", s),
                        })
                    }
                }
            }
            None => defaults.action_separator,
        };

        let config = Self {
            component_attribute: file
                .component_attribute
                .unwrap_or(defaults.component_attribute)
                .to_ascii_lowercase(),
            target_prefix: file
                .target_prefix
                .unwrap_or(defaults.target_prefix)
                .to_ascii_lowercase(),
            action_prefix: file
                .action_prefix
                .unwrap_or(defaults.action_prefix)
                .to_ascii_lowercase(),
            action_separator,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("markup.component_attribute", &self.component_attribute),
            ("markup.target_prefix", &self.target_prefix),
            ("markup.action_prefix", &self.action_prefix),
        ];
        for (key, value) in fields {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(ConfigError::Invalid {
                    key,
                    message: format!("attribute names cannot be empty or contain spaces: {:?}", value),
                });
            }
        }
        if self.target_prefix == self.action_prefix {
            return Err(ConfigError::Invalid {
                key: "markup.action_prefix",
                message: "must differ from markup.target_prefix".to_string(),
            });
        }
        Ok(())
    }
}
