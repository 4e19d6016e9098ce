//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the effective configuration as a commented config file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# simple-components configuration

# Attribute conventions read from page markup
[markup]
component_attribute = "{component}"
target_prefix = "{target}"      # completed with the component name
action_prefix = "{action}"      # completed with the component name
action_separator = "{separator}"       # event{separator}method

# Logging configuration (RUST_LOG and SIMPLE_COMPONENTS_LOG override level)
[logging]
level = "{log_level}"
console = {console}
file_enabled = {file_enabled}
file_dir = "{file_dir}"
file_rotation = "{file_rotation}"  # hourly, daily, never
file_prefix = "{file_prefix}"
"#,
            component = self.markup.component_attribute,
            target = self.markup.target_prefix,
            action = self.markup.action_prefix,
            separator = escape(self.markup.action_separator),
            log_level = self.logging.level,
            console = self.logging.console,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display().to_string().replace('\\', "/"),
            file_rotation = self.logging.file_rotation.as_str(),
            file_prefix = self.logging.file_prefix,
        )
    }
}

/// Escape a char for a basic TOML string
fn escape(c: char) -> String {
    match c {
        '"' => "\\\"".to_string(),
        '\\' => "\\\\".to_string(),
        other => other.to_string(),
    }
}
