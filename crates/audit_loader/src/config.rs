//! Configuration file parsing (YAML/TOML).
//!
//! Fields missing from a file keep their sprint backlog defaults, so a file
//! only needs to name what it overrides.

use crate::error::ConfigError;
use audit_core::AuditConfig;
use std::path::Path;

/// Result type alias for configuration parsing.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Parse and validate a configuration from a YAML string.
///
/// # Example
///
/// ```rust
/// use audit_loader::parse_config_yaml;
///
/// let yaml = r#"
/// primary_key: ticket
/// numeric_bound:
///   column: points
///   min: 1
///   max: 13
/// "#;
///
/// let config = parse_config_yaml(yaml).unwrap();
/// assert_eq!(config.primary_key, "ticket");
/// ```
pub fn parse_config_yaml(content: &str) -> ConfigResult<AuditConfig> {
    let config: AuditConfig = serde_yaml_ng::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Parse and validate a configuration from a TOML string.
pub fn parse_config_toml(content: &str) -> ConfigResult<AuditConfig> {
    let config: AuditConfig =
        toml::from_str(content).map_err(|e| ConfigError::TomlError(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Detect the configuration format from a file extension.
///
/// # Errors
///
/// Returns `ConfigError::InvalidExtension` if the file has no extension.
/// Returns `ConfigError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> ConfigResult<ConfigFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ConfigError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(ConfigFormat::Yaml),
        "toml" => Ok(ConfigFormat::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a configuration file, choosing the format by extension.
pub fn parse_config_file(path: &Path) -> ConfigResult<AuditConfig> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        ConfigFormat::Yaml => parse_config_yaml(&content),
        ConfigFormat::Toml => parse_config_toml(&content),
    }
}

/// Serialize a configuration in the given format.
pub fn render_config(config: &AuditConfig, format: ConfigFormat) -> ConfigResult<String> {
    match format {
        ConfigFormat::Yaml => Ok(serde_yaml_ng::to_string(config)?),
        ConfigFormat::Toml => {
            toml::to_string(config).map_err(|e| ConfigError::TomlError(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_core::{ColumnType, NumericBound};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_yaml_mapping_keeps_defaults() {
        let config = parse_config_yaml("{}").unwrap();
        assert_eq!(config, AuditConfig::default());
    }

    #[test]
    fn test_yaml_overrides() {
        let yaml = r#"
primary_key: Ticket
expected_schema:
  - name: Ticket
    type: object
  - name: Points
    type: float64
allowed_values:
  - column: Status
    values: [Open, Done]
    scored: true
numeric_bound:
  column: Points
  min: 1
  max: 13
"#;

        let config = parse_config_yaml(yaml).unwrap();

        assert_eq!(config.primary_key, "Ticket");
        assert_eq!(config.expected_type("Ticket"), Some(ColumnType::Text));
        assert_eq!(config.expected_type("Points"), Some(ColumnType::Float));
        assert!(config.allowed_values[0].scored);
        assert_eq!(
            config.numeric_bound,
            Some(NumericBound::new("Points", 1.0, 13.0))
        );
    }

    #[test]
    fn test_toml_overrides() {
        let toml = r#"
primary_key = "Ticket"

[[expected_schema]]
name = "Ticket"
type = "text"

[numeric_bound]
column = "Hours"
min = 0.0
max = 8.0
"#;

        let config = parse_config_toml(toml).unwrap();
        assert_eq!(config.expected_schema.len(), 1);
        assert_eq!(config.numeric_bound.unwrap().max, 8.0);
    }

    #[test]
    fn test_invalid_bound_rejected() {
        let yaml = r#"
numeric_bound:
  column: Est_Hours
  min: 10
  max: 1
"#;
        assert!(matches!(
            parse_config_yaml(yaml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let yaml = r#"
expected_schema:
  - name: Ticket
    type: timestamp
"#;
        assert!(matches!(
            parse_config_yaml(yaml),
            Err(ConfigError::YamlError(_))
        ));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(
            detect_format(Path::new("audit.yml")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            detect_format(Path::new("audit.TOML")).unwrap(),
            ConfigFormat::Toml
        );
        assert!(matches!(
            detect_format(Path::new("audit.json")),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "json"
        ));
        assert!(matches!(
            detect_format(Path::new("audit")),
            Err(ConfigError::InvalidExtension)
        ));
    }

    #[test]
    fn test_render_then_parse_default() {
        let config = AuditConfig::default();

        let yaml = render_config(&config, ConfigFormat::Yaml).unwrap();
        assert_eq!(parse_config_yaml(&yaml).unwrap(), config);

        let toml = render_config(&config, ConfigFormat::Toml).unwrap();
        assert_eq!(parse_config_toml(&toml).unwrap(), config);
    }
}
