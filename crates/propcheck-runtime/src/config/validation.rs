//! Configuration validation utilities.

use super::error::{ConfigError, ConfigResult};
use super::schema::{CheckConfig, CheckerConfig, LogFormat, LogOutput, LoggingConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &CheckerConfig) -> ConfigResult<()> {
    validate_check_config(&config.check)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

fn validate_check_config(check: &CheckConfig) -> ConfigResult<()> {
    for location in &check.locations {
        if location.as_os_str().is_empty() {
            return Err(ConfigError::validation("Locations cannot contain empty paths"));
        }
        if location.file_name().is_none() {
            return Err(ConfigError::validation(format!(
                "Location {} does not name a file",
                location.display()
            )));
        }
    }
    Ok(())
}

fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::missing_field("logging.file_path"));
    }

    if logging.format == LogFormat::Json && !cfg!(feature = "json-log") {
        return Err(ConfigError::validation(
            "JSON log format requires the json-log feature",
        ));
    }

    for module in logging.filters.keys() {
        if module.is_empty() || module.contains(char::is_whitespace) {
            return Err(ConfigError::validation(format!(
                "Invalid log filter target: {module:?}"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use std::path::PathBuf;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&CheckerConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_locations() {
        let mut config = CheckerConfig::default();
        config.check.locations = vec![PathBuf::from("application.yml")];
        assert!(validate_config(&config).is_ok());

        config.check.locations.push(PathBuf::new());
        assert!(validate_config(&config).is_err());

        config.check.locations = vec![PathBuf::from("conf/..")];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_file_output_needs_path() {
        let mut config = CheckerConfig::default();
        config.logging.output = LogOutput::File;

        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::MissingField { .. })));

        config.logging.file_path = Some(PathBuf::from("propcheck.log"));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_filter_targets() {
        let mut config = CheckerConfig::default();
        config
            .logging
            .filters
            .insert("propcheck core".to_string(), LogLevel::Debug);
        assert!(validate_config(&config).is_err());
    }
}
