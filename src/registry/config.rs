//! Registry configuration

use super::error::MediatorError;

/// Default channel path delimiter
pub const DEFAULT_DELIMITER: &str = ":";

/// Mediator configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Delimiter splitting channel paths into segments
    ///
    /// Fixed for the lifetime of the mediator built from this config.
    pub delimiter: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

impl RegistryConfig {
    /// Set the path delimiter
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Check the config before building a mediator from it
    pub fn validate(&self) -> Result<(), MediatorError> {
        if self.delimiter.is_empty() {
            return Err(MediatorError::InvalidDelimiter);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();

        assert_eq!(config.delimiter, ":");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_delimiter() {
        let config = RegistryConfig::default().delimiter("/");

        assert_eq!(config.delimiter, "/");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_multi_char_delimiter() {
        let config = RegistryConfig::default().delimiter("::");

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        let config = RegistryConfig::default().delimiter("");

        assert!(matches!(
            config.validate(),
            Err(MediatorError::InvalidDelimiter)
        ));
    }
}
