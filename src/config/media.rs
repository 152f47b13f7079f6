//! Media CDN configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// Media CDN credentials.
///
/// Uploads go straight from the browser to the CDN; the service only
/// needs the cloud name to build delivery URLs. The key pair is carried
/// for signed operations and must be set together.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaConfig {
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<SecretString>,
}

impl MediaConfig {
    /// Validate media configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.is_some() != self.api_secret.is_some() {
            return Err(ValidationError::IncompleteMediaCredentials);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_valid() {
        assert!(MediaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_key_without_secret_is_rejected() {
        let config = MediaConfig {
            api_key: Some("1234".to_string()),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::IncompleteMediaCredentials));
    }
}
