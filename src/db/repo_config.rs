//! Repository configuration file support.
//!
//! Reads backend selection and connection settings from a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::RepositoryError;

/// Repository configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub rest: RestSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
}

/// Collaborator API connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestSettings {
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub api_token: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

impl RepositoryConfig {
    /// Load repository configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: RepositoryConfig = toml::from_str(&content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Load repository configuration from the default location.
    ///
    /// Searches for `repository.toml` in the current directory and the
    /// parent directory.
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        let search_paths = vec![
            PathBuf::from("repository.toml"),
            PathBuf::from("../repository.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(RepositoryError::configuration(
            "No repository.toml found in standard locations",
        ))
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }

    /// Convert to RestConfig if this is a rest configuration.
    #[cfg(feature = "rest-repo")]
    pub fn to_rest_config(
        &self,
    ) -> Result<Option<super::repositories::RestConfig>, RepositoryError> {
        let repo_type = self
            .repository_type()
            .map_err(|e| RepositoryError::configuration(format!("Invalid repository type: {}", e)))?;

        if repo_type != RepositoryType::Rest {
            return Ok(None);
        }

        if self.rest.base_url.is_empty() {
            return Err(RepositoryError::configuration(
                "Rest repository requires 'rest.base_url' setting",
            ));
        }

        Ok(Some(super::repositories::RestConfig {
            base_url: self.rest.base_url.clone(),
            timeout_secs: self.rest.timeout_secs,
            api_token: self.rest.api_token.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_config() {
        let toml = r#"
[repository]
type = "local"
"#;

        let config: RepositoryConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.repository.repo_type, "local");
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
    }

    #[cfg(feature = "rest-repo")]
    #[test]
    fn test_parse_rest_config() {
        let toml = r#"
[repository]
type = "rest"

[rest]
base_url = "http://upstream:8080/api"
timeout_secs = 15
"#;

        let config: RepositoryConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Rest);

        let rest = config.to_rest_config().unwrap().unwrap();
        assert_eq!(rest.base_url, "http://upstream:8080/api");
        assert_eq!(rest.timeout_secs, 15);
        assert_eq!(rest.api_token, None);
    }

    #[cfg(feature = "rest-repo")]
    #[test]
    fn test_rest_requires_base_url() {
        let toml = r#"
[repository]
type = "rest"
"#;

        let config: RepositoryConfig = toml::from_str(toml).unwrap();
        assert!(config.to_rest_config().is_err());
    }
}
