//! Repository factory: picks a backend from configuration at startup.

use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::RepositoryConfig;
#[cfg(feature = "local-repo")]
use super::repositories::LocalRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};

/// Available repository backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory snapshot store (default).
    Local,
    /// Collaborator REST API (feature `rest-repo`).
    Rest,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "memory" => Ok(RepositoryType::Local),
            "rest" | "remote" => Ok(RepositoryType::Rest),
            other => Err(format!(
                "unknown repository type '{}', expected 'local' or 'rest'",
                other
            )),
        }
    }
}

/// Factory for repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    #[cfg(feature = "local-repo")]
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    #[cfg(feature = "rest-repo")]
    pub fn create_rest(
        config: super::repositories::RestConfig,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        Ok(Arc::new(super::repositories::RestRepository::new(config)?))
    }

    /// Build the backend named by the configuration file.
    pub fn from_config(config: &RepositoryConfig) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = config
            .repository_type()
            .map_err(RepositoryError::configuration)?;

        match repo_type {
            #[cfg(feature = "local-repo")]
            RepositoryType::Local => {
                log::info!("using local in-memory repository");
                Ok(Self::create_local())
            }
            #[cfg(not(feature = "local-repo"))]
            RepositoryType::Local => Err(RepositoryError::configuration(
                "local repository support not compiled in (enable feature 'local-repo')",
            )),
            #[cfg(feature = "rest-repo")]
            RepositoryType::Rest => {
                let rest = config.to_rest_config()?.ok_or_else(|| {
                    RepositoryError::configuration(
                        "rest repository requires a [rest] section in repository.toml",
                    )
                })?;
                log::info!("using rest repository at {}", rest.base_url);
                Self::create_rest(rest)
            }
            #[cfg(not(feature = "rest-repo"))]
            RepositoryType::Rest => Err(RepositoryError::configuration(
                "rest repository support not compiled in (enable feature 'rest-repo')",
            )),
        }
    }
}
