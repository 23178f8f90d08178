//! Application configuration

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::RuntimeConfigError;
use crate::project::home_directory;
use crate::runtimes::RuntimeMap;

/// Default directory searched for manifest and deployment files
pub const DEFAULT_PROJECT_PATH: &str = ".";

/// Default timeout for HTTP artifact downloads
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct DeployConfig {
    /// Directory holding manifest.yaml / deployment.yaml
    pub project_path: PathBuf,

    /// Timeout applied to HTTP artifact downloads
    pub http_timeout_secs: u64,

    /// JSON file overriding the built-in runtime tables
    pub runtimes_file: Option<PathBuf>,
}

impl DeployConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            project_path: env::var("EDGE_DEPLOY_PROJECT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_PROJECT_PATH)),

            http_timeout_secs: env::var("EDGE_DEPLOY_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),

            runtimes_file: env::var("EDGE_DEPLOY_RUNTIMES_FILE")
                .map(PathBuf::from)
                .ok()
                .or_else(user_runtimes_file),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Runtime tables from `runtimes_file`, or the built-in ones
    pub fn runtimes(&self) -> Result<RuntimeMap, RuntimeConfigError> {
        match &self.runtimes_file {
            Some(path) => {
                tracing::debug!("Loading runtimes from {:?}", path);
                RuntimeMap::load(path)
            }
            None => Ok(RuntimeMap::builtin()),
        }
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            project_path: PathBuf::from(DEFAULT_PROJECT_PATH),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            runtimes_file: None,
        }
    }
}

/// `~/.edge-deploy/runtimes.json` when it exists
fn user_runtimes_file() -> Option<PathBuf> {
    home_directory()
        .map(|home| home.join(".edge-deploy").join("runtimes.json"))
        .filter(|path| path.exists())
}
