//! Configuration
//!
//! Serde-backed configuration loaded from YAML, plus the immutable
//! endpoint registry for the job-management API. The registry is plain
//! data constructed once and injected into clients; nothing here is
//! global or mutable after load.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete configuration loaded from YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Tabular-database API settings
    #[serde(default)]
    pub tabular: TabularConfig,

    /// Job-management API settings
    #[serde(default)]
    pub jobs: JobsConfig,

    /// Cache policy defaults
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Parse configuration from a YAML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(contents: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check required fields and URL syntax
    pub fn validate(&self) -> Result<()> {
        if self.tabular.api_url.is_empty() {
            return Err(Error::missing_field("tabular.api_url"));
        }
        if self.tabular.base.is_empty() {
            return Err(Error::missing_field("tabular.base"));
        }
        if self.jobs.api_url.is_empty() {
            return Err(Error::missing_field("jobs.api_url"));
        }
        Url::parse(&self.tabular.api_url)?;
        Url::parse(&self.jobs.api_url)?;
        Ok(())
    }
}

// ============================================================================
// Tabular-Database API
// ============================================================================

/// Settings for the tabular-database API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabularConfig {
    /// API root URL
    #[serde(default)]
    pub api_url: String,

    /// Base identifier holding the tables this deployment reads
    #[serde(default)]
    pub base: String,

    /// Secret name resolving to the bearer token
    #[serde(default = "default_tabular_token_secret")]
    pub token_secret: String,
}

impl Default for TabularConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            base: String::new(),
            token_secret: default_tabular_token_secret(),
        }
    }
}

fn default_tabular_token_secret() -> String {
    "TABULAR_API_TOKEN".to_string()
}

// ============================================================================
// Job-Management API
// ============================================================================

/// Settings for the job-management API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsConfig {
    /// API root URL
    #[serde(default)]
    pub api_url: String,

    /// Records per search page; the service dislikes more than 500
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Secret name resolving to the bearer token
    #[serde(default = "default_jobs_token_secret")]
    pub token_secret: String,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            page_size: default_page_size(),
            token_secret: default_jobs_token_secret(),
        }
    }
}

fn default_page_size() -> u32 {
    300
}

fn default_jobs_token_secret() -> String {
    "JOBS_API_TOKEN".to_string()
}

// ============================================================================
// Cache
// ============================================================================

/// Cache policy defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Default entry lifetime for cache-fronted lookups
    #[serde(default = "default_ttl_seconds")]
    pub default_ttl_seconds: i64,

    /// Whether a call with caching disabled still refreshes the entry
    #[serde(default = "default_true")]
    pub write_when_disabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_seconds: default_ttl_seconds(),
            write_when_disabled: true,
        }
    }
}

fn default_ttl_seconds() -> i64 {
    43_200 // 12 hours
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Endpoint Registry
// ============================================================================

/// The job-management API's search and read endpoints.
///
/// Immutable after construction; built from the configured API root and
/// injected into the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRegistry {
    /// Job search
    pub jobs: String,
    /// Job item search
    pub job_items: String,
    /// Company search
    pub companies: String,
    /// User listing (plain GET)
    pub users: String,
    /// Logged expense search
    pub expenses: String,
    /// Invoice search
    pub invoices: String,
    /// Invoice line item search
    pub invoice_lines: String,
    /// Quote search
    pub quotes: String,
    /// Logged time search
    pub time: String,
}

impl EndpointRegistry {
    /// Build the standard registry under an API root URL
    pub fn standard(api_url: &str) -> Self {
        let root = api_url.trim_end_matches('/');
        Self {
            jobs: format!("{root}/jobs/search"),
            job_items: format!("{root}/job_items/search"),
            companies: format!("{root}/companies/search"),
            users: format!("{root}/users"),
            expenses: format!("{root}/logged_expenses/search"),
            invoices: format!("{root}/invoices/search"),
            invoice_lines: format!("{root}/invoice_line_items/search"),
            quotes: format!("{root}/quotes/search"),
            time: format!("{root}/logged_times/search"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_from_yaml() {
        let config = Config::from_str(
            r"
tabular:
  api_url: https://tables.example.com/v0
  base: appExample
jobs:
  api_url: https://jobs.example.com/v1
",
        )
        .unwrap();

        assert_eq!(config.tabular.base, "appExample");
        assert_eq!(config.jobs.page_size, 300);
        assert_eq!(config.cache.default_ttl_seconds, 43_200);
        assert!(config.cache.write_when_disabled);
    }

    #[test]
    fn test_config_missing_base_fails_validation() {
        let result = Config::from_str(
            r"
tabular:
  api_url: https://tables.example.com/v0
jobs:
  api_url: https://jobs.example.com/v1
",
        );
        assert!(matches!(
            result,
            Err(Error::MissingConfigField { ref field }) if field == "tabular.base"
        ));
    }

    #[test]
    fn test_config_bad_url_fails_validation() {
        let result = Config::from_str(
            r"
tabular:
  api_url: not-a-url
  base: appExample
jobs:
  api_url: https://jobs.example.com/v1
",
        );
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_config_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "tabular:\n  api_url: https://tables.example.com/v0\n  base: appX\njobs:\n  api_url: https://jobs.example.com/v1\n"
        )
        .unwrap();

        let config = Config::from_path(file.path()).unwrap();
        assert_eq!(config.tabular.base, "appX");
    }

    #[test]
    fn test_endpoint_registry_standard() {
        let registry = EndpointRegistry::standard("https://jobs.example.com/v1/");

        assert_eq!(registry.jobs, "https://jobs.example.com/v1/jobs/search");
        assert_eq!(registry.users, "https://jobs.example.com/v1/users");
        assert_eq!(
            registry.invoice_lines,
            "https://jobs.example.com/v1/invoice_line_items/search"
        );
        assert_eq!(
            registry.time,
            "https://jobs.example.com/v1/logged_times/search"
        );
    }
}
