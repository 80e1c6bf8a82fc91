//! CLI command execution

use super::commands::{Cli, Commands, StatusArg};
use crate::base::{BaseClient, LookupOptions};
use crate::cache::{CacheLayer, CachePolicy, MemoryCache};
use crate::config::{Config, EndpointRegistry};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::jobs::JobsClient;
use crate::projection::ProjectionSpec;
use crate::secrets::{EnvSecrets, SecretStore};
use std::sync::Arc;
use tracing::info;

/// Executes CLI commands against configured clients
pub struct Runner {
    cli: Cli,
    secrets: EnvSecrets,
}

impl Runner {
    /// Create a runner for the parsed CLI
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            secrets: EnvSecrets::new(),
        }
    }

    /// Run the selected command
    pub async fn run(&self) -> Result<()> {
        let config = Config::from_path(&self.cli.config)?;

        match &self.cli.command {
            Commands::Check => self.check(&config),
            Commands::Lookup {
                table,
                field,
                key,
                ttl,
            } => {
                let ttl = ttl.unwrap_or(config.cache.default_ttl_seconds);
                self.lookup(&config, table, field, key.as_deref(), ttl).await
            }
            Commands::Jobs { status, since_days } => {
                self.jobs(&config, *status, *since_days).await
            }
        }
    }

    fn check(&self, config: &Config) -> Result<()> {
        config.validate()?;

        for secret in [&config.tabular.token_secret, &config.jobs.token_secret] {
            if self.secrets.get(secret).is_none() {
                return Err(Error::config(format!("secret '{secret}' is not set")));
            }
        }

        info!("configuration and secrets look good");
        println!("ok");
        Ok(())
    }

    async fn lookup(
        &self,
        config: &Config,
        table: &str,
        field: &str,
        key: Option<&str>,
        ttl: i64,
    ) -> Result<()> {
        let client = self.base_client(config)?;

        let mut options = LookupOptions::new(ProjectionSpec::scalar(field)).policy(CachePolicy {
            ttl_seconds: ttl,
            write_when_disabled: config.cache.write_when_disabled,
        });
        if let Some(key_field) = key {
            options = options.key_field(key_field);
        }

        let lookup = client.lookup_list(table, &options).await?;
        println!("{}", serde_json::to_string_pretty(&lookup)?);
        Ok(())
    }

    async fn jobs(&self, config: &Config, status: StatusArg, since_days: i64) -> Result<()> {
        let client = self.jobs_client(config)?;

        let jobs = match status {
            StatusArg::Active => client.fetch_active_jobs().await?,
            StatusArg::All => client.fetch_all_jobs().await?,
            StatusArg::Archived => client.fetch_archived_jobs(since_days).await?,
        };

        println!("{}", serde_json::to_string_pretty(&jobs)?);
        Ok(())
    }

    fn base_client(&self, config: &Config) -> Result<BaseClient> {
        let token = self.token(&config.tabular.token_secret)?;
        let http = HttpClient::with_config(
            HttpClientConfig::builder().bearer_token(token).build(),
        );
        // Each invocation runs with a process-local cache; a deployment
        // wanting cross-run reuse plugs in a shared store instead.
        let cache = CacheLayer::new(Arc::new(MemoryCache::new()));
        Ok(BaseClient::new(
            http,
            config.tabular.api_url.clone(),
            config.tabular.base.clone(),
            cache,
        ))
    }

    fn jobs_client(&self, config: &Config) -> Result<JobsClient> {
        let token = self.token(&config.jobs.token_secret)?;
        let http = HttpClient::with_config(
            HttpClientConfig::builder().bearer_token(token).build(),
        );
        let registry = EndpointRegistry::standard(&config.jobs.api_url);
        Ok(JobsClient::new(http, registry).with_page_size(config.jobs.page_size))
    }

    fn token(&self, secret: &str) -> Result<String> {
        self.secrets
            .get(secret)
            .ok_or_else(|| Error::config(format!("secret '{secret}' is not set")))
    }
}
