//! Coordinating module for the list-project-publish pipeline.

use thiserror::Error;
use tracing::{error, info};

use crate::config::{Config, ConfigError};
use crate::github::{self, GitHubClient, ProviderError, RepositorySource};
use crate::publish::{self, ObjectStore, PublishError, S3Store};
use crate::summary;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// What a successful invocation did, for the caller to report.
#[derive(Debug)]
pub struct RunReport {
    pub organization: String,
    pub repositories: usize,
    pub bucket: String,
    pub key: String,
}

/// Runs one full invocation against injected source and store. Sequential,
/// first error wins: either every repository is listed and the full snapshot
/// is published, or nothing is written at all.
pub async fn run(
    config: &Config,
    source: &dyn RepositorySource,
    store: &dyn ObjectStore,
) -> Result<RunReport, RunError> {
    info!(organization = %config.github_organization, "Starting snapshot run");

    let repositories =
        match github::list_all_repositories(source, &config.github_organization).await {
            Ok(repositories) => repositories,
            Err(e) => {
                error!(error = %e, "Listing repositories failed, nothing published");
                return Err(e.into());
            }
        };

    let summaries = summary::project(&repositories);

    if let Err(e) = publish::publish(store, &config.s3_bucket, &config.s3_key, &summaries).await {
        match &e {
            PublishError::Storage(storage) => {
                error!(error = %storage, "Storage rejected the snapshot upload")
            }
            PublishError::Serialize(serde) => {
                error!(error = %serde, "Snapshot could not be serialized")
            }
        }
        return Err(e.into());
    }

    info!(
        organization = %config.github_organization,
        repositories = summaries.len(),
        bucket = %config.s3_bucket,
        key = %config.s3_key,
        "Snapshot run complete"
    );
    Ok(RunReport {
        organization: config.github_organization.clone(),
        repositories: summaries.len(),
        bucket: config.s3_bucket.clone(),
        key: config.s3_key.clone(),
    })
}

/// Composition root for a real invocation: load config from the environment,
/// construct the GitHub and S3 clients from it, then run the pipeline.
pub async fn execute() -> Result<RunReport, RunError> {
    let config = Config::from_env()?;
    config.trace_loaded();

    let source = GitHubClient::new(&config.github_access_token)?;
    let store = S3Store::from_env().await;

    run(&config, &source, &store).await
}
