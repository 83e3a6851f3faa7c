use std::env;

use thiserror::Error;
use tracing::{debug, error, info};

pub const GITHUB_ACCESS_TOKEN: &str = "GITHUB_ACCESS_TOKEN";
pub const GITHUB_ORGANIZATION: &str = "GITHUB_ORGANIZATION";
pub const S3_BUCKET: &str = "S3_BUCKET";
pub const S3_KEY: &str = "S3_KEY";

/// Missing required environment variable. The key name is part of the message
/// so operators can tell immediately which one to set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{key} environment variable not set")]
pub struct ConfigError {
    pub key: &'static str,
}

/// All parameters of a single invocation, read once from the environment.
/// No defaulting and no validation of the values themselves.
#[derive(Debug, Clone)]
pub struct Config {
    pub github_access_token: String,
    pub github_organization: String,
    pub s3_bucket: String,
    pub s3_key: String,
}

impl Config {
    /// Reads the four required environment variables. The first missing one
    /// fails the load, naming that key.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            github_access_token: require(GITHUB_ACCESS_TOKEN)?,
            github_organization: require(GITHUB_ORGANIZATION)?,
            s3_bucket: require(S3_BUCKET)?,
            s3_key: require(S3_KEY)?,
        })
    }

    pub fn trace_loaded(&self) {
        info!(
            organization = %self.github_organization,
            bucket = %self.s3_bucket,
            key = %self.s3_key,
            "Loaded Config"
        );
        debug!(token_len = self.github_access_token.len(), "Access token present");
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(value),
        Err(_) => {
            error!(key, "Required environment variable not set");
            Err(ConfigError { key })
        }
    }
}
