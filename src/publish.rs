//! Publishing the summary collection: serialize once, upload once. The
//! `ObjectStore` trait is the seam between the pipeline and the storage
//! backend; the real implementation puts a single object to S3 with a
//! public-read ACL, overwriting whatever was there.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use mockall::automock;
use thiserror::Error;
use tracing::{error, info};

use crate::summary::RepositorySummary;

/// Upload to object storage failed. Carries the storage service's error
/// detail when the SDK provides one.
#[derive(Debug, Error)]
#[error("failed to put object {bucket}/{key}: {message}")]
pub struct StorageError {
    pub bucket: String,
    pub key: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("failed to serialize repository summaries: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Destination for the published snapshot. Implemented by the real S3 client
/// and by recording stubs in tests.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload `body` as a JSON object readable by anonymous clients,
    /// replacing any existing object at `bucket`/`key`.
    async fn put_public_json(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<(), StorageError>;
}

/// Serializes the collection to its canonical JSON byte sequence and uploads
/// it in a single put. An empty collection publishes the literal `[]`.
pub async fn publish(
    store: &dyn ObjectStore,
    bucket: &str,
    key: &str,
    summaries: &[RepositorySummary],
) -> Result<(), PublishError> {
    let body = serde_json::to_vec(summaries)?;
    info!(
        bucket,
        key,
        repositories = summaries.len(),
        bytes = body.len(),
        "Uploading repository snapshot"
    );
    store.put_public_json(bucket, key, body).await?;
    Ok(())
}

/// S3-backed store. Credentials and region come from the ambient AWS
/// environment, the same way the hosting runtime injects them.
pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        S3Store { client }
    }

    pub async fn from_env() -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        S3Store::new(aws_sdk_s3::Client::new(&sdk_config))
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_public_json(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> Result<(), StorageError> {
        let result = self
            .client
            .put_object()
            .acl(ObjectCannedAcl::PublicRead)
            .bucket(bucket)
            .key(key)
            .content_type("application/json")
            .body(ByteStream::from(body))
            .send()
            .await;

        match result {
            Ok(_) => {
                info!(bucket, key, "Snapshot upload complete");
                Ok(())
            }
            Err(e) => {
                let message = DisplayErrorContext(&e).to_string();
                error!(bucket, key, error = %message, "PutObject failed");
                Err(StorageError {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    message,
                })
            }
        }
    }
}
