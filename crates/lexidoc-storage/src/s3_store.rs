//! S3-backed object store.

use std::time::Duration;

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};
use tracing::debug;

use crate::{ObjectStore, StorageError};

/// Object store backed by an S3 bucket via `rust-s3`.
///
/// Credentials come from the standard AWS environment (env vars, profile,
/// instance metadata), resolved once at construction.
pub struct S3Store {
    bucket: Box<Bucket>,
}

impl S3Store {
    /// Build a store for `bucket_name` in `region`.
    ///
    /// When `endpoint` is set the store targets an S3-compatible service
    /// (MinIO and friends) with path-style addressing; otherwise `region`
    /// must name a real AWS region.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Credentials`] when no AWS credentials can be
    /// resolved, [`StorageError::InvalidRegion`] for an unparseable region,
    /// or [`StorageError::S3`] when the client cannot be constructed.
    pub fn new(
        bucket_name: &str,
        region: &str,
        endpoint: Option<&str>,
        request_timeout: Duration,
    ) -> Result<Self, StorageError> {
        let region = match endpoint {
            Some(endpoint) => Region::Custom {
                region: region.to_string(),
                endpoint: endpoint.to_string(),
            },
            None => region
                .parse::<Region>()
                .map_err(|_| StorageError::InvalidRegion {
                    region: region.to_string(),
                })?,
        };

        let credentials = Credentials::default()?;
        let mut bucket =
            Bucket::new(bucket_name, region, credentials)?.with_request_timeout(request_timeout)?;
        if endpoint.is_some() {
            // Custom endpoints expect path-style addressing.
            bucket = bucket.with_path_style();
        }

        Ok(Self {
            bucket: Box::new(bucket),
        })
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        debug!(key, len = bytes.len(), "uploading object");
        let response = self.bucket.put_object(key, bytes).await?;
        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(StorageError::UnexpectedStatus { status });
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        debug!(key, "downloading object");
        match self.bucket.get_object(key).await {
            Ok(data) => Ok(data.bytes().to_vec()),
            Err(S3Error::HttpFailWithBody(404, _)) => Err(StorageError::NotFound {
                key: key.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}
