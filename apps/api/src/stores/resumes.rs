use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;

/// Résumé Store: turns a stored résumé reference into its text.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Unknown or unreadable ids fail with `AppError::Resolution`.
    async fn resolve(&self, resume_id: Uuid) -> Result<String, AppError>;
}

/// Résumé text stored as UTF-8 objects at `<prefix>/<resume_id>.txt` in S3 / MinIO.
pub struct S3ResumeStore {
    client: S3Client,
    bucket: String,
    prefix: String,
}

impl S3ResumeStore {
    pub fn new(client: S3Client, bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }

    fn key_for(&self, resume_id: Uuid) -> String {
        object_key(&self.prefix, resume_id)
    }
}

fn object_key(prefix: &str, resume_id: Uuid) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("{resume_id}.txt")
    } else {
        format!("{prefix}/{resume_id}.txt")
    }
}

#[async_trait]
impl ResumeStore for S3ResumeStore {
    async fn resolve(&self, resume_id: Uuid) -> Result<String, AppError> {
        let key = self.key_for(resume_id);
        debug!("Resolving resume from s3://{}/{}", self.bucket, key);

        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| {
                let err = e.into_service_error();
                if err.is_no_such_key() {
                    AppError::Resolution(format!("Resume {resume_id} not found"))
                } else {
                    AppError::Storage(format!("S3 get_object failed for {key}: {err}"))
                }
            })?;

        let bytes = object
            .body
            .collect()
            .await
            .map_err(|e| AppError::Storage(format!("S3 body read failed for {key}: {e}")))?
            .into_bytes();

        String::from_utf8(bytes.to_vec())
            .map_err(|_| AppError::Resolution(format!("Resume {resume_id} is not readable text")))
    }
}
