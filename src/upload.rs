use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use time::OffsetDateTime;
use uuid::Uuid;

use crate::config::UploadConfig;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("invalid file type, allowed: {0}")]
    InvalidType(String),

    #[error("file too large, maximum size is {max} bytes")]
    TooLarge { max: usize },

    #[error("{0}")]
    Upstream(String),
}

/// Durable storage for uploaded binaries.
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `bytes` and returns the public URL of the stored object.
    async fn store(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        extension: &str,
    ) -> Result<String, UploadError>;
}

/// Writes blobs under a local directory, keyed `recipes/YYYY/MM/DD/<uuid>.<ext>`.
pub struct FsBlobStore {
    root: PathBuf,
    base_url: String,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

pub fn object_key(now: OffsetDateTime, extension: &str) -> String {
    format!(
        "recipes/{:04}/{:02}/{:02}/{}.{extension}",
        now.year(),
        u8::from(now.month()),
        now.day(),
        Uuid::new_v4(),
    )
}

#[async_trait::async_trait]
impl BlobStore for FsBlobStore {
    async fn store(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        extension: &str,
    ) -> Result<String, UploadError> {
        let key = object_key(OffsetDateTime::now_utc(), extension);
        let path = self.root.join(&key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                tracing::error!(error = %e, path = %parent.display(), "failed to create upload directory");
                UploadError::Upstream("failed to store file".to_owned())
            })?;
        }

        tokio::fs::write(&path, &bytes).await.map_err(|e| {
            tracing::error!(error = %e, path = %path.display(), "failed to write upload");
            UploadError::Upstream("failed to store file".to_owned())
        })?;

        tracing::info!(key, content_type, size = bytes.len(), "stored upload");

        Ok(format!("{}/{key}", self.base_url))
    }
}

/// Validates uploads before handing them to a [`BlobStore`].
#[derive(Clone)]
pub struct UploadService {
    store: Arc<dyn BlobStore>,
    max_bytes: usize,
    allowed_extensions: Vec<String>,
}

impl UploadService {
    pub fn new(store: Arc<dyn BlobStore>, config: &UploadConfig) -> Self {
        Self {
            store,
            max_bytes: config.max_bytes,
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Lowercased extension of `filename` when it is on the allow list.
    pub fn check_extension(&self, filename: &str) -> Result<String, UploadError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        match extension {
            Some(ext) if self.allowed_extensions.contains(&ext) => Ok(ext),
            _ => Err(UploadError::InvalidType(self.allowed_extensions.join(", "))),
        }
    }

    pub async fn upload_image(&self, filename: &str, bytes: Vec<u8>) -> Result<String, UploadError> {
        let extension = self.check_extension(filename)?;

        if bytes.len() > self.max_bytes {
            return Err(UploadError::TooLarge {
                max: self.max_bytes,
            });
        }

        let content_type = mime_guess::from_ext(&extension).first_or_octet_stream();

        self.store
            .store(bytes, content_type.essence_str(), &extension)
            .await
    }
}
