use async_trait::async_trait;

// ============================================================================
// Configuration
// ============================================================================

/// Where profile pictures live.
///
/// `bucket_path` follows the `<project>/<bucket>` convention of the hosting
/// platform; stored picture values are `<bucket>/<object>` paths relative to
/// it. The default picture for new accounts is a shared placeholder object
/// in the same bucket.
#[derive(Debug, Clone)]
pub struct PictureConfig {
    bucket_path: String,
}

impl PictureConfig {
    pub fn new(bucket_path: impl Into<String>) -> Self {
        Self {
            bucket_path: bucket_path.into(),
        }
    }

    pub fn from_env() -> Self {
        let bucket_path = std::env::var("BUCKET_USERIMAGES")
            .unwrap_or_else(|_| "accounts-dev/acct-user-images".to_string());
        Self::new(bucket_path)
    }

    /// Bucket name: everything after the first `/` of the bucket path.
    pub fn bucket(&self) -> &str {
        self.bucket_path
            .split_once('/')
            .map(|(_, tail)| tail)
            .unwrap_or(&self.bucket_path)
    }

    /// Placeholder picture assigned to accounts created without one.
    pub fn default_picture(&self) -> String {
        format!("{}/User.png", self.bucket())
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PictureStoreError {
    #[error("Malformed picture path")]
    MalformedPath,

    #[error("Access denied")]
    AccessDenied,

    #[error("Bucket not found")]
    BucketNotFound,

    #[error("Infrastructure error occurred")]
    Infrastructure,
}

// ============================================================================
// Port
// ============================================================================

/// Resolves a stored `<bucket>/<object>` picture path to a URL a client can
/// actually fetch. Implementations talk to the object storage service; the
/// application layer never sees storage credentials or SDK types.
#[async_trait]
pub trait PictureStore: Send + Sync {
    async fn resolve_url(&self, picture_path: &str) -> Result<String, PictureStoreError>;
}
