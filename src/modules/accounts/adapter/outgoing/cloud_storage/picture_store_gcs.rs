use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::modules::accounts::application::ports::outgoing::picture_store::{
    PictureStore, PictureStoreError,
};

/// TTL for signed picture URLs.
const SIGNED_URL_TTL: Duration = Duration::from_secs(15 * 60);

/// google-cloud-storage uses a bucket resource name format:
/// `projects/_/buckets/{bucket}`
///
/// Keeping this here makes it hard to accidentally pass a raw bucket name.
fn bucket_resource(bucket: &str) -> String {
    format!("projects/_/buckets/{}", bucket)
}

/// Stored pictures are `<bucket>/<object>` paths.
fn split_picture_path(picture_path: &str) -> Result<(&str, &str), PictureStoreError> {
    match picture_path.split_once('/') {
        Some((bucket, object)) if !bucket.is_empty() && !object.is_empty() => Ok((bucket, object)),
        _ => Err(PictureStoreError::MalformedPath),
    }
}

fn map_sign_error(msg: &str) -> PictureStoreError {
    let m = msg.to_lowercase();

    if m.contains("permission") || m.contains("forbidden") || m.contains("denied") {
        PictureStoreError::AccessDenied
    } else if m.contains("bucket") && (m.contains("not found") || m.contains("404")) {
        PictureStoreError::BucketNotFound
    } else {
        PictureStoreError::Infrastructure
    }
}

/// Internal seam to make the adapter testable without mocking
/// google-cloud-storage types.
///
/// Tests implement this trait with a fake client.
#[async_trait]
trait GcsClient: Send + Sync {
    async fn sign_get_url(
        &self,
        bucket_resource: &str,
        object_name: &str,
        ttl: Duration,
    ) -> Result<String, String>;
}

#[cfg(test)]
struct ArcGcsClient(Arc<dyn GcsClient>);

#[cfg(test)]
#[async_trait]
impl GcsClient for ArcGcsClient {
    async fn sign_get_url(
        &self,
        bucket_resource: &str,
        object_name: &str,
        ttl: Duration,
    ) -> Result<String, String> {
        self.0.sign_get_url(bucket_resource, object_name, ttl).await
    }
}

/// Production adapter: implements the PictureStore port.
#[derive(Clone)]
pub struct GcsPictureStore {
    client: Arc<OnceCell<Box<dyn GcsClient>>>,
    signed_url_ttl: Duration,
}

impl GcsPictureStore {
    /// Synchronous constructor - client is initialized lazily on first use.
    pub fn new() -> Self {
        Self {
            client: Arc::new(OnceCell::new()),
            signed_url_ttl: SIGNED_URL_TTL,
        }
    }

    /// Get or initialize the GCS client.
    async fn get_client(&self) -> Result<&dyn GcsClient, Box<dyn std::error::Error + Send + Sync>> {
        self.client
            .get_or_try_init(|| async {
                let real_client = RealGcsClient::new().await?;
                Ok(Box::new(real_client) as Box<dyn GcsClient>)
            })
            .await
            .map(|boxed| &**boxed)
    }

    /// Test-friendly constructor with pre-initialized client.
    #[cfg(test)]
    fn with_client(client: Arc<dyn GcsClient>, signed_url_ttl: Duration) -> Self {
        let once = OnceCell::new();
        let _ = once.set(Box::new(ArcGcsClient(client)) as Box<dyn GcsClient>);

        Self {
            client: Arc::new(once),
            signed_url_ttl,
        }
    }
}

impl Default for GcsPictureStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PictureStore for GcsPictureStore {
    async fn resolve_url(&self, picture_path: &str) -> Result<String, PictureStoreError> {
        let (bucket, object) = split_picture_path(picture_path)?;

        let client = self
            .get_client()
            .await
            .map_err(|_| PictureStoreError::Infrastructure)?;

        client
            .sign_get_url(&bucket_resource(bucket), object, self.signed_url_ttl)
            .await
            .map_err(|e| map_sign_error(&e))
    }
}

// ============================================================================
// Real Google Cloud Storage client (google-cloud-storage)
// ============================================================================

struct RealGcsClient {
    signer: google_cloud_auth::signer::Signer,
}

impl RealGcsClient {
    async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!("Initializing GCS signer...");

        let signer = google_cloud_auth::credentials::Builder::default()
            .build_signer()
            .map_err(|e| {
                let msg = e.to_string();
                tracing::error!("Failed to build GCS signer: {:?}", e);

                if msg.contains("authorized_user") {
                    tracing::error!(
                        "Signed URLs require a service account key. \
                         Set GOOGLE_APPLICATION_CREDENTIALS to a service-account JSON (type=service_account)."
                    );
                }

                e
            })?;

        tracing::info!("GCS signer created successfully");

        Ok(Self { signer })
    }
}

#[async_trait]
impl GcsClient for RealGcsClient {
    async fn sign_get_url(
        &self,
        bucket_resource: &str,
        object_name: &str,
        ttl: Duration,
    ) -> Result<String, String> {
        let url = google_cloud_storage::builder::storage::SignedUrlBuilder::for_object(
            bucket_resource.to_string(),
            object_name.to_string(),
        )
        .with_method(google_cloud_storage::http::Method::GET)
        .with_expiration(ttl)
        .sign_with(&self.signer)
        .await
        .map_err(|e| e.to_string())?;

        Ok(url)
    }
}
