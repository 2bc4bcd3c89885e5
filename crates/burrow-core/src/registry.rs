use crate::error::Result;
use crate::record::{ShortenedUrl, UrlRecord, UrlStats};
use async_trait::async_trait;
use typed_builder::TypedBuilder;

/// Parameters for creating a short URL.
#[derive(Debug, Clone, TypedBuilder)]
pub struct CreateParams {
    /// The absolute URL to be shortened.
    #[builder(setter(into))]
    pub original_url: String,
    /// Optional caller-chosen short code; one is generated when absent.
    #[builder(default, setter(into, strip_option))]
    pub custom_shortcode: Option<String>,
    /// Minutes until expiry; the registry default applies when absent.
    #[builder(default, setter(strip_option))]
    pub validity_minutes: Option<u32>,
}

/// The four operations a registry exposes to its callers.
#[async_trait]
pub trait Registry: Send + Sync + 'static {
    /// Creates and persists a new record.
    async fn create(&self, params: CreateParams) -> Result<ShortenedUrl>;

    /// Looks up an active record.
    /// Returns `None` if the code does not exist or has expired.
    async fn resolve(&self, shortcode: &str) -> Result<Option<UrlRecord>>;

    /// Appends a click to an existing short code and persists it.
    /// Expiry is not checked.
    async fn record_click(&self, shortcode: &str, source: &str, client_signature: &str)
        -> Result<()>;

    /// Every record ever created, expired included, in creation order.
    async fn list_all(&self) -> Result<Vec<UrlStats>>;
}
