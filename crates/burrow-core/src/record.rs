use crate::client::ClientKind;
use crate::shortcode::ShortCode;
use crate::validity::ValidityMinutes;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// Opaque identifier assigned to a record at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored URL record.
///
/// Every field is fixed at creation. Expiry is a predicate over
/// `expires_at`; an expired record is never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub id: RecordId,
    /// The absolute URL that was shortened.
    pub original_url: String,
    pub shortcode: ShortCode,
    pub created_at: Timestamp,
    /// `created_at + validity_minutes`, computed once.
    pub expires_at: Timestamp,
    pub validity_minutes: ValidityMinutes,
}

impl UrlRecord {
    pub fn new(
        original_url: String,
        shortcode: ShortCode,
        created_at: Timestamp,
        validity: ValidityMinutes,
    ) -> Self {
        // Validity is capped at one year, far below the jiff timestamp range.
        let expires_at = created_at
            .checked_add(validity.as_duration())
            .unwrap_or(Timestamp::MAX);
        Self {
            id: RecordId::random(),
            original_url,
            shortcode,
            created_at,
            expires_at,
            validity_minutes: validity,
        }
    }

    /// Whether the record is expired at `now`.
    ///
    /// The comparison is strict: at exactly `expires_at` the record is still valid.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }
}

/// A single recorded visit against a short code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub timestamp: Timestamp,
    /// Origin tag such as `direct_access` or `statistics_page`.
    pub source: String,
    /// Coarse descriptor derived from `client_signature`. Best effort only.
    pub location: String,
    pub client_signature: String,
}

impl ClickEvent {
    pub fn new(
        timestamp: Timestamp,
        source: impl Into<String>,
        client_signature: impl Into<String>,
    ) -> Self {
        let client_signature = client_signature.into();
        Self {
            timestamp,
            source: source.into(),
            location: ClientKind::classify(&client_signature).label().to_string(),
            client_signature,
        }
    }
}

/// A freshly created record together with its display URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortenedUrl {
    #[serde(flatten)]
    pub record: UrlRecord,
    pub short_url: String,
}

/// A record decorated with its click history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlStats {
    pub record: UrlRecord,
    pub short_url: String,
    pub clicks: Vec<ClickEvent>,
}

impl UrlStats {
    /// Number of clicks. Always derived from `clicks`.
    pub fn click_count(&self) -> usize {
        self.clicks.len()
    }
}

impl Serialize for UrlStats {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        struct View<'a> {
            #[serde(flatten)]
            record: &'a UrlRecord,
            short_url: &'a str,
            click_count: usize,
            clicks: &'a [ClickEvent],
        }

        View {
            record: &self.record,
            short_url: &self.short_url,
            click_count: self.click_count(),
            clicks: &self.clicks,
        }
        .serialize(serializer)
    }
}
