use burrow_core::{Registry, Result, UrlRecord, UrlStats};
use jiff::Timestamp;
use serde::Serialize;
use std::sync::Arc;

/// Whether `record` is expired at `now`. Equality still counts as valid.
pub fn is_expired(record: &UrlRecord, now: Timestamp) -> bool {
    record.is_expired_at(now)
}

/// Aggregate counts over every record in a registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UrlSummary {
    pub total: usize,
    pub active: usize,
    pub expired: usize,
    pub total_clicks: usize,
}

/// Read-only reporting views over a [`Registry`].
pub struct QueryService<R: ?Sized> {
    registry: Arc<R>,
}

impl<R: ?Sized> Clone for QueryService<R> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<R: Registry + ?Sized> QueryService<R> {
    pub fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }

    /// Every record, expired included, with its clicks, in creation order.
    pub async fn get_all_with_stats(&self) -> Result<Vec<UrlStats>> {
        self.registry.list_all().await
    }

    /// Stats for one short code, whether or not it has expired.
    pub async fn find(&self, shortcode: &str) -> Result<Option<UrlStats>> {
        Ok(self
            .registry
            .list_all()
            .await?
            .into_iter()
            .find(|stats| stats.record.shortcode.as_str() == shortcode))
    }

    /// Counts active and expired records and all recorded clicks at `now`.
    pub async fn summary(&self, now: Timestamp) -> Result<UrlSummary> {
        let all = self.registry.list_all().await?;
        Ok(summarize(&all, now))
    }
}

fn summarize(all: &[UrlStats], now: Timestamp) -> UrlSummary {
    all.iter().fold(UrlSummary::default(), |mut summary, stats| {
        summary.total += 1;
        if is_expired(&stats.record, now) {
            summary.expired += 1;
        } else {
            summary.active += 1;
        }
        summary.total_clicks += stats.click_count();
        summary
    })
}
