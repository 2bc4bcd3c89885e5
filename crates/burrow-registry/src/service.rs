use crate::settings::RegistrySettings;
use async_trait::async_trait;
use burrow_core::{
    ClickEvent, Clock, CreateParams, Registry, RegistryError, Result, ShortCode, ShortenedUrl,
    Snapshot, Store, SystemClock, UrlRecord, UrlStats, ValidityMinutes,
};
use burrow_generator::Generator;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// In-memory mirror of the durable state plus a short code index.
#[derive(Debug, Default)]
pub(crate) struct State {
    pub(crate) snapshot: Snapshot,
    index: HashMap<ShortCode, usize>,
}

impl State {
    fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        snapshot.validate()?;
        let index = snapshot
            .records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.shortcode.clone(), position))
            .collect();
        Ok(Self { snapshot, index })
    }

    pub(crate) fn record(&self, shortcode: &str) -> Option<&UrlRecord> {
        self.index
            .get(shortcode)
            .map(|&position| &self.snapshot.records[position])
    }

    fn contains(&self, shortcode: &str) -> bool {
        self.index.contains_key(shortcode)
    }

    /// Appends a record with an empty click list.
    ///
    /// Returns whatever click list was previously stored under the code so
    /// that [`State::rollback_insert`] can restore it.
    fn insert(&mut self, record: UrlRecord) -> Option<Vec<ClickEvent>> {
        let code = record.shortcode.clone();
        self.index.insert(code.clone(), self.snapshot.records.len());
        self.snapshot.records.push(record);
        self.snapshot.clicks.insert(code, Vec::new())
    }

    fn rollback_insert(&mut self, code: &ShortCode, previous_clicks: Option<Vec<ClickEvent>>) {
        self.snapshot.records.pop();
        self.index.remove(code);
        match previous_clicks {
            Some(clicks) => {
                self.snapshot.clicks.insert(code.clone(), clicks);
            }
            None => {
                self.snapshot.clicks.remove(code);
            }
        }
    }

    fn stats(&self, record: &UrlRecord, base_url: &str) -> UrlStats {
        UrlStats {
            record: record.clone(),
            short_url: record.shortcode.to_url(base_url),
            clicks: self
                .snapshot
                .clicks
                .get(&record.shortcode)
                .cloned()
                .unwrap_or_default(),
        }
    }
}

/// The registry: single owner of every [`UrlRecord`] and its clicks.
///
/// Wraps a [`Store`], a [`Generator`] and a [`Clock`]. All mutations hold one
/// lock across "check, append, save", so concurrent callers are serialized
/// and in-memory state never diverges from the last successful save.
pub struct RegistryService<S, G, C = SystemClock> {
    pub(crate) store: Arc<S>,
    generator: Arc<G>,
    pub(crate) clock: C,
    settings: RegistrySettings,
    pub(crate) state: Mutex<State>,
}

impl<S: Store, G: Generator> RegistryService<S, G, SystemClock> {
    /// Opens a registry over `store` using the system clock.
    pub async fn open(store: S, generator: G, settings: RegistrySettings) -> Result<Self> {
        Self::open_with_clock(store, generator, SystemClock, settings).await
    }
}

impl<S: Store, G: Generator, C: Clock> RegistryService<S, G, C> {
    /// Opens a registry over `store`, loading whatever it last saved.
    pub async fn open_with_clock(
        store: S,
        generator: G,
        clock: C,
        settings: RegistrySettings,
    ) -> Result<Self> {
        let snapshot = store.load().await?;
        let state = State::from_snapshot(snapshot)?;

        info!(
            records = state.snapshot.records.len(),
            base_url = %settings.base_url,
            "registry opened"
        );

        Ok(Self {
            store: Arc::new(store),
            generator: Arc::new(generator),
            clock,
            settings,
            state: Mutex::new(state),
        })
    }

    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    /// Validates that the URL parses as an absolute URL.
    fn validate_url(url: &str) -> Result<()> {
        url::Url::parse(url)
            .map(|_| ())
            .map_err(|e| RegistryError::InvalidUrl(format!("{}: {}", url, e)))
    }

    /// Draws from the generator until a code not held by any record appears.
    fn generate_unique(&self, state: &State) -> Result<ShortCode> {
        let attempts = self.settings.max_generation_attempts;
        for attempt in 1..=attempts {
            let candidate = self.generator.generate();
            if !state.contains(candidate.as_str()) {
                return Ok(candidate);
            }
            debug!(attempt, shortcode = %candidate, "generated short code is taken, retrying");
        }

        error!(attempts, "short code generation exhausted");
        Err(RegistryError::GenerationExhausted { attempts })
    }
}

#[async_trait]
impl<S: Store, G: Generator, C: Clock> Registry for RegistryService<S, G, C> {
    async fn create(&self, params: CreateParams) -> Result<ShortenedUrl> {
        // Everything that can be checked without the lock fails here, before
        // any state is touched.
        Self::validate_url(&params.original_url)?;
        let validity = match params.validity_minutes {
            Some(minutes) => ValidityMinutes::new(minutes)?,
            None => self.settings.default_validity,
        };
        // an empty custom code means "generate one"
        let custom = params
            .custom_shortcode
            .filter(|code| !code.is_empty())
            .map(ShortCode::new)
            .transpose()?;

        let mut state = self.state.lock().await;

        let shortcode = match custom {
            Some(code) => {
                if state.contains(code.as_str()) {
                    return Err(RegistryError::ShortcodeTaken(code.to_string()));
                }
                code
            }
            None => self.generate_unique(&state)?,
        };

        let record = UrlRecord::new(
            params.original_url,
            shortcode.clone(),
            self.clock.now(),
            validity,
        );
        let previous_clicks = state.insert(record.clone());

        if let Err(e) = self.store.save(&state.snapshot).await {
            state.rollback_insert(&shortcode, previous_clicks);
            error!(shortcode = %shortcode, error = %e, "failed to persist new record, rolled back");
            return Err(RegistryError::PersistenceFailure(e));
        }

        info!(
            shortcode = %shortcode,
            original_url = %record.original_url,
            expires_at = %record.expires_at,
            "short url created"
        );

        Ok(ShortenedUrl {
            short_url: shortcode.to_url(&self.settings.base_url),
            record,
        })
    }

    async fn resolve(&self, shortcode: &str) -> Result<Option<UrlRecord>> {
        let now = self.clock.now();
        let state = self.state.lock().await;

        let resolved = state
            .record(shortcode)
            .filter(|record| !record.is_expired_at(now))
            .cloned();

        debug!(shortcode, found = resolved.is_some(), "resolve");
        Ok(resolved)
    }

    async fn record_click(
        &self,
        shortcode: &str,
        source: &str,
        client_signature: &str,
    ) -> Result<()> {
        self.append_click(shortcode, source, client_signature)
            .await
            .map(|_| ())
    }

    async fn list_all(&self) -> Result<Vec<UrlStats>> {
        let state = self.state.lock().await;
        Ok(state
            .snapshot
            .records
            .iter()
            .map(|record| state.stats(record, &self.settings.base_url))
            .collect())
    }
}
