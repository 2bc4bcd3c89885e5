use crate::service::RegistryService;
use burrow_core::{ClickEvent, Clock, RegistryError, Result, Store};
use burrow_generator::Generator;
use tracing::{debug, error, warn};

/// Click source used by the redirect flow.
pub const DIRECT_ACCESS: &str = "direct_access";

impl<S: Store, G: Generator, C: Clock> RegistryService<S, G, C> {
    /// Appends a click to `shortcode` and persists it, returning the event.
    ///
    /// The code must belong to a record, but expiry is not re-checked: a
    /// caller that resolved the code moments ago may still record the visit.
    /// A record without a click list gets one on demand.
    pub async fn append_click(
        &self,
        shortcode: &str,
        source: &str,
        client_signature: &str,
    ) -> Result<ClickEvent> {
        let mut state = self.state.lock().await;

        let Some(code) = state.record(shortcode).map(|record| record.shortcode.clone()) else {
            return Err(RegistryError::NotFound(shortcode.to_string()));
        };

        let event = ClickEvent::new(self.clock.now(), source, client_signature);

        let created_list = !state.snapshot.clicks.contains_key(shortcode);
        if created_list {
            warn!(shortcode, "record has no click list, creating one");
        }
        state
            .snapshot
            .clicks
            .entry(code)
            .or_default()
            .push(event.clone());

        if let Err(e) = self.store.save(&state.snapshot).await {
            if created_list {
                state.snapshot.clicks.remove(shortcode);
            } else if let Some(clicks) = state.snapshot.clicks.get_mut(shortcode) {
                clicks.pop();
            }
            error!(shortcode, error = %e, "failed to persist click, rolled back");
            return Err(RegistryError::PersistenceFailure(e));
        }

        debug!(
            shortcode,
            source,
            location = %event.location,
            "click recorded"
        );
        Ok(event)
    }
}
