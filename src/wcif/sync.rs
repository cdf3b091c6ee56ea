//! WCIF event synchronization
//!
//! Replaces a competition's whole event set from an untrusted WCIF payload:
//! validate, convert, then commit under the store's per-competition lock.
//! Nothing is written unless every step succeeds.

use crate::competition::Event;
use crate::error::{SyncError, SyncResult};
use crate::store::CompetitionStore;
use crate::wcif::convert::events_from_wcif;
use crate::wcif::schema::EventListSchema;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Confirmation rendered after a successful replacement
pub const SYNC_SUCCESS_STATUS: &str = "Successfully saved WCIF events";

#[derive(Clone)]
pub struct EventSyncEngine {
    store: Arc<dyn CompetitionStore>,
    schema: Arc<EventListSchema>,
}

impl std::fmt::Debug for EventSyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSyncEngine").finish_non_exhaustive()
    }
}

impl EventSyncEngine {
    pub fn new(store: Arc<dyn CompetitionStore>, schema: Arc<EventListSchema>) -> Self {
        Self { store, schema }
    }

    /// Validate and convert a payload without touching the store
    pub fn prepare(&self, payload: &Value) -> SyncResult<Vec<Event>> {
        self.schema
            .validate(payload)
            .map_err(SyncError::SchemaInvalid)?;
        events_from_wcif(payload)
    }

    /// Replace every event of `competition_id` with the events in `payload`
    ///
    /// The caller must already have passed `require_manage` for this
    /// competition.
    #[instrument(skip(self, payload))]
    pub async fn replace_events(&self, competition_id: &str, payload: &Value) -> SyncResult<()> {
        let result = self.run(competition_id, payload).await;

        match &result {
            Ok(count) => info!(events = count, "Saved WCIF events"),
            Err(e) => warn!(error = %e, "Rejected WCIF events"),
        }

        result.map(|_| ())
    }

    async fn run(&self, competition_id: &str, payload: &Value) -> SyncResult<usize> {
        let events = self.prepare(payload)?;
        let count = events.len();
        self.store.replace_events(competition_id, events).await?;
        Ok(count)
    }
}
