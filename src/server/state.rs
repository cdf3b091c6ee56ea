//! Shared handler state

use crate::access_control::{AccessDecisionEngine, RoleOwnership};
use crate::auth::{PrincipalResolver, create_principal_resolver};
use crate::config::AppConfig;
use crate::store::CompetitionStore;
use crate::wcif::{EventListSchema, EventSyncEngine};
use std::sync::Arc;

/// Everything a request handler needs, cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub engine: AccessDecisionEngine,
    pub resolver: Arc<dyn PrincipalResolver>,
    pub store: Arc<dyn CompetitionStore>,
    pub sync: EventSyncEngine,
}

impl AppState {
    pub fn new(
        engine: AccessDecisionEngine,
        resolver: Arc<dyn PrincipalResolver>,
        store: Arc<dyn CompetitionStore>,
        schema: Arc<EventListSchema>,
    ) -> Self {
        let sync = EventSyncEngine::new(store.clone(), schema);
        Self {
            engine,
            resolver,
            store,
            sync,
        }
    }

    /// Wire up state from validated configuration over an existing store
    pub fn from_config(
        config: &AppConfig,
        store: Arc<dyn CompetitionStore>,
        schema: Arc<EventListSchema>,
    ) -> Self {
        let ownership = Arc::new(RoleOwnership::from_config(&config.access_control));
        let engine =
            AccessDecisionEngine::with_manage_scope(ownership, &config.access_control.manage_scope);
        let resolver: Arc<dyn PrincipalResolver> = Arc::from(create_principal_resolver(&config.auth));
        Self::new(engine, resolver, store, schema)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("engine", &self.engine)
            .field("resolver", &self.resolver.resolver_type())
            .finish_non_exhaustive()
    }
}
