//! Store seeding from a JSON file
//!
//! The seed file is an array of competitions whose `events` use the WCIF
//! wire format. Seeded events pass the same schema, conversion and
//! constraint checks as an API replacement.

use crate::competition::{Competition, OwnerRelation, Visibility};
use crate::error::{StoreError, SyncError};
use crate::store::CompetitionStore;
use crate::wcif::{EventListSchema, events_from_wcif};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::info;

fn empty_events() -> Value {
    Value::Array(Vec::new())
}

/// One competition entry of a seed file
#[derive(Debug, Clone, Deserialize)]
pub struct SeedCompetition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub owners: Vec<OwnerRelation>,
    #[serde(default = "empty_events")]
    pub events: Value,
}

impl SeedCompetition {
    /// Validate the wire events and build the domain competition
    pub fn into_competition(self, schema: &EventListSchema) -> Result<Competition, StoreError> {
        let seed_error = |e: SyncError| StoreError::Seed(format!("{}: {}", self.id, e));

        schema
            .validate(&self.events)
            .map_err(|errors| seed_error(SyncError::SchemaInvalid(errors)))?;
        let events = events_from_wcif(&self.events).map_err(seed_error)?;

        let mut competition = Competition::new(self.id.clone(), self.name.clone())
            .with_visibility(self.visibility)
            .with_events(events);
        competition.owners = self.owners;
        Ok(competition)
    }
}

/// Parse seed file contents
pub fn parse_seed(contents: &str) -> Result<Vec<SeedCompetition>, StoreError> {
    serde_json::from_str(contents).map_err(|e| StoreError::Seed(e.to_string()))
}

/// Load every competition from `path` into `store`
///
/// Returns the number of competitions inserted. Stops at the first invalid
/// entry; entries before it stay inserted.
pub async fn seed_store(
    store: &dyn CompetitionStore,
    schema: &EventListSchema,
    path: &Path,
) -> Result<usize, StoreError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| StoreError::Seed(format!("{}: {}", path.display(), e)))?;

    let entries = parse_seed(&contents)?;
    let count = entries.len();

    for entry in entries {
        let competition = entry.into_competition(schema)?;
        store.insert(competition).await?;
    }

    info!(path = %path.display(), count, "Seeded competition store");
    Ok(count)
}
