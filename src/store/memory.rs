//! In-memory competition store
//!
//! Each competition sits behind its own async mutex. A write clones the
//! committed value into a draft, mutates and validates the draft, and swaps
//! it in only on success, so a failed write leaves nothing behind.

use crate::competition::{Competition, Event};
use crate::error::StoreError;
use crate::store::{CompetitionStore, constraints, matches_query};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

type Slot = Arc<Mutex<Competition>>;

#[derive(Default)]
pub struct InMemoryStore {
    competitions: RwLock<BTreeMap<String, Slot>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored competitions
    pub async fn len(&self) -> usize {
        self.competitions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.competitions.read().await.is_empty()
    }

    /// Remove a competition, returning its last committed state
    ///
    /// Waits for any in-flight write on that competition to finish.
    pub async fn remove(&self, id: &str) -> Option<Competition> {
        let slot = self.competitions.write().await.remove(id)?;
        let competition = slot.lock().await.clone();
        Some(competition)
    }

    async fn slot(&self, id: &str) -> Option<Slot> {
        self.competitions.read().await.get(id).cloned()
    }

    /// Run `f` against a draft of one competition and commit it on success
    ///
    /// Writes to the same competition are serialized. Readers see either the
    /// state before or the state after, never the draft.
    pub async fn transact<T, F>(&self, id: &str, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Competition) -> Result<T, StoreError> + Send,
        T: Send,
    {
        let slot = self
            .slot(id)
            .await
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let mut committed = slot.lock().await;
        let mut draft = committed.clone();
        let output = f(&mut draft)?;
        *committed = draft;
        Ok(output)
    }
}

#[async_trait]
impl CompetitionStore for InMemoryStore {
    async fn find(&self, id: &str) -> Option<Competition> {
        let slot = self.slot(id).await?;
        let competition = slot.lock().await.clone();
        Some(competition)
    }

    async fn search(&self, query: Option<&str>) -> Vec<Competition> {
        let slots: Vec<Slot> = self.competitions.read().await.values().cloned().collect();

        let mut found = Vec::with_capacity(slots.len());
        for slot in slots {
            let competition = slot.lock().await.clone();
            if query.is_none_or(|q| matches_query(&competition, q)) {
                found.push(competition);
            }
        }
        found
    }

    async fn insert(&self, competition: Competition) -> Result<(), StoreError> {
        constraints::validate_events(&competition.events)?;

        let mut competitions = self.competitions.write().await;
        if competitions.contains_key(&competition.id) {
            return Err(StoreError::Duplicate(competition.id));
        }
        debug!(competition_id = %competition.id, "Inserting competition");
        competitions.insert(competition.id.clone(), Arc::new(Mutex::new(competition)));
        Ok(())
    }

    async fn replace_events(&self, id: &str, events: Vec<Event>) -> Result<(), StoreError> {
        self.transact(id, move |draft| {
            draft.events = events;
            constraints::validate_events(&draft.events)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::competition::{EventType, Round, RoundFormat};

    #[tokio::test]
    async fn test_find_and_insert() {
        let store = InMemoryStore::new();
        assert!(store.find("Open2024").await.is_none());

        store.insert(Competition::new("Open2024", "Open 2024")).await.unwrap();
        assert_eq!(store.find("Open2024").await.unwrap().name, "Open 2024");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_insert() {
        let store = InMemoryStore::new();
        store.insert(Competition::new("Open2024", "Open 2024")).await.unwrap();
        let err = store
            .insert(Competition::new("Open2024", "Other"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::Duplicate("Open2024".into()));
    }

    #[tokio::test]
    async fn test_search_sorted_and_filtered() {
        let store = InMemoryStore::new();
        for id in ["ZagrebOpen2024", "AachenOpen2024", "AachenWinter2024"] {
            store.insert(Competition::new(id, id)).await.unwrap();
        }

        let all: Vec<_> = store.search(None).await.into_iter().map(|c| c.id).collect();
        assert_eq!(all, vec!["AachenOpen2024", "AachenWinter2024", "ZagrebOpen2024"]);

        let open: Vec<_> = store
            .search(Some("open"))
            .await
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(open, vec!["AachenOpen2024", "ZagrebOpen2024"]);
    }

    #[tokio::test]
    async fn test_transact_rolls_back_on_error() {
        let store = InMemoryStore::new();
        store.insert(Competition::new("Open2024", "Open 2024")).await.unwrap();

        let result: Result<(), _> = store
            .transact("Open2024", |draft| {
                draft.name = "Changed".into();
                Err(StoreError::Rejected("nope".into()))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(store.find("Open2024").await.unwrap().name, "Open 2024");
    }

    #[tokio::test]
    async fn test_transact_missing() {
        let store = InMemoryStore::new();
        let err = store.transact("Gone", |_| Ok(())).await.unwrap_err();
        assert_eq!(err, StoreError::NotFound("Gone".into()));
    }

    #[tokio::test]
    async fn test_replace_events_validates() {
        let store = InMemoryStore::new();
        store.insert(Competition::new("Open2024", "Open 2024")).await.unwrap();

        let good = vec![
            Event::new(EventType::Cube3)
                .with_rounds(vec![Round::new("333-r1", RoundFormat::AverageOf5)]),
        ];
        store.replace_events("Open2024", good.clone()).await.unwrap();
        assert_eq!(store.find("Open2024").await.unwrap().events, good);

        let bad = vec![
            Event::new(EventType::Cube3)
                .with_rounds(vec![Round::new("333-r2", RoundFormat::AverageOf5)]),
        ];
        assert!(matches!(
            store.replace_events("Open2024", bad).await,
            Err(StoreError::Rejected(_))
        ));
        assert_eq!(store.find("Open2024").await.unwrap().events, good);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = InMemoryStore::new();
        store.insert(Competition::new("Open2024", "Open 2024")).await.unwrap();
        assert!(store.remove("Open2024").await.is_some());
        assert!(store.is_empty().await);
        assert!(store.remove("Open2024").await.is_none());
    }
}
