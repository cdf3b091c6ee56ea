//! Competition persistence
//!
//! The store owns every competition and serializes writes per competition.
//! Readers only ever observe committed states.

pub mod constraints;
pub mod memory;
pub mod seed;

pub use memory::InMemoryStore;
pub use seed::{SeedCompetition, seed_store};

use crate::competition::{Competition, Event};
use crate::error::StoreError;
use async_trait::async_trait;

/// Persistence seam used by the HTTP layer and the event sync engine
// async_trait required for dyn-compatibility with Arc<dyn CompetitionStore>
#[async_trait]
pub trait CompetitionStore: Send + Sync {
    /// Fetch a committed snapshot of one competition
    async fn find(&self, id: &str) -> Option<Competition>;

    /// Competitions matching every whitespace-separated word of `query`
    /// (case-insensitive, against id or name), ordered by id
    async fn search(&self, query: Option<&str>) -> Vec<Competition>;

    /// Add a new competition
    async fn insert(&self, competition: Competition) -> Result<(), StoreError>;

    /// Atomically replace a competition's whole event set
    async fn replace_events(&self, id: &str, events: Vec<Event>) -> Result<(), StoreError>;
}

/// Whether a competition matches a free-text query
pub fn matches_query(competition: &Competition, query: &str) -> bool {
    let id = competition.id.to_lowercase();
    let name = competition.name.to_lowercase();
    query.split_whitespace().all(|word| {
        let word = word.to_lowercase();
        id.contains(&word) || name.contains(&word)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_query() {
        let comp = Competition::new("BerlinOpen2024", "Berlin Open 2024");
        assert!(matches_query(&comp, "berlin"));
        assert!(matches_query(&comp, "OPEN 2024"));
        assert!(matches_query(&comp, "berlinopen"));
        assert!(!matches_query(&comp, "berlin winter"));
        assert!(matches_query(&comp, "   "));
    }
}
