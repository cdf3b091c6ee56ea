//! WCIF (WCA Competition Interchange Format) handling
//!
//! - [`schema`]: validation of untrusted event-list payloads
//! - [`convert`]: wire records to domain events and back
//! - [`sync`]: the atomic full-replace pipeline
//! - [`projection`]: summary and WCIF documents for responses

pub mod convert;
pub mod projection;
pub mod schema;
pub mod sync;
pub mod types;

pub use convert::{event_to_wcif, events_from_wcif};
pub use schema::EventListSchema;
pub use sync::{EventSyncEngine, SYNC_SUCCESS_STATUS};
pub use types::{CompetitionSummary, WcifCompetition, WcifEvent, WcifRound};
