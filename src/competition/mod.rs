//! Competition module
//!
//! The managed resource: a competition, its ownership relations and its
//! scheduled events.

pub mod event;
pub mod types;

pub use event::{AdvancementCondition, Cutoff, Event, EventType, Round, RoundFormat, TimeLimit};
pub use types::{Competition, OwnerRelation, OwnerRole, UserId, Visibility};
