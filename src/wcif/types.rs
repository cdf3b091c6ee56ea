//! WCIF wire types
//!
//! Serde shapes of the WCA Competition Interchange Format, restricted to what
//! this service reads and writes.

use crate::competition::{AdvancementCondition, Cutoff, TimeLimit};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// WCIF format version emitted by the projection
pub const WCIF_FORMAT_VERSION: &str = "1.0";

fn default_scramble_set_count() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WcifEvent {
    pub id: String,
    #[serde(default)]
    pub rounds: Option<Vec<WcifRound>>,
    #[serde(default)]
    pub competitor_limit: Option<u32>,
    #[serde(default)]
    pub qualification: Option<Value>,
    #[serde(default)]
    pub extensions: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WcifRound {
    pub id: String,
    pub format: String,
    #[serde(default)]
    pub time_limit: Option<TimeLimit>,
    #[serde(default)]
    pub cutoff: Option<Cutoff>,
    #[serde(default)]
    pub advancement_condition: Option<AdvancementCondition>,
    #[serde(default = "default_scramble_set_count")]
    pub scramble_set_count: u32,
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default)]
    pub extensions: Vec<Value>,
}

/// Full WCIF document for one competition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WcifCompetition {
    pub format_version: &'static str,
    pub id: String,
    pub name: String,
    pub persons: Vec<WcifPerson>,
    pub events: Vec<WcifEvent>,
    pub extensions: Vec<Value>,
}

/// Staff member of a competition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WcifPerson {
    pub wca_user_id: u64,
    pub roles: Vec<&'static str>,
}

/// Public summary of a competition, as listed by the catalog endpoints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitionSummary {
    pub id: String,
    pub name: String,
    pub visible: bool,
    pub event_ids: Vec<&'static str>,
    pub delegates: Vec<u64>,
    pub organizers: Vec<u64>,
}
