//! Event and round types
//!
//! Domain representation of a competition's scheduled events. The WCIF wire
//! shapes live in [`crate::wcif::types`]; time limits, cutoffs and
//! advancement conditions share their representation with the wire format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Official event types a competition may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
    Cube3,
    Cube2,
    Cube4,
    Cube5,
    Cube6,
    Cube7,
    Blindfolded3,
    FewestMoves,
    OneHanded,
    Clock,
    Megaminx,
    Pyraminx,
    Skewb,
    Square1,
    Blindfolded4,
    Blindfolded5,
    MultiBlind,
}

impl EventType {
    /// Get the WCIF event id
    pub const fn as_str(&self) -> &'static str {
        match self {
            EventType::Cube3 => "333",
            EventType::Cube2 => "222",
            EventType::Cube4 => "444",
            EventType::Cube5 => "555",
            EventType::Cube6 => "666",
            EventType::Cube7 => "777",
            EventType::Blindfolded3 => "333bf",
            EventType::FewestMoves => "333fm",
            EventType::OneHanded => "333oh",
            EventType::Clock => "clock",
            EventType::Megaminx => "minx",
            EventType::Pyraminx => "pyram",
            EventType::Skewb => "skewb",
            EventType::Square1 => "sq1",
            EventType::Blindfolded4 => "444bf",
            EventType::Blindfolded5 => "555bf",
            EventType::MultiBlind => "333mbf",
        }
    }

    /// Try to parse an event type from its WCIF id
    pub fn try_parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|e| e.as_str() == s)
    }

    /// Get all event types
    pub const fn all() -> &'static [EventType] {
        &[
            EventType::Cube3,
            EventType::Cube2,
            EventType::Cube4,
            EventType::Cube5,
            EventType::Cube6,
            EventType::Cube7,
            EventType::Blindfolded3,
            EventType::FewestMoves,
            EventType::OneHanded,
            EventType::Clock,
            EventType::Megaminx,
            EventType::Pyraminx,
            EventType::Skewb,
            EventType::Square1,
            EventType::Blindfolded4,
            EventType::Blindfolded5,
            EventType::MultiBlind,
        ]
    }

    /// Round formats the regulations permit for this event
    pub const fn allowed_formats(&self) -> &'static [RoundFormat] {
        match self {
            EventType::Cube6 | EventType::Cube7 => &[
                RoundFormat::MeanOf3,
                RoundFormat::BestOf1,
                RoundFormat::BestOf2,
                RoundFormat::BestOf3,
            ],
            EventType::Blindfolded3 | EventType::Blindfolded4 | EventType::Blindfolded5 => &[
                RoundFormat::BestOf3,
                RoundFormat::BestOf1,
                RoundFormat::BestOf2,
            ],
            EventType::FewestMoves => &[
                RoundFormat::MeanOf3,
                RoundFormat::BestOf1,
                RoundFormat::BestOf2,
            ],
            EventType::MultiBlind => &[
                RoundFormat::BestOf1,
                RoundFormat::BestOf2,
                RoundFormat::BestOf3,
            ],
            _ => &[
                RoundFormat::AverageOf5,
                RoundFormat::BestOf1,
                RoundFormat::BestOf2,
                RoundFormat::BestOf3,
            ],
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Round format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundFormat {
    BestOf1,
    BestOf2,
    BestOf3,
    AverageOf5,
    MeanOf3,
}

impl RoundFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RoundFormat::BestOf1 => "1",
            RoundFormat::BestOf2 => "2",
            RoundFormat::BestOf3 => "3",
            RoundFormat::AverageOf5 => "a",
            RoundFormat::MeanOf3 => "m",
        }
    }

    pub fn try_parse(s: &str) -> Option<Self> {
        match s {
            "1" => Some(RoundFormat::BestOf1),
            "2" => Some(RoundFormat::BestOf2),
            "3" => Some(RoundFormat::BestOf3),
            "a" => Some(RoundFormat::AverageOf5),
            "m" => Some(RoundFormat::MeanOf3),
            _ => None,
        }
    }

    /// Number of attempts a competitor gets in a round of this format
    pub const fn expected_solve_count(&self) -> u8 {
        match self {
            RoundFormat::BestOf1 => 1,
            RoundFormat::BestOf2 => 2,
            RoundFormat::BestOf3 | RoundFormat::MeanOf3 => 3,
            RoundFormat::AverageOf5 => 5,
        }
    }
}

impl fmt::Display for RoundFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeLimit {
    pub centiseconds: u32,
    /// Rounds whose attempts share this limit; empty for a per-attempt limit
    #[serde(default)]
    pub cumulative_round_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cutoff {
    pub number_of_attempts: u8,
    pub attempt_result: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AdvancementCondition {
    Ranking { level: u32 },
    Percent { level: u32 },
    AttemptResult { level: i64 },
}

/// A single round of an event
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    /// WCIF round id, `<event>-r<number>`
    pub id: String,
    pub format: RoundFormat,
    pub time_limit: Option<TimeLimit>,
    pub cutoff: Option<Cutoff>,
    pub advancement_condition: Option<AdvancementCondition>,
    pub scramble_set_count: u32,
    pub extensions: Vec<serde_json::Value>,
}

impl Round {
    pub fn new(id: impl Into<String>, format: RoundFormat) -> Self {
        Self {
            id: id.into(),
            format,
            time_limit: None,
            cutoff: None,
            advancement_condition: None,
            scramble_set_count: 1,
            extensions: Vec::new(),
        }
    }
}

/// An event held at a competition
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub rounds: Vec<Round>,
    pub competitor_limit: Option<u32>,
    pub qualification: Option<serde_json::Value>,
    pub extensions: Vec<serde_json::Value>,
}

impl Event {
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            rounds: Vec::new(),
            competitor_limit: None,
            qualification: None,
            extensions: Vec::new(),
        }
    }

    pub fn with_rounds(mut self, rounds: Vec<Round>) -> Self {
        self.rounds = rounds;
        self
    }
}
