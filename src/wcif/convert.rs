//! Conversion between WCIF wire records and domain events

use crate::competition::{Event, EventType, Round, RoundFormat};
use crate::error::{FieldError, SyncError, SyncResult};
use crate::wcif::types::{WcifEvent, WcifRound};
use serde_json::Value;

/// Convert a schema-valid payload into domain events
///
/// Fails fast on the first unknown event id. The schema bounds every integer
/// to its domain type, so a deserialization failure here only happens for
/// payloads that skipped validation and is reported against the root.
pub fn events_from_wcif(payload: &Value) -> SyncResult<Vec<Event>> {
    let records: Vec<WcifEvent> = serde_json::from_value(payload.clone())
        .map_err(|e| SyncError::SchemaInvalid(vec![FieldError::new("", e.to_string())]))?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| event_from_wcif(index, record))
        .collect()
}

fn event_from_wcif(index: usize, record: WcifEvent) -> SyncResult<Event> {
    let event_type =
        EventType::try_parse(&record.id).ok_or(SyncError::UnknownEventType(record.id))?;

    let rounds = record
        .rounds
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(round_index, round)| round_from_wcif(index, round_index, round))
        .collect::<SyncResult<Vec<_>>>()?;

    Ok(Event {
        event_type,
        rounds,
        competitor_limit: record.competitor_limit,
        qualification: record.qualification,
        extensions: record.extensions,
    })
}

fn round_from_wcif(event_index: usize, round_index: usize, round: WcifRound) -> SyncResult<Round> {
    let format = RoundFormat::try_parse(&round.format).ok_or_else(|| {
        SyncError::SchemaInvalid(vec![FieldError::new(
            format!("/{}/rounds/{}/format", event_index, round_index),
            format!("unknown round format '{}'", round.format),
        )])
    })?;

    Ok(Round {
        id: round.id,
        format,
        time_limit: round.time_limit,
        cutoff: round.cutoff,
        advancement_condition: round.advancement_condition,
        scramble_set_count: round.scramble_set_count,
        extensions: round.extensions,
    })
}

/// Project a domain event back onto the wire
pub fn event_to_wcif(event: &Event) -> WcifEvent {
    WcifEvent {
        id: event.event_type.as_str().to_string(),
        rounds: Some(event.rounds.iter().map(round_to_wcif).collect()),
        competitor_limit: event.competitor_limit,
        qualification: event.qualification.clone(),
        extensions: event.extensions.clone(),
    }
}

fn round_to_wcif(round: &Round) -> WcifRound {
    WcifRound {
        id: round.id.clone(),
        format: round.format.as_str().to_string(),
        time_limit: round.time_limit.clone(),
        cutoff: round.cutoff,
        advancement_condition: round.advancement_condition,
        scramble_set_count: round.scramble_set_count,
        results: Vec::new(),
        extensions: round.extensions.clone(),
    }
}
