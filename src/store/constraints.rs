//! Commit-time event constraints
//!
//! Checks applied to a complete replacement event set before it becomes
//! visible. These span records (round numbering, cumulative time limits)
//! and so cannot be expressed in the payload schema.

use crate::competition::{Event, Round};
use crate::error::StoreError;
use std::collections::HashSet;

/// Validate a replacement event set, reporting the first violation
pub fn validate_events(events: &[Event]) -> Result<(), StoreError> {
    let all_round_ids: HashSet<&str> = events
        .iter()
        .flat_map(|e| e.rounds.iter().map(|r| r.id.as_str()))
        .collect();

    for event in events {
        if event.competitor_limit == Some(0) {
            return Err(StoreError::Rejected(format!(
                "{}: competitor limit must be greater than 0",
                event.event_type
            )));
        }

        for (index, round) in event.rounds.iter().enumerate() {
            check_round_id(event, index, round)?;
            check_round_rules(event, round)?;

            for referenced in round
                .time_limit
                .iter()
                .flat_map(|t| t.cumulative_round_ids.iter())
            {
                if !all_round_ids.contains(referenced.as_str()) {
                    return Err(StoreError::Rejected(format!(
                        "{}: cumulative time limit references unknown round '{}'",
                        round.id, referenced
                    )));
                }
            }
        }

        if let Some(last) = event.rounds.last()
            && last.advancement_condition.is_some()
        {
            return Err(StoreError::Rejected(format!(
                "{}: the final round cannot have an advancement condition",
                last.id
            )));
        }
    }

    Ok(())
}

/// Round ids are exactly `<event id>-r<round number>`, numbered from 1
fn check_round_id(event: &Event, index: usize, round: &Round) -> Result<(), StoreError> {
    let expected = format!("{}-r{}", event.event_type, index + 1);

    if round.id == expected {
        Ok(())
    } else {
        Err(StoreError::Rejected(format!(
            "round id '{}' should be '{}'",
            round.id, expected
        )))
    }
}

fn check_round_rules(event: &Event, round: &Round) -> Result<(), StoreError> {
    if !event.event_type.allowed_formats().contains(&round.format) {
        return Err(StoreError::Rejected(format!(
            "{}: format '{}' is not allowed for {}",
            round.id, round.format, event.event_type
        )));
    }

    if let Some(cutoff) = &round.cutoff
        && cutoff.number_of_attempts >= round.format.expected_solve_count()
    {
        return Err(StoreError::Rejected(format!(
            "{}: cutoff must use fewer than {} attempts",
            round.id,
            round.format.expected_solve_count()
        )));
    }

    Ok(())
}
