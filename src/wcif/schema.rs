//! Event list schema validation
//!
//! Validates an untrusted WCIF events payload against the embedded JSON
//! Schema, then checks what the schema language cannot express (distinct
//! event ids). Every failure is reported with a JSON pointer to the offending
//! value.

use crate::error::{ConfigError, FieldError};
use jsonschema::Draft;
use serde_json::Value;
use std::collections::HashSet;

/// Embedded schema for the `PUT .../wcif/events` payload
const WCIF_EVENTS_SCHEMA_JSON: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/schemas/wcif_events.schema.json"
));

/// Upper bound on reported schema errors
const MAX_ERRORS: usize = 20;

/// Compiled validator for WCIF event lists
#[derive(Debug)]
pub struct EventListSchema {
    validator: jsonschema::Validator,
}

impl EventListSchema {
    /// Compile the embedded schema
    pub fn new() -> Result<Self, ConfigError> {
        let schema: Value =
            serde_json::from_str(WCIF_EVENTS_SCHEMA_JSON).map_err(|e| ConfigError::Invalid {
                message: format!("failed to parse embedded WCIF events schema: {e}"),
            })?;
        Self::from_schema(&schema)
    }

    /// Compile a caller-supplied schema (Draft 2020-12)
    pub fn from_schema(schema: &Value) -> Result<Self, ConfigError> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(schema)
            .map_err(|e| ConfigError::Invalid {
                message: format!("failed to compile WCIF events schema: {e}"),
            })?;
        Ok(Self { validator })
    }

    /// Validate a payload, collecting field-level errors
    pub fn validate(&self, payload: &Value) -> Result<(), Vec<FieldError>> {
        let mut errors: Vec<FieldError> = self
            .validator
            .iter_errors(payload)
            .take(MAX_ERRORS)
            .map(|e| FieldError::new(e.instance_path().to_string(), e.to_string()))
            .collect();

        errors.extend(duplicate_event_ids(payload));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Report every event whose id already appeared earlier in the list
fn duplicate_event_ids(payload: &Value) -> Vec<FieldError> {
    let Some(items) = payload.as_array() else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let id = item.get("id")?.as_str()?;
            if seen.insert(id) {
                None
            } else {
                Some(FieldError::new(
                    format!("/{}/id", i),
                    format!("duplicate event id '{}'", id),
                ))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn schema() -> EventListSchema {
        EventListSchema::new().expect("embedded schema should compile")
    }

    #[test]
    fn test_minimal_events_valid() {
        assert!(schema().validate(&json!([{"id": "333"}, {"id": "444"}])).is_ok());
    }

    #[test]
    fn test_empty_list_valid() {
        assert!(schema().validate(&json!([])).is_ok());
    }

    #[test]
    fn test_not_an_array() {
        let errors = schema().validate(&json!({"id": "333"})).unwrap_err();
        assert_eq!(errors[0].path, "");
    }

    #[test]
    fn test_missing_id() {
        let errors = schema().validate(&json!([{"rounds": []}])).unwrap_err();
        assert!(errors.iter().any(|e| e.path == "/0"));
    }

    #[test]
    fn test_bad_round_format() {
        let payload = json!([{"id": "333", "rounds": [{"id": "333-r1", "format": "x"}]}]);
        let errors = schema().validate(&payload).unwrap_err();
        assert!(errors.iter().any(|e| e.path == "/0/rounds/0/format"));
    }

    #[test]
    fn test_unknown_property_rejected() {
        let payload = json!([{"id": "333", "venue": "Hall A"}]);
        assert!(schema().validate(&payload).is_err());
    }

    #[rstest]
    #[case::negative_limit(json!([{"id": "333"}, {"id": "444", "competitorLimit": -1}]), "/1/competitorLimit")]
    #[case::zero_limit(json!([{"id": "333", "competitorLimit": 0}]), "/0/competitorLimit")]
    #[case::huge_time_limit(
        json!([{"id": "333", "rounds": [{"id": "333-r1", "format": "a", "timeLimit": {"centiseconds": 5_000_000_000u64}}]}]),
        "/0/rounds/0/timeLimit/centiseconds"
    )]
    #[case::huge_ranking_level(
        json!([{"id": "333", "rounds": [{"id": "333-r1", "format": "a", "advancementCondition": {"type": "ranking", "level": 5_000_000_000u64}}]}]),
        "/0/rounds/0/advancementCondition/level"
    )]
    #[case::zero_scramble_sets(
        json!([{"id": "333", "rounds": [{"id": "333-r1", "format": "a", "scrambleSetCount": 0}]}]),
        "/0/rounds/0/scrambleSetCount"
    )]
    fn test_out_of_range_integers_point_at_field(#[case] payload: Value, #[case] path: &str) {
        let errors = schema().validate(&payload).unwrap_err();
        assert!(
            errors.iter().any(|e| e.path == path),
            "expected an error at {path}, got {errors:?}"
        );
    }

    #[test]
    fn test_nullable_round_fields_accept_null() {
        let payload = json!([{"id": "333", "rounds": [{
            "id": "333-r1",
            "format": "a",
            "timeLimit": null,
            "cutoff": null,
            "advancementCondition": null
        }]}]);
        assert!(schema().validate(&payload).is_ok());
    }

    #[test]
    fn test_attempt_result_level_allows_large_values() {
        let payload = json!([{"id": "333", "rounds": [{
            "id": "333-r1",
            "format": "a",
            "advancementCondition": {"type": "attemptResult", "level": 5_000_000_000u64}
        }]}]);
        assert!(schema().validate(&payload).is_ok());
    }

    #[test]
    fn test_duplicate_ids_reported_with_path() {
        let payload = json!([
            {"id": "333", "competitorLimit": 10},
            {"id": "444"},
            {"id": "333", "competitorLimit": 20}
        ]);
        let errors = schema().validate(&payload).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "/2/id");
        assert!(errors[0].message.contains("333"));
    }

    #[test]
    fn test_identical_duplicates_rejected() {
        let errors = schema()
            .validate(&json!([{"id": "333"}, {"id": "333"}]))
            .unwrap_err();
        assert!(errors.iter().any(|e| e.path == "/1/id"));
    }
}
