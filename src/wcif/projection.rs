//! Read projections of a competition

use crate::competition::{Competition, OwnerRole};
use crate::wcif::convert::event_to_wcif;
use crate::wcif::types::{CompetitionSummary, WCIF_FORMAT_VERSION, WcifCompetition, WcifPerson};
use std::collections::BTreeMap;

/// Public summary used by listing and show endpoints
pub fn summary(competition: &Competition) -> CompetitionSummary {
    let ids = |role: OwnerRole| -> Vec<u64> {
        competition
            .users_with_role(role)
            .into_iter()
            .map(|u| u.0)
            .collect()
    };

    CompetitionSummary {
        id: competition.id.clone(),
        name: competition.name.clone(),
        visible: competition.visibility.is_visible(),
        event_ids: competition.event_ids(),
        delegates: ids(OwnerRole::Delegate),
        organizers: ids(OwnerRole::Organizer),
    }
}

/// Full WCIF document; only for callers who manage the competition
pub fn wcif(competition: &Competition) -> WcifCompetition {
    let mut persons: BTreeMap<u64, Vec<&'static str>> = BTreeMap::new();
    for owner in &competition.owners {
        persons
            .entry(owner.user_id.0)
            .or_default()
            .push(owner.role.as_str());
    }

    WcifCompetition {
        format_version: WCIF_FORMAT_VERSION,
        id: competition.id.clone(),
        name: competition.name.clone(),
        persons: persons
            .into_iter()
            .map(|(wca_user_id, roles)| WcifPerson { wca_user_id, roles })
            .collect(),
        events: competition.events.iter().map(event_to_wcif).collect(),
        extensions: Vec::new(),
    }
}
