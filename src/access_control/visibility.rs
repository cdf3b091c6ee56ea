//! Visibility gate

use crate::competition::Competition;

/// Decide whether a competition may be disclosed to a caller
///
/// Visible competitions are always disclosed. Hidden ones are disclosed
/// exactly when the caller can manage them.
pub fn is_disclosable(competition: &Competition, can_manage: bool) -> bool {
    competition.visibility.is_visible() || can_manage
}
