//! Coalition value oracle
//!
//! The characteristic function of the attribution game: a coalition is worth
//! the summed value of every event it fully covers.

use mta_core::{ContributionSet, Touchpoint, TouchpointSet, Value, value};

/// Total value of the events whose touchpoints are all members of `coalition`
///
/// The test is `event ⊆ coalition`. An event without touchpoints is contained
/// in every coalition, the empty one included, so its value shows up in every
/// coalition total and cancels out of every marginal contribution.
pub fn coalition_value(coalition: &TouchpointSet, events: &[ContributionSet]) -> Value {
    events
        .iter()
        .filter(|event| event.touchpoints().is_subset(coalition))
        .fold(value::zero(), |total, event| total + event.value())
}

/// The coalition selected by `mask` over `members`
///
/// Bit `j` of `mask` selects `members[j]`.
pub fn coalition_from_mask(members: &[Touchpoint], mask: u64) -> TouchpointSet {
    members
        .iter()
        .enumerate()
        .filter(|(j, _)| mask & (1u64 << j) != 0)
        .map(|(_, touchpoint)| touchpoint.clone())
        .collect()
}
