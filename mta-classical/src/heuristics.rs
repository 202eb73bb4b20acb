//! Position-based and linear attribution
//!
//! Each rule walks the events once and credits the target with a share of
//! every event value. Shares are exact rationals so totals line up with the
//! Shapley engine.

use num_bigint::BigInt;

use mta_core::{Contribution, ContributionSet, Touchpoint, Value, value};

/// Summed value of the contributions whose path starts at `touchpoint`
pub fn first_touch_value(touchpoint: &Touchpoint, contributions: &[Contribution]) -> Value {
    contributions
        .iter()
        .filter(|contribution| contribution.first() == Some(touchpoint))
        .fold(value::zero(), |total, contribution| {
            total + contribution.value()
        })
}

/// Summed value of the contributions whose path ends at `touchpoint`
pub fn last_touch_value(touchpoint: &Touchpoint, contributions: &[Contribution]) -> Value {
    contributions
        .iter()
        .filter(|contribution| contribution.last() == Some(touchpoint))
        .fold(value::zero(), |total, contribution| {
            total + contribution.value()
        })
}

/// Linear value ignoring repetition
///
/// Every touchpoint of an event receives an equal share of its value. For
/// ordered paths, project them with [`Contribution::to_set`] first.
pub fn linear_value(touchpoint: &Touchpoint, contributions: &[ContributionSet]) -> Value {
    contributions
        .iter()
        .filter(|contribution| contribution.contains(touchpoint))
        .fold(value::zero(), |total, contribution| {
            let members = count(contribution.touchpoints().len());
            total + contribution.value() / members
        })
}

/// Linear value with repetition
///
/// A touchpoint that occurs `k` times on a path of length `n` receives `k / n`
/// of the event value.
pub fn repeated_linear_value(touchpoint: &Touchpoint, contributions: &[Contribution]) -> Value {
    contributions
        .iter()
        .filter_map(|contribution| {
            let occurrences = contribution.occurrences(touchpoint);
            (occurrences > 0).then(|| {
                contribution.value() * count(occurrences) / count(contribution.len())
            })
        })
        .fold(value::zero(), |total, share| total + share)
}

fn count(n: usize) -> Value {
    Value::from_integer(BigInt::from(n))
}
