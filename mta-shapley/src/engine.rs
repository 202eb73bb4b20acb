//! Exact Shapley-value engine
//!
//! For a target touchpoint `t` in a universe of `N` touchpoints:
//!
//! ```text
//! φ(t) = Σ_{S ⊆ U \ {t}}  |S|! (N - |S| - 1)! / N!  ·  (v(S ∪ {t}) - v(S))
//! ```
//!
//! where `v` is [`coalition_value`]. Every one of the `2^(N-1)` coalitions is
//! visited; nothing is sampled. Weights are ratios of arbitrary precision
//! factorials and the sum is an exact rational, so partial sums can be merged
//! in any order and the result does not depend on how the walk is split.
//!
//! Cost is `O(2^N · |events| · avg event size)` per target. The walk is
//! refused with [`ShapleyError::TooManyTouchpoints`] above
//! [`EngineConfig::max_touchpoints`].

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use rayon::prelude::*;
use tracing::{debug, instrument, warn};

use mta_core::{ContributionSet, Touchpoint, Value, all_touchpoints, value};

use crate::coalition::{coalition_from_mask, coalition_value};
use crate::config::EngineConfig;
use crate::error::{Result, ShapleyError};
use crate::powerset::{PowerSet, power_set_indices};

/// Universe size above which a walk is logged as expensive
const LARGE_UNIVERSE: usize = 20;

/// `n!` as an arbitrary precision integer
pub fn factorial(n: usize) -> BigUint {
    (2..=n as u64).fold(BigUint::one(), |acc, k| acc * k)
}

/// Shapley weight of a coalition of `coalition_size` others in a universe of
/// `universe_size` touchpoints
///
/// The probability that a uniformly random ordering of the universe places
/// exactly those others before the target. `None` unless
/// `coalition_size < universe_size`.
pub fn shapley_weight(coalition_size: usize, universe_size: usize) -> Option<Value> {
    let rest = universe_size.checked_sub(coalition_size)?.checked_sub(1)?;
    let numer = factorial(coalition_size) * factorial(rest);
    Some(Value::new(
        BigInt::from(numer),
        BigInt::from(factorial(universe_size)),
    ))
}

/// Weights for every coalition size `0..universe_size`, sharing one
/// factorial table
fn weight_table(universe_size: usize) -> Vec<Value> {
    let mut factorials = Vec::with_capacity(universe_size + 1);
    factorials.push(BigUint::one());
    for k in 1..=universe_size {
        let next = &factorials[k - 1] * BigUint::from(k);
        factorials.push(next);
    }

    let denom = BigInt::from(factorials[universe_size].clone());
    (0..universe_size)
        .map(|size| {
            let numer = &factorials[size] * &factorials[universe_size - size - 1];
            Value::new(BigInt::from(numer), denom.clone())
        })
        .collect()
}

/// Exact Shapley-value engine
pub struct ShapleyEngine {
    config: EngineConfig,
}

impl ShapleyEngine {
    /// Create with default configuration
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Create with custom configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Exact Shapley value of `touchpoint` over `events`
    ///
    /// The universe is every touchpoint seen in `events`. Fails if
    /// `touchpoint` is not part of it or if the universe exceeds the
    /// configured limit.
    #[instrument(
        name = "shapley::exact",
        skip_all,
        fields(touchpoint = %touchpoint, events = events.len())
    )]
    pub fn shapley_value(
        &self,
        touchpoint: &Touchpoint,
        events: &[ContributionSet],
    ) -> Result<Value> {
        let universe = all_touchpoints(events);
        let walk = CoalitionWalk::prepare(touchpoint, universe, events, &self.config)?;

        if walk.universe_size() > LARGE_UNIVERSE {
            warn!(
                universe = walk.universe_size(),
                coalitions = walk.coalition_count(),
                "Exact Shapley walk over a large universe"
            );
        }

        let parallel = self.config.runs_parallel(walk.others.len());
        debug!(
            universe = walk.universe_size(),
            coalitions = walk.coalition_count(),
            parallel,
            "Enumerating coalitions"
        );

        if parallel {
            walk.sum_parallel()
        } else {
            walk.sum_sequential()
        }
    }
}

impl Default for ShapleyEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Exact Shapley value with the default engine configuration
pub fn shapley_value(touchpoint: &Touchpoint, events: &[ContributionSet]) -> Result<Value> {
    ShapleyEngine::new().shapley_value(touchpoint, events)
}

/// One target's walk over the coalitions of the other touchpoints
struct CoalitionWalk<'a> {
    target: &'a Touchpoint,
    others: Vec<Touchpoint>,
    coalitions: PowerSet,
    weights: Vec<Value>,
    events: &'a [ContributionSet],
}

impl<'a> CoalitionWalk<'a> {
    fn prepare(
        target: &'a Touchpoint,
        universe: Vec<Touchpoint>,
        events: &'a [ContributionSet],
        config: &EngineConfig,
    ) -> Result<Self> {
        if !universe.contains(target) {
            return Err(ShapleyError::UnknownTouchpoint(target.clone()));
        }

        let limit = config.touchpoint_limit();
        if universe.len() > limit {
            return Err(ShapleyError::TooManyTouchpoints {
                count: universe.len(),
                limit,
            });
        }

        let count = universe.len();
        let weights = weight_table(count);
        let others: Vec<Touchpoint> = universe.into_iter().filter(|t| t != target).collect();
        let coalitions = power_set_indices(others.len())
            .ok_or(ShapleyError::TooManyTouchpoints { count, limit })?;

        Ok(Self {
            target,
            others,
            coalitions,
            weights,
            events,
        })
    }

    fn universe_size(&self) -> usize {
        self.others.len() + 1
    }

    fn coalition_count(&self) -> u64 {
        self.coalitions.masks().end
    }

    /// Weighted marginal contribution of the target to coalition `mask`
    fn term(&self, mask: u64) -> Result<Value> {
        let mut coalition = coalition_from_mask(&self.others, mask);
        if coalition.contains(self.target) {
            return Err(ShapleyError::CoalitionInvariant(self.target.clone()));
        }

        let size = coalition.len();
        let without = coalition_value(&coalition, self.events);
        coalition.insert(self.target.clone());
        let with = coalition_value(&coalition, self.events);

        let marginal = with - without;
        if marginal.is_zero() {
            return Ok(value::zero());
        }
        Ok(&self.weights[size] * marginal)
    }

    fn sum_sequential(&self) -> Result<Value> {
        self.coalitions
            .masks()
            .try_fold(value::zero(), |total, mask| {
                self.term(mask).map(|term| total + term)
            })
    }

    fn sum_parallel(&self) -> Result<Value> {
        self.coalitions
            .masks()
            .into_par_iter()
            .map(|mask| self.term(mask))
            .try_reduce(value::zero, |a, b| Ok(a + b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mta_core::TouchpointSet;
    use mta_core::value::{from_integer, from_ratio};

    fn tp(name: &str) -> Touchpoint {
        Touchpoint::from(name)
    }

    fn event(names: &[&str], value: i64) -> ContributionSet {
        ContributionSet::new(
            names.iter().map(|n| tp(n)).collect::<TouchpointSet>(),
            from_integer(value),
        )
    }

    fn worked_example() -> Vec<ContributionSet> {
        vec![
            event(&["A"], 100),
            event(&["A", "B"], 200),
            event(&["A", "C"], 300),
        ]
    }

    fn sequential() -> ShapleyEngine {
        ShapleyEngine::with_config(EngineConfig {
            parallel: false,
            ..Default::default()
        })
    }

    fn always_parallel() -> ShapleyEngine {
        ShapleyEngine::with_config(EngineConfig {
            parallel: true,
            parallel_threshold: 0,
            ..Default::default()
        })
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), BigUint::one());
        assert_eq!(factorial(1), BigUint::one());
        assert_eq!(factorial(5), BigUint::from(120u32));
        // 21! overflows u64
        assert_eq!(factorial(21).to_string(), "51090942171709440000");
    }

    #[test]
    fn test_shapley_weight() {
        assert_eq!(shapley_weight(0, 1), Some(from_integer(1)));
        assert_eq!(shapley_weight(0, 3), Some(from_ratio(1, 3).unwrap()));
        assert_eq!(shapley_weight(1, 3), Some(from_ratio(1, 6).unwrap()));
        assert_eq!(shapley_weight(2, 3), Some(from_ratio(1, 3).unwrap()));
    }

    #[test]
    fn test_shapley_weight_needs_room_for_target() {
        assert_eq!(shapley_weight(0, 0), None);
        assert_eq!(shapley_weight(3, 3), None);
        assert_eq!(shapley_weight(5, 3), None);
    }

    #[test]
    fn test_weight_table_matches_shapley_weight() {
        let table = weight_table(6);
        assert_eq!(table.len(), 6);
        for (size, weight) in table.iter().enumerate() {
            assert_eq!(Some(weight), shapley_weight(size, 6).as_ref());
        }
    }

    #[test]
    fn test_weights_sum_to_one_over_all_coalitions() {
        // Σ_s C(n-1, s) · w(s) = 1
        let n = 7;
        let total = power_set_indices(n - 1)
            .unwrap()
            .filter_map(|subset| shapley_weight(subset.len(), n))
            .fold(value::zero(), |acc, w| acc + w);
        assert_eq!(total, from_integer(1));
    }

    #[test]
    fn test_single_event() {
        let events = vec![event(&["A"], 100)];
        assert_eq!(shapley_value(&tp("A"), &events).unwrap(), from_integer(100));
    }

    #[test]
    fn test_worked_example() {
        let events = worked_example();
        let engine = sequential();
        assert_eq!(engine.shapley_value(&tp("A"), &events).unwrap(), from_integer(350));
        assert_eq!(engine.shapley_value(&tp("B"), &events).unwrap(), from_integer(100));
        assert_eq!(engine.shapley_value(&tp("C"), &events).unwrap(), from_integer(150));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let events = worked_example();
        for name in ["A", "B", "C"] {
            assert_eq!(
                always_parallel().shapley_value(&tp(name), &events).unwrap(),
                sequential().shapley_value(&tp(name), &events).unwrap()
            );
        }
    }

    #[test]
    fn test_unknown_touchpoint_is_an_error() {
        let result = shapley_value(&tp("Z"), &worked_example());
        assert_eq!(result, Err(ShapleyError::UnknownTouchpoint(tp("Z"))));
    }

    #[test]
    fn test_empty_events_have_no_universe() {
        let result = shapley_value(&tp("A"), &[]);
        assert!(matches!(result, Err(ShapleyError::UnknownTouchpoint(_))));
    }

    #[test]
    fn test_universe_limit() {
        let engine = ShapleyEngine::with_config(EngineConfig {
            max_touchpoints: 2,
            ..Default::default()
        });
        let result = engine.shapley_value(&tp("A"), &worked_example());
        assert_eq!(
            result,
            Err(ShapleyError::TooManyTouchpoints { count: 3, limit: 2 })
        );
    }

    #[test]
    fn test_null_player_gets_zero() {
        // D only ever appears alongside A in a zero-valued event
        let mut events = worked_example();
        events.push(event(&["A", "D"], 0));
        assert_eq!(shapley_value(&tp("D"), &events).unwrap(), from_integer(0));
        assert_eq!(shapley_value(&tp("A"), &events).unwrap(), from_integer(350));
    }

    #[test]
    fn test_empty_event_is_never_credited() {
        let mut events = worked_example();
        events.push(event(&[], 1000));
        assert_eq!(shapley_value(&tp("A"), &events).unwrap(), from_integer(350));
    }

    #[test]
    fn test_symmetric_players_split_evenly() {
        let events = vec![event(&["A", "B"], 90)];
        assert_eq!(shapley_value(&tp("A"), &events).unwrap(), from_integer(45));
        assert_eq!(shapley_value(&tp("B"), &events).unwrap(), from_integer(45));
    }

    #[test]
    fn test_fractional_result_is_exact() {
        let events = vec![event(&["A", "B", "C"], 100)];
        assert_eq!(
            shapley_value(&tp("A"), &events).unwrap(),
            from_ratio(100, 3).unwrap()
        );
    }
}
