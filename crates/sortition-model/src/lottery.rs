// Copyright (c) 2026 The Sortition Developers.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Lotteries and Assignments
//!
//! A `Lottery<T>` is a validated probability distribution over ordered
//! keys. Construction clamps each probability into [0, 1] through the
//! tolerance context and checks the total is 1 within tolerance, so any
//! `Lottery` value in circulation is a genuine distribution.
//!
//! For one-sided matching the keys are complete `Assignment`s (an
//! injective map from agents to outcomes). A lottery over assignments
//! marginalizes into an `AssignmentLottery`, one outcome lottery per
//! agent, by summing assignment probabilities.

use crate::index::{AgentId, OutcomeId};
use sortition_core::tolerance::Tolerance;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while constructing lotteries and assignments.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LotteryError {
    /// A probability was outside [0, 1] beyond tolerance.
    #[error("probability {0} outside [0, 1] beyond tolerance")]
    ProbabilityOutOfRange(f64),
    /// The probabilities did not sum to 1 within tolerance.
    #[error("probabilities sum to {0}, expected 1")]
    TotalNotOne(f64),
    /// The same key appeared more than once.
    #[error("duplicate key in lottery or assignment")]
    DuplicateKey,
    /// Two agents were assigned the same outcome.
    #[error("outcome {0} assigned to more than one agent")]
    NotABijection(usize),
}

/// A probability distribution over ordered keys.
///
/// Probabilities are clamped into [0, 1] on construction, so
/// `probability` never returns a value outside the unit interval.
///
/// # Examples
///
/// ```rust
/// use sortition_core::tolerance::Tolerance;
/// use sortition_model::Lottery;
///
/// let lottery =
///     Lottery::new([("a", 0.25), ("b", 0.75)], &Tolerance::default()).unwrap();
/// assert_eq!(lottery.probability(&"a"), 0.25);
/// assert_eq!(lottery.probability(&"missing"), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lottery<T: Ord> {
    entries: BTreeMap<T, f64>,
}

impl<T: Ord> Lottery<T> {
    /// Validates the given key/probability pairs into a lottery.
    pub fn new(
        entries: impl IntoIterator<Item = (T, f64)>,
        tolerance: &Tolerance,
    ) -> Result<Self, LotteryError> {
        let mut validated = BTreeMap::new();
        let mut total = 0.0;
        for (key, probability) in entries {
            let probability = tolerance
                .check_bound(probability, 0.0, 1.0)
                .map_err(|_| LotteryError::ProbabilityOutOfRange(probability))?;
            total += probability;
            if validated.insert(key, probability).is_some() {
                return Err(LotteryError::DuplicateKey);
            }
        }
        if !tolerance.is_close(total, 1.0) {
            return Err(LotteryError::TotalNotOne(total));
        }
        Ok(Lottery { entries: validated })
    }

    /// Returns the probability of a key, zero if absent.
    #[inline]
    pub fn probability(&self, key: &T) -> f64 {
        self.entries.get(key).copied().unwrap_or(0.0)
    }

    /// Returns the number of keys, including zero-probability ones.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the lottery holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over keys and probabilities in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> + '_ {
        self.entries.iter().map(|(key, p)| (key, *p))
    }

    /// Sums the probabilities of all keys accepted by the predicate.
    pub fn mass_where(&self, mut predicate: impl FnMut(&T) -> bool) -> f64 {
        self.entries
            .iter()
            .filter(|(key, _)| predicate(key))
            .map(|(_, p)| *p)
            .sum()
    }
}

/// A complete deterministic assignment of outcomes to agents.
///
/// The map is injective: no outcome is held by two agents.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Assignment {
    map: BTreeMap<AgentId, OutcomeId>,
}

impl Assignment {
    /// Validates the given agent/outcome pairs into an assignment.
    pub fn new(
        pairs: impl IntoIterator<Item = (AgentId, OutcomeId)>,
    ) -> Result<Self, LotteryError> {
        let mut map = BTreeMap::new();
        let mut held = std::collections::BTreeSet::new();
        for (agent, outcome) in pairs {
            if !held.insert(outcome) {
                return Err(LotteryError::NotABijection(outcome.get()));
            }
            if map.insert(agent, outcome).is_some() {
                return Err(LotteryError::DuplicateKey);
            }
        }
        Ok(Assignment { map })
    }

    /// Returns the outcome assigned to an agent, if any.
    #[inline]
    pub fn outcome_for(&self, agent: AgentId) -> Option<OutcomeId> {
        self.map.get(&agent).copied()
    }

    /// Iterates over agent/outcome pairs in agent order.
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, OutcomeId)> + '_ {
        self.map.iter().map(|(agent, outcome)| (*agent, *outcome))
    }
}

/// Per-agent marginal outcome lotteries of a lottery over assignments.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentLottery {
    marginals: BTreeMap<AgentId, Lottery<OutcomeId>>,
}

impl AssignmentLottery {
    /// Marginalizes a lottery over complete assignments into one outcome
    /// lottery per agent.
    ///
    /// Every assignment in the support must cover the same agent set,
    /// otherwise some marginal fails the total-probability check.
    pub fn marginalize(
        lottery: &Lottery<Assignment>,
        tolerance: &Tolerance,
    ) -> Result<Self, LotteryError> {
        let mut sums: BTreeMap<AgentId, BTreeMap<OutcomeId, f64>> = BTreeMap::new();
        for (assignment, probability) in lottery.iter() {
            for (agent, outcome) in assignment.iter() {
                *sums.entry(agent).or_default().entry(outcome).or_insert(0.0) += probability;
            }
        }
        let mut marginals = BTreeMap::new();
        for (agent, outcome_sums) in sums {
            marginals.insert(agent, Lottery::new(outcome_sums, tolerance)?);
        }
        Ok(AssignmentLottery { marginals })
    }

    /// Returns the marginal lottery of an agent, if present.
    #[inline]
    pub fn marginal(&self, agent: AgentId) -> Option<&Lottery<OutcomeId>> {
        self.marginals.get(&agent)
    }

    /// Iterates over agents and their marginals in agent order.
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &Lottery<OutcomeId>)> + '_ {
        self.marginals.iter().map(|(agent, m)| (*agent, m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn o(i: usize) -> OutcomeId {
        OutcomeId::new(i)
    }

    fn a(i: usize) -> AgentId {
        AgentId::new(i)
    }

    #[test]
    fn test_valid_lottery() {
        let tolerance = Tolerance::default();
        let lottery = Lottery::new([(o(0), 0.5), (o(1), 0.5), (o(2), 0.0)], &tolerance).unwrap();
        assert_eq!(lottery.probability(&o(0)), 0.5);
        assert_eq!(lottery.probability(&o(2)), 0.0);
        assert_eq!(lottery.probability(&o(9)), 0.0);
        assert_eq!(lottery.len(), 3);
    }

    #[test]
    fn test_clamps_probabilities_within_tolerance() {
        let tolerance = Tolerance::default();
        let lottery = Lottery::new([(o(0), 1.0 + 1e-9), (o(1), -1e-9)], &tolerance).unwrap();
        assert_eq!(lottery.probability(&o(0)), 1.0);
        assert_eq!(lottery.probability(&o(1)), 0.0);
    }

    #[test]
    fn test_rejects_out_of_range_probability() {
        let tolerance = Tolerance::default();
        assert!(matches!(
            Lottery::new([(o(0), 1.5)], &tolerance),
            Err(LotteryError::ProbabilityOutOfRange(_))
        ));
    }

    #[test]
    fn test_rejects_wrong_total() {
        let tolerance = Tolerance::default();
        assert!(matches!(
            Lottery::new([(o(0), 0.5), (o(1), 0.4)], &tolerance),
            Err(LotteryError::TotalNotOne(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_key() {
        let tolerance = Tolerance::default();
        assert!(matches!(
            Lottery::new([(o(0), 0.5), (o(0), 0.5)], &tolerance),
            Err(LotteryError::DuplicateKey)
        ));
    }

    #[test]
    fn test_mass_where() {
        let tolerance = Tolerance::default();
        let lottery = Lottery::new([(o(0), 0.25), (o(1), 0.25), (o(2), 0.5)], &tolerance).unwrap();
        let mass = lottery.mass_where(|outcome| outcome.get() < 2);
        assert!((mass - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_assignment_rejects_shared_outcome() {
        assert!(matches!(
            Assignment::new([(a(0), o(1)), (a(1), o(1))]),
            Err(LotteryError::NotABijection(1))
        ));
    }

    #[test]
    fn test_assignment_rejects_duplicate_agent() {
        assert!(matches!(
            Assignment::new([(a(0), o(0)), (a(0), o(1))]),
            Err(LotteryError::DuplicateKey)
        ));
    }

    #[test]
    fn test_marginalization_sums_probabilities() {
        let tolerance = Tolerance::default();
        let first = Assignment::new([(a(0), o(0)), (a(1), o(1))]).unwrap();
        let second = Assignment::new([(a(0), o(1)), (a(1), o(0))]).unwrap();
        let lottery = Lottery::new([(first, 0.75), (second, 0.25)], &tolerance).unwrap();
        let marginals = AssignmentLottery::marginalize(&lottery, &tolerance).unwrap();
        let agent0 = marginals.marginal(a(0)).unwrap();
        assert!((agent0.probability(&o(0)) - 0.75).abs() < 1e-12);
        assert!((agent0.probability(&o(1)) - 0.25).abs() < 1e-12);
        let agent1 = marginals.marginal(a(1)).unwrap();
        assert!((agent1.probability(&o(0)) - 0.25).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_normalized_weights_validate(weights in proptest::collection::vec(0.01f64..1.0, 1..8)) {
            let total: f64 = weights.iter().sum();
            let tolerance = Tolerance::default();
            let entries = weights
                .iter()
                .enumerate()
                .map(|(i, w)| (o(i), w / total));
            prop_assert!(Lottery::new(entries, &tolerance).is_ok());
        }

        #[test]
        fn prop_perturbed_totals_fail(weights in proptest::collection::vec(0.01f64..1.0, 1..8), shift in 0.01f64..0.5) {
            let total: f64 = weights.iter().sum();
            let tolerance = Tolerance::default();
            let entries: Vec<_> = weights
                .iter()
                .enumerate()
                .map(|(i, w)| (o(i), (w / total) * (1.0 - shift)))
                .collect();
            prop_assert!(matches!(
                Lottery::new(entries, &tolerance),
                Err(LotteryError::TotalNotOne(_))
            ));
        }
    }
}
