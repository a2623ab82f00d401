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

//! # Tie Groups and Weak-Order Preferences
//!
//! A `TieGroup` is a non-empty set of outcomes an agent is indifferent
//! between. A `Preference` is a best-to-worst sequence of tie groups, i.e.
//! a weak order over outcomes. Both are canonicalized on construction so
//! that structural equality and ordering are deterministic: tie-group
//! members are sorted and deduplicated, and tie groups order first by
//! size, then lexicographically by members.
//!
//! Tie groups double as tower identities in the solvers, which is why
//! their ordering matters beyond mere determinism: iterating a
//! `BTreeMap<TieGroup, _>` visits smaller sets before larger ones.

use crate::index::OutcomeId;
use smallvec::SmallVec;
use std::cmp::Ordering;

/// A non-empty set of outcomes an agent is indifferent between.
///
/// Members are kept sorted and deduplicated, so two tie groups built from
/// the same outcomes in any order compare equal.
///
/// # Examples
///
/// ```rust
/// use sortition_model::{OutcomeId, TieGroup};
///
/// let group = TieGroup::new([OutcomeId::new(2), OutcomeId::new(0), OutcomeId::new(2)]);
/// assert_eq!(group.members(), &[OutcomeId::new(0), OutcomeId::new(2)]);
/// assert!(group.contains(OutcomeId::new(2)));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct TieGroup {
    members: SmallVec<[OutcomeId; 4]>,
}

impl TieGroup {
    /// Creates a tie group from the given outcomes, sorting and
    /// deduplicating them.
    pub fn new(members: impl IntoIterator<Item = OutcomeId>) -> Self {
        let mut members: SmallVec<[OutcomeId; 4]> = members.into_iter().collect();
        members.sort_unstable();
        members.dedup();
        TieGroup { members }
    }

    /// Creates a tie group containing a single outcome.
    #[inline]
    pub fn single(outcome: OutcomeId) -> Self {
        TieGroup {
            members: SmallVec::from_elem(outcome, 1),
        }
    }

    /// Returns the members in ascending order.
    #[inline]
    pub fn members(&self) -> &[OutcomeId] {
        &self.members
    }

    /// Returns the number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the tie group has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Tests membership of an outcome.
    #[inline]
    pub fn contains(&self, outcome: OutcomeId) -> bool {
        self.members.binary_search(&outcome).is_ok()
    }

    /// Tests whether every member of `self` is also a member of `other`.
    pub fn is_subset_of(&self, other: &TieGroup) -> bool {
        self.members.iter().all(|o| other.contains(*o))
    }

    /// Returns the union of `self` and `other` as a new tie group.
    pub fn union(&self, other: &TieGroup) -> TieGroup {
        TieGroup::new(self.members.iter().chain(other.members.iter()).copied())
    }

    /// Iterates over the members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = OutcomeId> + '_ {
        self.members.iter().copied()
    }
}

impl PartialOrd for TieGroup {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TieGroup {
    /// Orders by cardinality first, then lexicographically by members.
    fn cmp(&self, other: &Self) -> Ordering {
        self.members
            .len()
            .cmp(&other.members.len())
            .then_with(|| self.members.cmp(&other.members))
    }
}

impl std::fmt::Display for TieGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", member.get())?;
        }
        write!(f, "}}")
    }
}

/// One rank of an agent's preference list as submitted to the builder.
#[derive(Clone, Debug)]
pub enum PreferenceEntry {
    /// A single outcome at this rank.
    Single(OutcomeId),
    /// Several outcomes tied at this rank.
    Tied(Vec<OutcomeId>),
}

impl From<OutcomeId> for PreferenceEntry {
    #[inline]
    fn from(outcome: OutcomeId) -> Self {
        PreferenceEntry::Single(outcome)
    }
}

/// A validated weak order over outcomes, best rank first.
///
/// Constructed only by `ProfileBuilder`, which guarantees that ranks are
/// non-empty and that no outcome appears at more than one rank.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Preference {
    ranks: Vec<TieGroup>,
}

impl Preference {
    pub(crate) fn from_ranks(ranks: Vec<TieGroup>) -> Self {
        Preference { ranks }
    }

    /// Returns the tie groups from best to worst.
    #[inline]
    pub fn ranks(&self) -> &[TieGroup] {
        &self.ranks
    }

    /// Returns the number of ranks.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Returns `true` if the preference has no ranks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Returns `true` if every rank holds exactly one outcome.
    pub fn is_strict(&self) -> bool {
        self.ranks.iter().all(|group| group.len() == 1)
    }

    /// Returns the tie group at the given rank, zero being the best.
    #[inline]
    pub fn rank(&self, rank: usize) -> &TieGroup {
        debug_assert!(rank < self.ranks.len(), "rank {} out of range", rank);
        &self.ranks[rank]
    }

    /// Returns the union of the first `count` tie groups.
    ///
    /// This is the set of outcomes the agent considers at least as good as
    /// its `count`-th rank, which is exactly the tower an agent climbs once
    /// it has bounced `count - 1` times.
    pub fn union_of_top(&self, count: usize) -> TieGroup {
        debug_assert!(
            count >= 1 && count <= self.ranks.len(),
            "rank count {} out of range",
            count
        );
        let mut union = self.ranks[0].clone();
        for group in &self.ranks[1..count] {
            union = union.union(group);
        }
        union
    }

    /// Returns the set of all outcomes the preference mentions.
    pub fn outcome_set(&self) -> TieGroup {
        self.union_of_top(self.ranks.len())
    }
}
