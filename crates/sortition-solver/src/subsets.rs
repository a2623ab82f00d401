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

//! # Outcome Subset Enumeration
//!
//! Subset helpers for the two engines that reason about outcome sets
//! beyond the submitted tie groups: the simultaneous-probabilistic-serial
//! seeding walks every non-empty outcome subset, and the tower-centric
//! engine pushes supersets exactly one element larger.

use sortition_model::{OutcomeId, TieGroup};

/// Enumerates every non-empty subset of `outcomes`, ordered by size
/// first and lexicographically within one size.
pub fn nonempty_subsets(outcomes: &[OutcomeId]) -> Vec<TieGroup> {
    debug_assert!(outcomes.len() < 64, "subset enumeration over {} outcomes", outcomes.len());
    let mut subsets = Vec::with_capacity((1usize << outcomes.len()) - 1);
    for mask in 1u64..(1u64 << outcomes.len()) {
        let members = outcomes
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, outcome)| *outcome);
        subsets.push(TieGroup::new(members));
    }
    subsets.sort_unstable();
    subsets
}

/// Enumerates every superset of `group` within `outcomes` that holds
/// exactly one additional element.
pub fn one_larger_supersets(group: &TieGroup, outcomes: &[OutcomeId]) -> Vec<TieGroup> {
    outcomes
        .iter()
        .filter(|outcome| !group.contains(**outcome))
        .map(|outcome| group.union(&TieGroup::single(*outcome)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcomes(n: usize) -> Vec<OutcomeId> {
        (0..n).map(OutcomeId::new).collect()
    }

    fn group(indices: &[usize]) -> TieGroup {
        TieGroup::new(indices.iter().copied().map(OutcomeId::new))
    }

    #[test]
    fn test_nonempty_subsets_of_three() {
        let subsets = nonempty_subsets(&outcomes(3));
        assert_eq!(subsets.len(), 7);
        assert_eq!(subsets[0], group(&[0]));
        assert_eq!(subsets[1], group(&[1]));
        assert_eq!(subsets[2], group(&[2]));
        assert_eq!(subsets[3], group(&[0, 1]));
        assert_eq!(subsets[4], group(&[0, 2]));
        assert_eq!(subsets[5], group(&[1, 2]));
        assert_eq!(subsets[6], group(&[0, 1, 2]));
    }

    #[test]
    fn test_one_larger_supersets() {
        let supersets = one_larger_supersets(&group(&[0, 2]), &outcomes(4));
        assert_eq!(supersets, vec![group(&[0, 1, 2]), group(&[0, 2, 3])]);
    }

    #[test]
    fn test_full_set_has_no_supersets() {
        assert!(one_larger_supersets(&group(&[0, 1]), &outcomes(2)).is_empty());
    }
}
