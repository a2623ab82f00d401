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

//! # Lottery Extraction
//!
//! Once a simulation terminates, the final tower heights constrain which
//! outcome lotteries honor every reservation: the mass on each tower's
//! outcome set must reach the tower's height. One last linear program
//! maximizes the total probability under those constraints and the
//! resulting point is validated into a `Lottery`.

use crate::error::SolverError;
use crate::settings::SolverSettings;
use sortition_lp::{Backend, Comparison, LinearExpr, Problem, Variable};
use sortition_model::{Lottery, OutcomeId, TieGroup};
use std::collections::BTreeMap;

/// Extracts the outcome lottery encoded by a height profile.
pub fn extract_lottery<B: Backend>(
    num_outcomes: usize,
    heights: &BTreeMap<TieGroup, f64>,
    settings: &SolverSettings<B>,
    lp_solves: &mut u64,
) -> Result<Lottery<OutcomeId>, SolverError> {
    let mut problem = Problem::new();
    let outcome_vars: Vec<Variable> = (0..num_outcomes)
        .map(|_| problem.add_variable(0.0, None))
        .collect();
    let total: LinearExpr = outcome_vars.iter().map(|v| (1.0, *v)).collect();
    problem.constrain(total.clone(), Comparison::LessOrEqual, 1.0);
    for (group, height) in heights {
        let mass: LinearExpr = group
            .iter()
            .map(|outcome| (1.0, outcome_vars[outcome.get()]))
            .collect();
        problem.constrain(mass, Comparison::GreaterOrEqual, *height);
    }
    problem.maximize(total);

    let solution = settings.backend().solve(&problem).optimal()?;
    *lp_solves += 1;
    let entries = outcome_vars
        .iter()
        .enumerate()
        .map(|(index, variable)| (OutcomeId::new(index), solution.value(*variable)));
    Ok(Lottery::new(entries, settings.tolerance())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortition_lp::GoodLpBackend;

    fn group(indices: &[usize]) -> TieGroup {
        TieGroup::new(indices.iter().copied().map(OutcomeId::new))
    }

    #[test]
    fn test_singleton_heights_pin_the_lottery() {
        let settings: SolverSettings<GoodLpBackend> = SolverSettings::default();
        let heights: BTreeMap<TieGroup, f64> =
            [(group(&[0]), 0.5), (group(&[1]), 0.5)].into_iter().collect();
        let mut lp_solves = 0;
        let lottery = extract_lottery(3, &heights, &settings, &mut lp_solves).unwrap();
        assert!(settings.tolerance().is_close(lottery.probability(&OutcomeId::new(0)), 0.5));
        assert!(settings.tolerance().is_close(lottery.probability(&OutcomeId::new(1)), 0.5));
        assert!(settings.tolerance().is_close(lottery.probability(&OutcomeId::new(2)), 0.0));
        assert_eq!(lp_solves, 1);
    }

    #[test]
    fn test_group_heights_bound_mass_from_below() {
        let settings: SolverSettings<GoodLpBackend> = SolverSettings::default();
        let heights: BTreeMap<TieGroup, f64> = [
            (group(&[0]), 0.25),
            (group(&[0, 1]), 0.75),
        ]
        .into_iter()
        .collect();
        let mut lp_solves = 0;
        let lottery = extract_lottery(2, &heights, &settings, &mut lp_solves).unwrap();
        let mass = lottery.probability(&OutcomeId::new(0)) + lottery.probability(&OutcomeId::new(1));
        assert!(settings.tolerance().is_close(mass, 1.0));
        assert!(settings.tolerance().is_nonnegative(
            lottery.probability(&OutcomeId::new(0)) - 0.25
        ));
    }

    #[test]
    fn test_contradictory_heights_are_infeasible() {
        let settings: SolverSettings<GoodLpBackend> = SolverSettings::default();
        let heights: BTreeMap<TieGroup, f64> =
            [(group(&[0]), 0.75), (group(&[1]), 0.75)].into_iter().collect();
        let mut lp_solves = 0;
        assert!(matches!(
            extract_lottery(2, &heights, &settings, &mut lp_solves),
            Err(SolverError::Lp(_))
        ));
    }
}
