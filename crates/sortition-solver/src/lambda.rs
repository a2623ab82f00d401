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

//! # The Lambda Step
//!
//! The heart of every simultaneous-reservation engine: given the
//! committed heights and the currently climbing entities, find the
//! largest time `t*` the simulation can advance without any climbing
//! constraint becoming unsatisfiable, then determine which climbers are
//! tight at `t*`.
//!
//! Two kinds of linear program are solved. The first maximizes the
//! advance time itself. The second, one per climber with the time frozen
//! at `t*`, maximizes the probability mass available to that climber's
//! outcome set; the slack between that maximum and the climber's own
//! demand decides tightness. A negative slack beyond tolerance means the
//! simulation state is corrupt and the solve fails.
//!
//! The step is generic over the climbing entity key, so the agent-centric
//! engines (keys are agents) and the tower-centric engine (keys are tie
//! groups) share it unchanged.

use crate::error::SolverError;
use crate::settings::SolverSettings;
use sortition_lp::{Backend, Comparison, LinearExpr, Problem, Variable};
use sortition_model::TieGroup;
use std::collections::BTreeSet;
use std::fmt::Display;
use tracing::trace;

/// Upper bound on the advance time of one lambda step.
pub const MAX_CLIMB_TIME: f64 = 1.0;

/// One climbing entity: an outcome set pushed upwards from `height` at
/// `speed`, identified by `key`.
#[derive(Debug, Clone)]
pub struct Climber<K> {
    pub key: K,
    pub set: TieGroup,
    pub height: f64,
    pub speed: f64,
}

/// The outcome of one lambda step: the advance time and the keys of all
/// climbers that are tight at that time.
#[derive(Debug, Clone)]
pub struct Advance<K> {
    pub time: f64,
    pub tight: BTreeSet<K>,
}

fn group_sum(group: &TieGroup, outcome_vars: &[Variable]) -> LinearExpr {
    group
        .iter()
        .map(|outcome| (1.0, outcome_vars[outcome.get()]))
        .collect()
}

/// Builds the shared core of every lambda program: one nonnegative
/// probability variable per outcome, the distribution constraint, and
/// one height constraint per committed group.
fn base_problem(
    num_outcomes: usize,
    committed: &[(TieGroup, f64)],
) -> (Problem, Vec<Variable>) {
    let mut problem = Problem::new();
    let outcome_vars: Vec<Variable> = (0..num_outcomes)
        .map(|_| problem.add_variable(0.0, None))
        .collect();
    let total: LinearExpr = outcome_vars.iter().map(|v| (1.0, *v)).collect();
    problem.constrain(total, Comparison::LessOrEqual, 1.0);
    for (group, height) in committed {
        problem.constrain(
            group_sum(group, &outcome_vars),
            Comparison::GreaterOrEqual,
            *height,
        );
    }
    (problem, outcome_vars)
}

/// Performs one lambda step.
///
/// All tightness decisions are evaluated against the same frozen optimal
/// time, never against intermediate values.
pub fn compute_advance<K, B>(
    num_outcomes: usize,
    committed: &[(TieGroup, f64)],
    climbers: &[Climber<K>],
    settings: &SolverSettings<B>,
    lp_solves: &mut u64,
) -> Result<Advance<K>, SolverError>
where
    K: Ord + Clone + Display,
    B: Backend,
{
    // First program: maximize the advance time.
    let (mut problem, outcome_vars) = base_problem(num_outcomes, committed);
    let lambda = problem.add_variable(0.0, Some(MAX_CLIMB_TIME));
    for climber in climbers {
        let mut push = group_sum(&climber.set, &outcome_vars);
        push.add_term(-climber.speed, lambda);
        problem.constrain(push, Comparison::GreaterOrEqual, climber.height);
    }
    problem.maximize([(1.0, lambda)].into_iter().collect());
    trace!(
        variables = problem.num_variables(),
        constraints = problem.constraints().len(),
        "solving advance-time program"
    );
    let solution = settings.backend().solve(&problem).optimal()?;
    *lp_solves += 1;
    let time = settings
        .tolerance()
        .check_bound(solution.value(lambda), 0.0, MAX_CLIMB_TIME)?;

    // Second round: probe each climber's slack at the frozen time.
    let mut tight = BTreeSet::new();
    for current in climbers {
        let (mut problem, outcome_vars) = base_problem(num_outcomes, committed);
        for climber in climbers {
            problem.constrain(
                group_sum(&climber.set, &outcome_vars),
                Comparison::GreaterOrEqual,
                climber.height + time * climber.speed,
            );
        }
        problem.maximize(group_sum(&current.set, &outcome_vars));
        let solution = settings.backend().solve(&problem).optimal()?;
        *lp_solves += 1;
        let slack = solution.objective_value() - time * current.speed - current.height;
        if !settings.tolerance().is_nonnegative(slack) {
            return Err(SolverError::NegativeSlack {
                entity: current.key.to_string(),
                slack,
            });
        }
        if settings.tolerance().is_close(slack, 0.0) {
            tight.insert(current.key.clone());
        }
    }
    Ok(Advance { time, tight })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortition_lp::GoodLpBackend;
    use sortition_model::OutcomeId;

    fn group(indices: &[usize]) -> TieGroup {
        TieGroup::new(indices.iter().copied().map(OutcomeId::new))
    }

    fn climber(key: usize, indices: &[usize], height: f64, speed: f64) -> Climber<usize> {
        Climber {
            key,
            set: group(indices),
            height,
            speed,
        }
    }

    #[test]
    fn test_all_singletons_split_evenly() {
        let settings: SolverSettings<GoodLpBackend> = SolverSettings::default();
        let climbers = vec![
            climber(0, &[0], 0.0, 1.0),
            climber(1, &[1], 0.0, 1.0),
        ];
        let mut lp_solves = 0;
        let advance = compute_advance(2, &[], &climbers, &settings, &mut lp_solves).unwrap();
        assert!(settings.tolerance().is_close(advance.time, 0.5));
        assert_eq!(advance.tight.len(), 2);
        assert_eq!(lp_solves, 3);
    }

    #[test]
    fn test_committed_mass_limits_advance() {
        let settings: SolverSettings<GoodLpBackend> = SolverSettings::default();
        let committed = vec![(group(&[0]), 0.75)];
        let climbers = vec![climber(0, &[1], 0.0, 1.0)];
        let mut lp_solves = 0;
        let advance =
            compute_advance(2, &committed, &climbers, &settings, &mut lp_solves).unwrap();
        assert!(settings.tolerance().is_close(advance.time, 0.25));
        assert!(advance.tight.contains(&0));
    }

    #[test]
    fn test_loose_climber_is_not_tight() {
        let settings: SolverSettings<GoodLpBackend> = SolverSettings::default();
        // The wide set has spare mass once the narrow one stops at 0.5.
        let climbers = vec![
            climber(0, &[0], 0.0, 1.0),
            climber(1, &[1], 0.0, 1.0),
            climber(2, &[0, 1], 0.0, 1.0),
        ];
        let mut lp_solves = 0;
        let advance = compute_advance(2, &[], &climbers, &settings, &mut lp_solves).unwrap();
        assert!(settings.tolerance().is_close(advance.time, 0.5));
        assert!(advance.tight.contains(&0));
        assert!(advance.tight.contains(&1));
        assert!(!advance.tight.contains(&2));
    }

    #[test]
    fn test_saturated_state_advances_zero() {
        let settings: SolverSettings<GoodLpBackend> = SolverSettings::default();
        let committed = vec![(group(&[0]), 1.0)];
        let climbers = vec![climber(0, &[1], 0.0, 1.0)];
        let mut lp_solves = 0;
        let advance =
            compute_advance(2, &committed, &climbers, &settings, &mut lp_solves).unwrap();
        assert!(settings.tolerance().is_close(advance.time, 0.0));
        assert!(advance.tight.contains(&0));
    }

    #[test]
    fn test_advance_time_is_capped() {
        let settings: SolverSettings<GoodLpBackend> = SolverSettings::default();
        // A slow climber alone would take longer than the cap allows.
        let climbers = vec![climber(0, &[0], 0.0, 0.5)];
        let mut lp_solves = 0;
        let advance = compute_advance(1, &[], &climbers, &settings, &mut lp_solves).unwrap();
        assert!(settings.tolerance().is_close(advance.time, MAX_CLIMB_TIME));
        assert!(!advance.tight.contains(&0));
    }
}
