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

//! # Solver Drivers
//!
//! The four public entry points. Three share the agent-centric loop and
//! differ only in their initialization; the fourth runs the
//! tower-centric loop. Every driver alternates lambda steps and state
//! advances until all agents are finished, then extracts the lottery
//! from the final height profile.

use crate::climb::ClimbState;
use crate::error::SolverError;
use crate::extract::extract_lottery;
use crate::freeze::FreezeState;
use crate::lambda::compute_advance;
use crate::report::{SolveReport, SolveStatistics};
use crate::settings::SolverSettings;
use crate::subsets::nonempty_subsets;
use sortition_lp::Backend;
use sortition_model::{AgentId, OutcomeId, Profile, TieGroup};
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::debug;

fn run_agent_centric<B: Backend>(
    profile: &Profile,
    settings: &SolverSettings<B>,
    init: impl FnOnce(&mut ClimbState<'_>) -> Result<(), SolverError>,
) -> Result<SolveReport, SolverError> {
    let start = Instant::now();
    let mut state = ClimbState::new(profile, *settings.tolerance());
    init(&mut state)?;
    let mut iterations = 0u64;
    let mut lp_solves = 0u64;
    while !state.is_finished() {
        let committed = state.committed_heights();
        let climbers = state.climbers();
        let advance = compute_advance(
            profile.num_outcomes(),
            &committed,
            &climbers,
            settings,
            &mut lp_solves,
        )?;
        debug!(
            iteration = iterations,
            time = advance.time,
            bouncing = advance.tight.len(),
            "agents advanced"
        );
        state.advance(advance.time, &advance.tight)?;
        iterations += 1;
    }
    let heights = state.heights();
    let lottery = extract_lottery(profile.num_outcomes(), &heights, settings, &mut lp_solves)?;
    Ok(SolveReport::new(
        lottery,
        heights,
        SolveStatistics::new(iterations, lp_solves, start.elapsed()),
    ))
}

/// Solves a profile with the egalitarian simultaneous-reservation
/// mechanism: all agents start at height zero with unit speed.
pub fn solve_egalitarian<B: Backend>(
    profile: &Profile,
    settings: &SolverSettings<B>,
) -> Result<SolveReport, SolverError> {
    run_agent_centric(profile, settings, |_| Ok(()))
}

/// Solves a profile with the probabilistic-serial variant.
///
/// Agents initially climb with their co-demand: the number of current
/// tie groups (their own included) contained in theirs. No entity can
/// become tight before time `1/n`, so that phase is taken in one fixed
/// advance, after which all speeds return to one.
pub fn solve_probabilistic_serial<B: Backend>(
    profile: &Profile,
    settings: &SolverSettings<B>,
) -> Result<SolveReport, SolverError> {
    run_agent_centric(profile, settings, |state| {
        let classes: Vec<(AgentId, TieGroup)> = state
            .active_agents()
            .map(|agent| (agent, state.current_group(agent).clone()))
            .collect();
        for (agent, class) in &classes {
            let co_demand = classes
                .iter()
                .filter(|(_, other)| other.is_subset_of(class))
                .count();
            state.set_agent_speed(*agent, co_demand as f64)?;
        }
        state.advance(1.0 / profile.num_agents() as f64, &BTreeSet::new())?;
        for agent in profile.agents() {
            state.set_agent_speed(agent, 1.0)?;
        }
        Ok(())
    })
}

/// Solves a profile with the simultaneous-probabilistic-serial variant.
///
/// Every non-empty outcome subset is seeded with the fraction of agents
/// whose best tie group it contains, and each agent starts at the height
/// of its own best group's tower.
pub fn solve_simultaneous_probabilistic_serial<B: Backend>(
    profile: &Profile,
    settings: &SolverSettings<B>,
) -> Result<SolveReport, SolverError> {
    run_agent_centric(profile, settings, |state| {
        let outcomes: Vec<OutcomeId> = profile.outcomes().collect();
        let agent_count = profile.num_agents() as f64;
        let classes: Vec<(AgentId, TieGroup)> = state
            .active_agents()
            .map(|agent| (agent, state.current_group(agent).clone()))
            .collect();
        for subset in nonempty_subsets(&outcomes) {
            let covered = classes
                .iter()
                .filter(|(_, class)| class.is_subset_of(&subset))
                .count();
            let height = covered as f64 / agent_count;
            state.set_tower_height(&subset, height)?;
            for (agent, class) in &classes {
                if *class == subset {
                    state.set_agent_height(*agent, height)?;
                }
            }
        }
        Ok(())
    })
}

/// Solves a profile with the tower-centric simultaneous-reservation
/// mechanism: towers climb with the combined speed of the agents pushing
/// them and freeze when tight.
pub fn solve_simultaneous_reservation<B: Backend>(
    profile: &Profile,
    settings: &SolverSettings<B>,
) -> Result<SolveReport, SolverError> {
    let start = Instant::now();
    let mut state = FreezeState::new(profile, *settings.tolerance())?;
    let mut iterations = 0u64;
    let mut lp_solves = 0u64;
    while !state.is_finished() {
        let committed = state.committed_heights();
        let climbers = state.climbers();
        let advance = compute_advance(
            profile.num_outcomes(),
            &committed,
            &climbers,
            settings,
            &mut lp_solves,
        )?;
        debug!(
            iteration = iterations,
            time = advance.time,
            freezing = advance.tight.len(),
            "towers advanced"
        );
        state.advance(advance.time, &advance.tight)?;
        iterations += 1;
    }
    let heights = state.heights();
    let lottery = extract_lottery(profile.num_outcomes(), &heights, settings, &mut lp_solves)?;
    Ok(SolveReport::new(
        lottery,
        heights,
        SolveStatistics::new(iterations, lp_solves, start.elapsed()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use sortition_core::tolerance::Tolerance;
    use sortition_lp::GoodLpBackend;
    use sortition_model::{PreferenceEntry, ProfileBuilder};
    use std::collections::BTreeMap;

    type SolveFn = fn(&Profile, &SolverSettings<GoodLpBackend>) -> Result<SolveReport, SolverError>;

    fn group(indices: &[usize]) -> TieGroup {
        TieGroup::new(indices.iter().copied().map(OutcomeId::new))
    }

    /// Three agents over outcomes a, b, c:
    /// a1: a, then b ~ c
    /// a2: b, then a, then c
    /// a3: a ~ c, then b
    fn scenario() -> Profile {
        let mut builder = ProfileBuilder::new();
        let a = builder.outcome("a");
        let b = builder.outcome("b");
        let c = builder.outcome("c");
        builder.agent("a1", vec![a.into(), PreferenceEntry::Tied(vec![b, c])]);
        builder.agent("a2", vec![b.into(), a.into(), c.into()]);
        builder.agent("a3", vec![PreferenceEntry::Tied(vec![a, c]), b.into()]);
        builder.build().unwrap()
    }

    fn single_agent() -> Profile {
        let mut builder = ProfileBuilder::new();
        let a = builder.outcome("a");
        let b = builder.outcome("b");
        builder.agent("solo", vec![a.into(), b.into()]);
        builder.build().unwrap()
    }

    fn height_of(heights: &BTreeMap<TieGroup, f64>, group: &TieGroup) -> f64 {
        heights.get(group).copied().unwrap_or(0.0)
    }

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = Tolerance::default();
        assert!(
            tolerance.is_close(actual, expected),
            "expected {} to be close to {}",
            actual,
            expected
        );
    }

    #[test]
    fn test_egalitarian_scenario() {
        let profile = scenario();
        let report = solve_egalitarian(&profile, &SolverSettings::default()).unwrap();
        let heights = report.heights();
        assert_close(height_of(heights, &group(&[0])), 0.5);
        assert_close(height_of(heights, &group(&[1])), 0.5);
        assert_close(height_of(heights, &group(&[0, 2])), 0.5);
        assert_close(height_of(heights, &group(&[1, 2])), 0.5);
        assert_close(height_of(heights, &group(&[2])), 0.0);
        assert_close(report.lottery().probability(&OutcomeId::new(0)), 0.5);
        assert_close(report.lottery().probability(&OutcomeId::new(1)), 0.5);
        assert_close(report.lottery().probability(&OutcomeId::new(2)), 0.0);
        assert_eq!(report.stats().iterations(), 3);
    }

    #[test]
    fn test_probabilistic_serial_scenario() {
        let profile = scenario();
        let report = solve_probabilistic_serial(&profile, &SolverSettings::default()).unwrap();
        let heights = report.heights();
        assert_close(height_of(heights, &group(&[0])), 2.0 / 3.0);
        assert_close(height_of(heights, &group(&[1])), 1.0 / 3.0);
        assert_close(height_of(heights, &group(&[0, 2])), 2.0 / 3.0);
        assert_close(height_of(heights, &group(&[1, 2])), 1.0 / 3.0);
        assert_close(report.lottery().probability(&OutcomeId::new(0)), 2.0 / 3.0);
        assert_close(report.lottery().probability(&OutcomeId::new(1)), 1.0 / 3.0);
        assert_close(report.lottery().probability(&OutcomeId::new(2)), 0.0);
        assert_eq!(report.stats().iterations(), 4);
    }

    #[test]
    fn test_probabilistic_serial_differs_from_egalitarian() {
        let profile = scenario();
        let settings = SolverSettings::default();
        let egalitarian = solve_egalitarian(&profile, &settings).unwrap();
        let serial = solve_probabilistic_serial(&profile, &settings).unwrap();
        assert_ne!(egalitarian.heights(), serial.heights());
    }

    #[test]
    fn test_simultaneous_probabilistic_serial_scenario() {
        let profile = scenario();
        let report =
            solve_simultaneous_probabilistic_serial(&profile, &SolverSettings::default()).unwrap();
        let heights = report.heights();
        assert_close(height_of(heights, &group(&[0])), 2.0 / 3.0);
        assert_close(height_of(heights, &group(&[1])), 1.0 / 3.0);
        assert_close(height_of(heights, &group(&[0, 1])), 2.0 / 3.0);
        assert_close(height_of(heights, &group(&[0, 2])), 2.0 / 3.0);
        assert_close(height_of(heights, &group(&[1, 2])), 1.0 / 3.0);
        assert_close(height_of(heights, &group(&[0, 1, 2])), 1.0);
        assert_close(report.lottery().probability(&OutcomeId::new(0)), 2.0 / 3.0);
        assert_close(report.lottery().probability(&OutcomeId::new(1)), 1.0 / 3.0);
        assert_close(report.lottery().probability(&OutcomeId::new(2)), 0.0);
    }

    #[test]
    fn test_simultaneous_reservation_scenario() {
        let profile = scenario();
        let report =
            solve_simultaneous_reservation(&profile, &SolverSettings::default()).unwrap();
        let heights = report.heights();
        assert_close(height_of(heights, &group(&[0])), 2.0 / 3.0);
        assert_close(height_of(heights, &group(&[1])), 1.0 / 3.0);
        assert_close(height_of(heights, &group(&[0, 1])), 1.0);
        assert_close(height_of(heights, &group(&[0, 2])), 2.0 / 3.0);
        assert_close(height_of(heights, &group(&[1, 2])), 1.0 / 3.0);
        assert_close(height_of(heights, &group(&[0, 1, 2])), 1.0 / 3.0);
        assert_close(report.lottery().probability(&OutcomeId::new(0)), 2.0 / 3.0);
        assert_close(report.lottery().probability(&OutcomeId::new(1)), 1.0 / 3.0);
        assert_close(report.lottery().probability(&OutcomeId::new(2)), 0.0);
        assert_eq!(report.stats().iterations(), 3);
    }

    #[rstest]
    #[case::egalitarian(solve_egalitarian as SolveFn)]
    #[case::probabilistic_serial(solve_probabilistic_serial as SolveFn)]
    #[case::simultaneous_probabilistic_serial(
        solve_simultaneous_probabilistic_serial as SolveFn
    )]
    #[case::simultaneous_reservation(solve_simultaneous_reservation as SolveFn)]
    fn test_reservations_are_honored(#[case] solve: SolveFn) {
        let profile = scenario();
        let settings = SolverSettings::default();
        let report = solve(&profile, &settings).unwrap();
        for (group, height) in report.heights() {
            let mass = report.lottery().mass_where(|outcome| group.contains(*outcome));
            assert!(
                settings.tolerance().is_nonnegative(mass - height),
                "mass {} below height {} for {}",
                mass,
                height,
                group
            );
        }
        assert!(report.stats().lp_solves() > 0);
    }

    #[rstest]
    #[case::egalitarian(solve_egalitarian as SolveFn)]
    #[case::probabilistic_serial(solve_probabilistic_serial as SolveFn)]
    #[case::simultaneous_probabilistic_serial(
        solve_simultaneous_probabilistic_serial as SolveFn
    )]
    #[case::simultaneous_reservation(solve_simultaneous_reservation as SolveFn)]
    fn test_height_profile_is_deterministic(#[case] solve: SolveFn) {
        let profile = scenario();
        let settings = SolverSettings::default();
        let first = solve(&profile, &settings).unwrap();
        let second = solve(&profile, &settings).unwrap();
        assert_eq!(first.heights(), second.heights());
    }

    #[rstest]
    #[case::egalitarian(solve_egalitarian as SolveFn)]
    #[case::probabilistic_serial(solve_probabilistic_serial as SolveFn)]
    #[case::simultaneous_probabilistic_serial(
        solve_simultaneous_probabilistic_serial as SolveFn
    )]
    #[case::simultaneous_reservation(solve_simultaneous_reservation as SolveFn)]
    fn test_single_agent_gets_first_choice(#[case] solve: SolveFn) {
        let profile = single_agent();
        let report = solve(&profile, &SolverSettings::default()).unwrap();
        assert_close(report.lottery().probability(&OutcomeId::new(0)), 1.0);
        assert_close(report.lottery().probability(&OutcomeId::new(1)), 0.0);
    }

    #[rstest]
    #[case::egalitarian(solve_egalitarian as SolveFn)]
    #[case::probabilistic_serial(solve_probabilistic_serial as SolveFn)]
    fn test_iteration_bound(#[case] solve: SolveFn) {
        let profile = scenario();
        let report = solve(&profile, &SolverSettings::default()).unwrap();
        // Five distinct tie groups appear across the preferences.
        assert!(report.stats().iterations() <= 5);
    }
}
