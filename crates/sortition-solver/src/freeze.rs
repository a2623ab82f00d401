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

//! # Tower-Centric Freezing State
//!
//! Simulation state for the mechanism in which towers climb instead of
//! agents. Each active agent contributes unit speed to the tower of its
//! current tie group and to every non-frozen tower keyed by a superset
//! exactly one element larger. Towers that become tight freeze forever;
//! agents whose current tower froze move on to their next tie group,
//! skipping over any further frozen towers.

use crate::error::SolverError;
use crate::lambda::Climber;
use crate::subsets::one_larger_supersets;
use crate::tower::TowerBank;
use sortition_core::tolerance::Tolerance;
use sortition_model::{AgentId, OutcomeId, Profile, TieGroup};
use std::collections::{BTreeMap, BTreeSet};

/// The full state of one tower-centric solve.
#[derive(Debug)]
pub struct FreezeState<'a> {
    profile: &'a Profile,
    tolerance: Tolerance,
    outcomes: Vec<OutcomeId>,
    towers: TowerBank,
    /// Per-agent index of the current tie group; agents past their last
    /// group are finished.
    cursors: Vec<usize>,
}

impl<'a> FreezeState<'a> {
    /// Creates the initial state and assigns the starting tower speeds.
    pub fn new(profile: &'a Profile, tolerance: Tolerance) -> Result<Self, SolverError> {
        let mut state = FreezeState {
            profile,
            tolerance,
            outcomes: profile.outcomes().collect(),
            towers: TowerBank::new(),
            cursors: vec![0; profile.num_agents()],
        };
        state.adjust_tower_speeds()?;
        Ok(state)
    }

    fn is_active(&self, agent: AgentId) -> bool {
        self.cursors[agent.get()] < self.profile.preference(agent).len()
    }

    /// Returns `true` once every agent has exhausted its preference.
    pub fn is_finished(&self) -> bool {
        self.profile.agents().all(|agent| !self.is_active(agent))
    }

    fn current_group(&self, agent: AgentId) -> &TieGroup {
        debug_assert!(self.is_active(agent), "agent {} is finished", agent);
        self.profile.preference(agent).rank(self.cursors[agent.get()])
    }

    /// Recomputes all tower speeds from the active agents' positions.
    pub fn adjust_tower_speeds(&mut self) -> Result<(), SolverError> {
        for (_, tower) in self.towers.iter_mut() {
            tower.set_speed(0.0)?;
        }
        let active: Vec<AgentId> = self
            .profile
            .agents()
            .filter(|agent| self.is_active(*agent))
            .collect();
        for agent in active {
            let group = self.current_group(agent).clone();
            self.towers.tower(&group).add_speed(1.0)?;
            for superset in one_larger_supersets(&group, &self.outcomes) {
                let tower = self.towers.tower(&superset);
                if !tower.is_frozen() {
                    tower.add_speed(1.0)?;
                }
            }
        }
        Ok(())
    }

    /// Returns the committed `(group, height)` pairs: every frozen
    /// tower.
    pub fn committed_heights(&self) -> Vec<(TieGroup, f64)> {
        self.towers
            .iter()
            .filter(|(_, tower)| tower.is_frozen())
            .map(|(group, tower)| (group.clone(), tower.height()))
            .collect()
    }

    /// Returns one climber per non-frozen tower.
    pub fn climbers(&self) -> Vec<Climber<TieGroup>> {
        self.towers
            .iter()
            .filter(|(_, tower)| !tower.is_frozen())
            .map(|(group, tower)| Climber {
                key: group.clone(),
                set: group.clone(),
                height: tower.height(),
                speed: tower.speed(),
            })
            .collect()
    }

    /// Advances the simulation by `time`: every non-frozen tower climbs
    /// at its speed, the towers in `freezing` freeze, agents skip past
    /// frozen towers, and speeds are recomputed.
    pub fn advance(
        &mut self,
        time: f64,
        freezing: &BTreeSet<TieGroup>,
    ) -> Result<(), SolverError> {
        for (group, tower) in self.towers.iter_mut() {
            if tower.is_frozen() {
                continue;
            }
            let climbed = tower.height() + time * tower.speed();
            if !self.tolerance.is_in_interval(climbed, 0.0, 1.0) {
                return Err(SolverError::HeightOutOfRange(climbed));
            }
            tower.set_height(self.tolerance.bound(climbed, 0.0, 1.0))?;
            if freezing.contains(group) {
                tower.freeze();
            }
        }
        for agent in self.profile.agents() {
            while self.is_active(agent) {
                let group = self.current_group(agent).clone();
                if !self.towers.tower(&group).is_frozen() {
                    break;
                }
                self.cursors[agent.get()] += 1;
            }
        }
        self.adjust_tower_speeds()
    }

    /// Returns the final height profile: every tower with positive
    /// height.
    pub fn heights(&self) -> BTreeMap<TieGroup, f64> {
        self.towers.positive_heights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortition_model::{PreferenceEntry, ProfileBuilder};

    fn group(indices: &[usize]) -> TieGroup {
        TieGroup::new(indices.iter().copied().map(OutcomeId::new))
    }

    fn two_agent_profile() -> Profile {
        let mut builder = ProfileBuilder::new();
        let a = builder.outcome("a");
        let b = builder.outcome("b");
        builder.agent("a1", vec![a.into(), b.into()]);
        builder.agent("a2", vec![b.into(), a.into()]);
        builder.build().unwrap()
    }

    #[test]
    fn test_initial_speeds_include_supersets() {
        let profile = two_agent_profile();
        let state = FreezeState::new(&profile, Tolerance::default()).unwrap();
        let climbers = state.climbers();
        let speeds: BTreeMap<TieGroup, f64> = climbers
            .iter()
            .map(|climber| (climber.key.clone(), climber.speed))
            .collect();
        assert_eq!(speeds[&group(&[0])], 1.0);
        assert_eq!(speeds[&group(&[1])], 1.0);
        // Both agents push the shared one-larger superset.
        assert_eq!(speeds[&group(&[0, 1])], 2.0);
    }

    #[test]
    fn test_freezing_moves_agents_forward() {
        let profile = two_agent_profile();
        let mut state = FreezeState::new(&profile, Tolerance::default()).unwrap();
        let freezing: BTreeSet<TieGroup> = [group(&[0])].into_iter().collect();
        state.advance(0.25, &freezing).unwrap();
        // Agent 0's first tower froze, so it now pushes {b}.
        let speeds: BTreeMap<TieGroup, f64> = state
            .climbers()
            .iter()
            .map(|climber| (climber.key.clone(), climber.speed))
            .collect();
        assert_eq!(speeds[&group(&[1])], 2.0);
        assert!(!speeds.contains_key(&group(&[0])));
        let committed = state.committed_heights();
        assert_eq!(committed, vec![(group(&[0]), 0.25)]);
    }

    #[test]
    fn test_unit_height_freezes_and_finishes() {
        let profile = two_agent_profile();
        let mut state = FreezeState::new(&profile, Tolerance::default()).unwrap();
        // Freeze everything the agents could still reach.
        let freezing: BTreeSet<TieGroup> =
            [group(&[0]), group(&[1]), group(&[0, 1])].into_iter().collect();
        state.advance(0.25, &freezing).unwrap();
        assert!(state.is_finished());
    }

    #[test]
    fn test_advance_rejects_overshoot() {
        let profile = two_agent_profile();
        let mut state = FreezeState::new(&profile, Tolerance::default()).unwrap();
        // The {a, b} tower has speed 2, so time 0.75 would push it to 1.5.
        assert!(matches!(
            state.advance(0.75, &BTreeSet::new()),
            Err(SolverError::HeightOutOfRange(_))
        ));
    }
}
