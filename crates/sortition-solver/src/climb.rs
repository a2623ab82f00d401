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

//! # Agent-Centric Climbing State
//!
//! Simulation state for the mechanisms in which agents climb: each agent
//! scales the tower of its current tie group at its own speed and
//! height. When an agent becomes tight it "bounces": it drops to height
//! zero at the tower of its next tie group. An agent whose preference is
//! exhausted is finished.
//!
//! Towers here only record the highest point any agent reached; their
//! speed and frozen flag stay unused.

use crate::error::SolverError;
use crate::lambda::Climber;
use crate::tower::TowerBank;
use sortition_core::tolerance::Tolerance;
use sortition_model::{AgentId, Profile, TieGroup};
use std::collections::{BTreeMap, BTreeSet};

/// Per-agent climbing progress.
#[derive(Debug, Clone)]
struct AgentProgress {
    /// Number of tie groups already exhausted by bouncing.
    cursor: usize,
    height: f64,
    speed: f64,
}

/// The full state of one agent-centric solve.
#[derive(Debug)]
pub struct ClimbState<'a> {
    profile: &'a Profile,
    tolerance: Tolerance,
    towers: TowerBank,
    progress: Vec<AgentProgress>,
}

impl<'a> ClimbState<'a> {
    /// Creates the initial state: every agent at its best tie group,
    /// height zero, unit speed.
    pub fn new(profile: &'a Profile, tolerance: Tolerance) -> Self {
        let progress = profile
            .agents()
            .map(|_| AgentProgress {
                cursor: 0,
                height: 0.0,
                speed: 1.0,
            })
            .collect();
        ClimbState {
            profile,
            tolerance,
            towers: TowerBank::new(),
            progress,
        }
    }

    /// Returns `true` once every agent has exhausted its preference.
    pub fn is_finished(&self) -> bool {
        self.progress
            .iter()
            .zip(self.profile.agents())
            .all(|(progress, agent)| progress.cursor >= self.profile.preference(agent).len())
    }

    fn is_active(&self, agent: AgentId) -> bool {
        self.progress[agent.get()].cursor < self.profile.preference(agent).len()
    }

    /// Iterates over all agents still climbing.
    pub fn active_agents(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.profile.agents().filter(|agent| self.is_active(*agent))
    }

    /// Returns the tie group an agent is currently climbing.
    pub fn current_group(&self, agent: AgentId) -> &TieGroup {
        debug_assert!(self.is_active(agent), "agent {} is finished", agent);
        self.profile
            .preference(agent)
            .rank(self.progress[agent.get()].cursor)
    }

    /// Returns an agent's current height.
    pub fn agent_height(&self, agent: AgentId) -> f64 {
        self.progress[agent.get()].height
    }

    /// Sets an agent's speed.
    pub fn set_agent_speed(&mut self, agent: AgentId, speed: f64) -> Result<(), SolverError> {
        if speed < 0.0 {
            return Err(SolverError::NegativeSpeed(speed));
        }
        self.progress[agent.get()].speed = speed;
        Ok(())
    }

    /// Sets an agent's height, validated into [0, 1].
    pub fn set_agent_height(&mut self, agent: AgentId, height: f64) -> Result<(), SolverError> {
        let height = self.tolerance.check_bound(height, 0.0, 1.0)?;
        self.progress[agent.get()].height = height;
        Ok(())
    }

    /// Sets a tower's height directly, validated into [0, 1].
    pub fn set_tower_height(&mut self, group: &TieGroup, height: f64) -> Result<(), SolverError> {
        let height = self.tolerance.check_bound(height, 0.0, 1.0)?;
        self.towers.tower(group).set_height(height)
    }

    /// Returns the committed `(group, height)` pairs: every tower with
    /// positive height.
    pub fn committed_heights(&self) -> Vec<(TieGroup, f64)> {
        self.towers.positive_heights().into_iter().collect()
    }

    /// Returns one climber per active agent.
    pub fn climbers(&self) -> Vec<Climber<AgentId>> {
        self.active_agents()
            .map(|agent| Climber {
                key: agent,
                set: self.current_group(agent).clone(),
                height: self.progress[agent.get()].height,
                speed: self.progress[agent.get()].speed,
            })
            .collect()
    }

    /// Advances the simulation by `time`: every active agent climbs its
    /// tower, and the agents in `bouncing` drop to their next tie group.
    pub fn advance(
        &mut self,
        time: f64,
        bouncing: &BTreeSet<AgentId>,
    ) -> Result<(), SolverError> {
        let active: Vec<AgentId> = self.active_agents().collect();
        for agent in active {
            let progress = &self.progress[agent.get()];
            let climbed = progress.height + time * progress.speed;
            if !self.tolerance.is_in_interval(climbed, 0.0, 1.0) {
                return Err(SolverError::HeightOutOfRange(climbed));
            }
            let climbed = self.tolerance.bound(climbed, 0.0, 1.0);
            let group = self.current_group(agent).clone();
            self.towers.tower(&group).try_climb(climbed)?;
            let progress = &mut self.progress[agent.get()];
            if bouncing.contains(&agent) {
                progress.cursor += 1;
                progress.height = 0.0;
            } else {
                progress.height = climbed;
            }
        }
        Ok(())
    }

    /// Returns the final height profile: every tower with positive
    /// height.
    pub fn heights(&self) -> BTreeMap<TieGroup, f64> {
        self.towers.positive_heights()
    }
}
