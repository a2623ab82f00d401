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

//! # Preference Profiles
//!
//! A `Profile` is a validated population: a set of outcomes and one
//! weak-order preference per agent over the complete outcome set. It is
//! built exclusively through `ProfileBuilder`, which interns outcome
//! labels, collects agents, and performs all structural validation in
//! `build`. After `build` succeeds the profile is immutable and every
//! solver invariant about its shape holds.
//!
//! Two policies govern how lenient validation is:
//!
//! - `DuplicatePolicy` decides what happens when one agent lists the same
//!   outcome at several ranks.
//! - `CompletionPolicy` decides what happens when an agent's preference
//!   does not mention every registered outcome.

use crate::index::{AgentId, OutcomeId};
use crate::preference::{Preference, PreferenceEntry, TieGroup};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors raised while building a profile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// The builder held no agents.
    #[error("a profile requires at least one agent")]
    NoAgents,
    /// An agent submitted a preference with no ranks.
    #[error("agent {agent:?} submitted an empty preference")]
    EmptyPreference { agent: String },
    /// An agent submitted a tie group with no outcomes.
    #[error("agent {agent:?} submitted an empty tie group at rank {rank}")]
    EmptyTieGroup { agent: String, rank: usize },
    /// An agent listed the same outcome at more than one rank.
    #[error("agent {agent:?} lists outcome {outcome:?} more than once")]
    DuplicateOutcome { agent: String, outcome: String },
    /// An agent's preference does not cover every registered outcome.
    #[error("agent {agent:?} does not rank outcome {outcome:?}")]
    IncompletePreference { agent: String, outcome: String },
    /// A preference referenced an outcome id the builder never issued.
    #[error("agent {agent:?} references unknown outcome index {index}")]
    UnknownOutcome { agent: String, index: usize },
}

/// Policy for outcomes missing from an agent's preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionPolicy {
    /// Fail the build with `ProfileError::IncompletePreference`.
    #[default]
    Reject,
    /// Append a synthetic least-preferred tie group holding the missing
    /// outcomes.
    AppendMissing,
}

/// Policy for an outcome listed at more than one rank by the same agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail the build with `ProfileError::DuplicateOutcome`.
    #[default]
    Reject,
    /// Keep the best-ranked occurrence and drop the rest.
    KeepFirst,
}

/// Builder for `Profile`.
///
/// # Examples
///
/// ```rust
/// use sortition_model::{PreferenceEntry, ProfileBuilder};
///
/// let mut builder = ProfileBuilder::new();
/// let a = builder.outcome("a");
/// let b = builder.outcome("b");
/// builder.agent("alice", vec![a.into(), b.into()]);
/// builder.agent("bob", vec![PreferenceEntry::Tied(vec![a, b])]);
/// let profile = builder.build().unwrap();
/// assert_eq!(profile.num_agents(), 2);
/// assert_eq!(profile.num_outcomes(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProfileBuilder {
    outcome_labels: Vec<String>,
    outcome_lookup: FxHashMap<String, OutcomeId>,
    agent_labels: Vec<String>,
    raw_preferences: Vec<Vec<PreferenceEntry>>,
    completion_policy: CompletionPolicy,
    duplicate_policy: DuplicatePolicy,
}

impl ProfileBuilder {
    /// Creates an empty builder with both policies at their defaults
    /// (`Reject`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the policy for incomplete preferences.
    pub fn completion_policy(&mut self, policy: CompletionPolicy) -> &mut Self {
        self.completion_policy = policy;
        self
    }

    /// Sets the policy for duplicated outcomes within one preference.
    pub fn duplicate_policy(&mut self, policy: DuplicatePolicy) -> &mut Self {
        self.duplicate_policy = policy;
        self
    }

    /// Interns an outcome label, returning its id.
    ///
    /// Calling this twice with the same label returns the same id.
    pub fn outcome(&mut self, label: impl Into<String>) -> OutcomeId {
        let label = label.into();
        if let Some(id) = self.outcome_lookup.get(&label) {
            return *id;
        }
        let id = OutcomeId::new(self.outcome_labels.len());
        self.outcome_lookup.insert(label.clone(), id);
        self.outcome_labels.push(label);
        id
    }

    /// Adds an agent with the given preference list, best rank first.
    pub fn agent(&mut self, label: impl Into<String>, entries: Vec<PreferenceEntry>) -> AgentId {
        let id = AgentId::new(self.agent_labels.len());
        self.agent_labels.push(label.into());
        self.raw_preferences.push(entries);
        id
    }

    /// Validates the collected agents and produces an immutable profile.
    pub fn build(self) -> Result<Profile, ProfileError> {
        if self.agent_labels.is_empty() {
            return Err(ProfileError::NoAgents);
        }
        let num_outcomes = self.outcome_labels.len();
        let mut preferences = Vec::with_capacity(self.raw_preferences.len());
        for (agent_label, entries) in self.agent_labels.iter().zip(self.raw_preferences) {
            if entries.is_empty() {
                return Err(ProfileError::EmptyPreference {
                    agent: agent_label.clone(),
                });
            }
            let mut seen: BTreeSet<OutcomeId> = BTreeSet::new();
            let mut ranks: Vec<TieGroup> = Vec::with_capacity(entries.len());
            for (rank, entry) in entries.into_iter().enumerate() {
                let members = match entry {
                    PreferenceEntry::Single(outcome) => vec![outcome],
                    PreferenceEntry::Tied(outcomes) => outcomes,
                };
                let mut kept: Vec<OutcomeId> = Vec::with_capacity(members.len());
                for outcome in members {
                    if outcome.get() >= num_outcomes {
                        return Err(ProfileError::UnknownOutcome {
                            agent: agent_label.clone(),
                            index: outcome.get(),
                        });
                    }
                    if !seen.insert(outcome) {
                        match self.duplicate_policy {
                            DuplicatePolicy::Reject => {
                                return Err(ProfileError::DuplicateOutcome {
                                    agent: agent_label.clone(),
                                    outcome: self.outcome_labels[outcome.get()].clone(),
                                });
                            }
                            DuplicatePolicy::KeepFirst => continue,
                        }
                    }
                    kept.push(outcome);
                }
                if kept.is_empty() {
                    // A rank emptied by KeepFirst is still a structural error.
                    return Err(ProfileError::EmptyTieGroup {
                        agent: agent_label.clone(),
                        rank,
                    });
                }
                ranks.push(TieGroup::new(kept));
            }
            let missing: Vec<OutcomeId> = (0..num_outcomes)
                .map(OutcomeId::new)
                .filter(|outcome| !seen.contains(outcome))
                .collect();
            if !missing.is_empty() {
                match self.completion_policy {
                    CompletionPolicy::Reject => {
                        return Err(ProfileError::IncompletePreference {
                            agent: agent_label.clone(),
                            outcome: self.outcome_labels[missing[0].get()].clone(),
                        });
                    }
                    CompletionPolicy::AppendMissing => {
                        ranks.push(TieGroup::new(missing));
                    }
                }
            }
            preferences.push(Preference::from_ranks(ranks));
        }
        Ok(Profile {
            outcome_labels: self.outcome_labels,
            agent_labels: self.agent_labels,
            preferences,
        })
    }
}

/// An immutable, validated population of agents with weak-order
/// preferences over a shared outcome set.
#[derive(Debug, Clone)]
pub struct Profile {
    outcome_labels: Vec<String>,
    agent_labels: Vec<String>,
    preferences: Vec<Preference>,
}

impl Profile {
    /// Returns the number of outcomes.
    #[inline]
    pub fn num_outcomes(&self) -> usize {
        self.outcome_labels.len()
    }

    /// Returns the number of agents.
    #[inline]
    pub fn num_agents(&self) -> usize {
        self.agent_labels.len()
    }

    /// Returns the label of an outcome.
    #[inline]
    pub fn outcome_label(&self, outcome: OutcomeId) -> &str {
        debug_assert!(
            outcome.get() < self.outcome_labels.len(),
            "outcome {} out of range",
            outcome
        );
        &self.outcome_labels[outcome.get()]
    }

    /// Returns the label of an agent.
    #[inline]
    pub fn agent_label(&self, agent: AgentId) -> &str {
        debug_assert!(
            agent.get() < self.agent_labels.len(),
            "agent {} out of range",
            agent
        );
        &self.agent_labels[agent.get()]
    }

    /// Returns an agent's preference.
    #[inline]
    pub fn preference(&self, agent: AgentId) -> &Preference {
        debug_assert!(
            agent.get() < self.preferences.len(),
            "agent {} out of range",
            agent
        );
        &self.preferences[agent.get()]
    }

    /// Iterates over all outcome ids in ascending order.
    pub fn outcomes(&self) -> impl Iterator<Item = OutcomeId> + '_ {
        (0..self.outcome_labels.len()).map(OutcomeId::new)
    }

    /// Iterates over all agent ids in ascending order.
    pub fn agents(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.agent_labels.len()).map(AgentId::new)
    }
}
