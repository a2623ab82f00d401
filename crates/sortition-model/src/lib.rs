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

//! # Sortition Model
//!
//! The problem-instance data model for the sortition solvers: outcomes,
//! agents, weak-order preferences, validated preference profiles, and the
//! probabilistic result types (lotteries over outcomes and over complete
//! assignments).
//!
//! ## Modules
//!
//! - `index`: the `OutcomeId` and `AgentId` index spaces.
//! - `preference`: tie groups and weak-order preference lists.
//! - `profile`: the `ProfileBuilder` entry point and the immutable,
//!   validated `Profile` it produces.
//! - `lottery`: validated probability distributions (`Lottery`), complete
//!   assignments and lotteries over assignments.
//!
//! A `Profile` is the only input a solver accepts. All structural
//! validation (empty preferences, duplicate outcomes, incomplete rankings)
//! happens in `ProfileBuilder::build`, so downstream code can rely on a
//! well-formed instance.

pub mod index;
pub mod lottery;
pub mod preference;
pub mod profile;

pub use index::{AgentId, OutcomeId};
pub use lottery::{Assignment, AssignmentLottery, Lottery, LotteryError};
pub use preference::{Preference, PreferenceEntry, TieGroup};
pub use profile::{CompletionPolicy, DuplicatePolicy, Profile, ProfileBuilder, ProfileError};
