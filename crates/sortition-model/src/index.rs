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

//! # Model Index Spaces
//!
//! Typed indices for the two entity kinds of a problem instance. An
//! `OutcomeId` indexes into a profile's outcome label table, an `AgentId`
//! into its agent table. The phantom tags make it a compile error to use
//! one where the other is expected.

use sortition_core::index::{TypedIndex, TypedIndexTag};

/// Tag type for outcome indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct OutcomeTag;

impl TypedIndexTag for OutcomeTag {
    const NAME: &'static str = "OutcomeId";
}

/// Tag type for agent indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct AgentTag;

impl TypedIndexTag for AgentTag {
    const NAME: &'static str = "AgentId";
}

/// Index of an outcome within a profile.
pub type OutcomeId = TypedIndex<OutcomeTag>;

/// Index of an agent within a profile.
pub type AgentId = TypedIndex<AgentTag>;
