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

//! # Sortition LP
//!
//! Thin linear-programming plumbing for the sortition solvers. The
//! solvers build many small maximization programs per run; this crate
//! gives them a minimal, allocation-friendly builder (`Problem`), a
//! status/solution model (`SolveResult`, `Solution`, `LpError`) and a
//! `Backend` trait so the concrete solver is pluggable. The default
//! `GoodLpBackend` bridges to the `good_lp` crate with its pure-Rust
//! `microlp` solver.
//!
//! A `Problem` is built fresh for each solve and discarded afterwards;
//! nothing in this crate holds state across LP calls.

pub mod backend;
pub mod problem;
pub mod solution;

pub use backend::{Backend, GoodLpBackend};
pub use problem::{Comparison, Constraint, LinearExpr, Problem, Variable};
pub use solution::{LpError, Solution, SolveResult, Status};
