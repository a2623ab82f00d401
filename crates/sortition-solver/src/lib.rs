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

//! # Sortition Solver
//!
//! The four simultaneous-reservation solving engines for fractional
//! social choice. All of them simulate continuous time: entities climb
//! "towers" keyed by outcome sets, the next interesting point in time is
//! found by a small linear program, and the final tower heights are
//! turned into an outcome lottery by one last feasibility program.
//!
//! Three mechanisms are agent-centric (agents climb and bounce between
//! towers):
//!
//! - [`solve_egalitarian`] — all agents start at zero with unit speed.
//! - [`solve_probabilistic_serial`] — agents start with co-demand speeds
//!   and a `1/n` warm-up phase.
//! - [`solve_simultaneous_probabilistic_serial`] — every non-empty
//!   outcome subset is seeded with the fraction of agents it covers.
//!
//! One is tower-centric (towers climb and freeze):
//!
//! - [`solve_simultaneous_reservation`] — each active agent pushes its
//!   current tower and the towers one element larger.
//!
//! Each driver takes a validated [`Profile`](sortition_model::Profile)
//! and [`SolverSettings`] and returns a [`SolveReport`] holding the
//! lottery, the final height profile, and solve statistics.

pub mod climb;
pub mod error;
pub mod extract;
pub mod freeze;
pub mod lambda;
pub mod report;
pub mod settings;
pub mod solve;
pub mod subsets;
pub mod tower;

pub use error::SolverError;
pub use report::{SolveReport, SolveStatistics};
pub use settings::SolverSettings;
pub use solve::{
    solve_egalitarian, solve_probabilistic_serial, solve_simultaneous_probabilistic_serial,
    solve_simultaneous_reservation,
};
