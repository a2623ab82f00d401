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

//! # Solver Errors
//!
//! Every error a solve can end with. All of them are fatal for the
//! current solve; there are no retries and no partial results.

use sortition_core::tolerance::ToleranceError;
use sortition_lp::LpError;
use sortition_model::LotteryError;
use thiserror::Error;

/// Errors raised by the solving engines.
#[derive(Debug, Error)]
pub enum SolverError {
    /// A linear program did not end optimally.
    #[error("linear program failed: {0}")]
    Lp(#[from] LpError),
    /// A climb pushed a height outside [0, 1] beyond tolerance.
    #[error("height {0} outside [0, 1]")]
    HeightOutOfRange(f64),
    /// A tightness probe returned a negative objective, which the
    /// mechanism's invariants rule out.
    #[error("negative slack {slack} for {entity}")]
    NegativeSlack { entity: String, slack: f64 },
    /// A speed update produced a negative speed.
    #[error("negative speed {0}")]
    NegativeSpeed(f64),
    /// A frozen tower's height or speed was about to change.
    #[error("frozen tower {0} cannot change")]
    FrozenTower(String),
    /// A tolerance operation failed.
    #[error(transparent)]
    Tolerance(#[from] ToleranceError),
    /// The extracted probabilities did not form a lottery.
    #[error(transparent)]
    Lottery(#[from] LotteryError),
}
