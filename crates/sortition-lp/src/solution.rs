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

//! # LP Outcomes
//!
//! The result model of one LP solve. `SolveResult` carries either an
//! optimal `Solution` or a terminal non-optimal status; callers that
//! require optimality use `optimal()` to convert any other status into
//! the matching `LpError` variant.

use crate::problem::{LinearExpr, Variable};
use thiserror::Error;

/// Terminal status of an LP solve.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    /// An optimal solution was found.
    Optimal,
    /// The constraints admit no feasible point.
    Infeasible,
    /// The objective is unbounded above.
    Unbounded,
    /// The solver could not classify the program.
    Undefined,
    /// The solve did not run to completion.
    NotSolved,
}

/// Errors raised when an LP solve does not end optimally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LpError {
    #[error("linear program is infeasible")]
    Infeasible,
    #[error("linear program is unbounded")]
    Unbounded,
    #[error("linear program status is undefined")]
    Undefined,
    #[error("linear program was not solved")]
    NotSolved,
}

/// An optimal LP solution: the objective value and one value per
/// variable, indexed by `Variable::index`.
#[derive(Clone, Debug)]
pub struct Solution {
    objective_value: f64,
    values: Vec<f64>,
}

impl Solution {
    /// Creates a solution from an objective value and per-variable values.
    pub fn new(objective_value: f64, values: Vec<f64>) -> Self {
        Solution {
            objective_value,
            values,
        }
    }

    /// Returns the objective value.
    #[inline]
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    /// Returns the value of a variable.
    #[inline]
    pub fn value(&self, variable: Variable) -> f64 {
        debug_assert!(
            variable.index() < self.values.len(),
            "variable {} out of range",
            variable.index()
        );
        self.values[variable.index()]
    }

    /// Evaluates a linear expression at this solution.
    pub fn eval(&self, expr: &LinearExpr) -> f64 {
        expr.terms()
            .iter()
            .map(|(coefficient, variable)| coefficient * self.value(*variable))
            .sum()
    }
}

/// The outcome of one LP solve.
#[derive(Clone, Debug)]
pub enum SolveResult {
    Optimal(Solution),
    Infeasible,
    Unbounded,
    Undefined,
    NotSolved,
}

impl SolveResult {
    /// Returns the status of this result.
    pub fn status(&self) -> Status {
        match self {
            SolveResult::Optimal(_) => Status::Optimal,
            SolveResult::Infeasible => Status::Infeasible,
            SolveResult::Unbounded => Status::Unbounded,
            SolveResult::Undefined => Status::Undefined,
            SolveResult::NotSolved => Status::NotSolved,
        }
    }

    /// Returns the optimal solution, or the `LpError` matching the
    /// non-optimal status.
    pub fn optimal(self) -> Result<Solution, LpError> {
        match self {
            SolveResult::Optimal(solution) => Ok(solution),
            SolveResult::Infeasible => Err(LpError::Infeasible),
            SolveResult::Unbounded => Err(LpError::Unbounded),
            SolveResult::Undefined => Err(LpError::Undefined),
            SolveResult::NotSolved => Err(LpError::NotSolved),
        }
    }
}
