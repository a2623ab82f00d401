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

//! # LP Backends
//!
//! The `Backend` trait decouples problem construction from the concrete
//! LP solver. The default implementation bridges to `good_lp` with the
//! pure-Rust `microlp` solver, so no system libraries are required.

use crate::problem::{Comparison, Problem};
use crate::solution::{Solution, SolveResult};
use good_lp::{
    default_solver, Expression, ResolutionError, Solution as _, SolverModel, variable,
};

/// A pluggable LP solver.
pub trait Backend {
    /// Solves the given maximization program.
    fn solve(&self, problem: &Problem) -> SolveResult;
}

/// The default backend, bridging to the `good_lp` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct GoodLpBackend;

impl GoodLpBackend {
    /// Creates the default backend.
    pub fn new() -> Self {
        GoodLpBackend
    }
}

fn translate_expr(
    expr: &crate::problem::LinearExpr,
    handles: &[good_lp::Variable],
) -> Expression {
    let mut translated = Expression::with_capacity(expr.terms().len());
    for (coefficient, variable) in expr.terms() {
        debug_assert!(
            variable.index() < handles.len(),
            "variable {} from another problem",
            variable.index()
        );
        translated.add_mul(*coefficient, handles[variable.index()]);
    }
    translated
}

impl Backend for GoodLpBackend {
    fn solve(&self, problem: &Problem) -> SolveResult {
        let mut vars = good_lp::variables!();
        let mut handles = Vec::with_capacity(problem.num_variables());
        for (lower, upper) in problem.variable_bounds() {
            let mut definition = variable().min(*lower);
            if let Some(upper) = upper {
                definition = definition.max(*upper);
            }
            handles.push(vars.add(definition));
        }

        let objective = translate_expr(problem.objective(), &handles);
        let mut model = vars.maximise(objective).using(default_solver);
        for constraint in problem.constraints() {
            let expr = translate_expr(&constraint.expr, &handles);
            model = match constraint.comparison {
                Comparison::LessOrEqual => model.with(expr.leq(constraint.rhs)),
                Comparison::GreaterOrEqual => model.with(expr.geq(constraint.rhs)),
                Comparison::Equal => model.with(expr.eq(constraint.rhs)),
            };
        }

        match model.solve() {
            Ok(solution) => {
                let values: Vec<f64> = handles
                    .iter()
                    .map(|handle| solution.value(*handle))
                    .collect();
                let objective_value = problem
                    .objective()
                    .terms()
                    .iter()
                    .map(|(coefficient, variable)| coefficient * values[variable.index()])
                    .sum();
                SolveResult::Optimal(Solution::new(objective_value, values))
            }
            Err(ResolutionError::Infeasible) => SolveResult::Infeasible,
            Err(ResolutionError::Unbounded) => SolveResult::Unbounded,
            Err(ResolutionError::Other(_)) => SolveResult::Undefined,
            Err(ResolutionError::Str(_)) => SolveResult::NotSolved,
        }
    }
}
