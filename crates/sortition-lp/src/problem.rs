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

//! # LP Problem Builder
//!
//! An append-only builder for a single maximization program: bounded
//! continuous variables, linear constraints, and one linear objective.
//! Variables are plain indices into the problem that issued them; a
//! `Variable` from one problem must not be used with another (checked
//! with `debug_assert!` at translation time in the backend).

/// A continuous decision variable of one `Problem`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Variable(usize);

impl Variable {
    /// Returns the variable's index within its problem.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A linear combination of variables.
///
/// # Examples
///
/// ```rust
/// use sortition_lp::{LinearExpr, Problem};
///
/// let mut problem = Problem::new();
/// let x = problem.add_variable(0.0, Some(1.0));
/// let mut expr = LinearExpr::new();
/// expr.add_term(2.0, x);
/// assert_eq!(expr.terms(), &[(2.0, x)]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LinearExpr {
    terms: Vec<(f64, Variable)>,
}

impl LinearExpr {
    /// Creates an empty expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty expression with room for `capacity` terms.
    pub fn with_capacity(capacity: usize) -> Self {
        LinearExpr {
            terms: Vec::with_capacity(capacity),
        }
    }

    /// Appends a `coefficient * variable` term.
    #[inline]
    pub fn add_term(&mut self, coefficient: f64, variable: Variable) {
        self.terms.push((coefficient, variable));
    }

    /// Returns the terms in insertion order.
    #[inline]
    pub fn terms(&self) -> &[(f64, Variable)] {
        &self.terms
    }

    /// Returns `true` if the expression has no terms.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl FromIterator<(f64, Variable)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (f64, Variable)>>(iter: I) -> Self {
        LinearExpr {
            terms: iter.into_iter().collect(),
        }
    }
}

/// Direction of a linear constraint.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Comparison {
    /// `expr <= rhs`
    LessOrEqual,
    /// `expr >= rhs`
    GreaterOrEqual,
    /// `expr == rhs`
    Equal,
}

/// One linear constraint of a problem.
#[derive(Clone, Debug)]
pub struct Constraint {
    pub expr: LinearExpr,
    pub comparison: Comparison,
    pub rhs: f64,
}

/// A single maximization program under construction.
///
/// Build one, hand it to a `Backend`, and discard it. All variables
/// default to a zero objective coefficient until `maximize` is called.
#[derive(Clone, Debug, Default)]
pub struct Problem {
    bounds: Vec<(f64, Option<f64>)>,
    constraints: Vec<Constraint>,
    objective: LinearExpr,
}

impl Problem {
    /// Creates an empty problem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a continuous variable with the given lower bound and optional
    /// upper bound, returning its handle.
    pub fn add_variable(&mut self, lower: f64, upper: Option<f64>) -> Variable {
        if let Some(upper) = upper {
            debug_assert!(lower <= upper, "inverted bounds [{}, {:?}]", lower, upper);
        }
        let variable = Variable(self.bounds.len());
        self.bounds.push((lower, upper));
        variable
    }

    /// Adds the constraint `expr <comparison> rhs`.
    pub fn constrain(&mut self, expr: LinearExpr, comparison: Comparison, rhs: f64) {
        self.constraints.push(Constraint {
            expr,
            comparison,
            rhs,
        });
    }

    /// Sets the objective to maximize.
    pub fn maximize(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    /// Returns the number of variables.
    #[inline]
    pub fn num_variables(&self) -> usize {
        self.bounds.len()
    }

    /// Returns the per-variable `(lower, upper)` bounds.
    #[inline]
    pub fn variable_bounds(&self) -> &[(f64, Option<f64>)] {
        &self.bounds
    }

    /// Returns the constraints in insertion order.
    #[inline]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Returns the objective expression.
    #[inline]
    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_accumulates() {
        let mut problem = Problem::new();
        let x = problem.add_variable(0.0, Some(1.0));
        let y = problem.add_variable(0.0, None);
        assert_eq!(problem.num_variables(), 2);
        assert_eq!(problem.variable_bounds()[1], (0.0, None));

        let mut expr = LinearExpr::with_capacity(2);
        expr.add_term(1.0, x);
        expr.add_term(-1.0, y);
        problem.constrain(expr.clone(), Comparison::LessOrEqual, 0.5);
        problem.maximize(expr);
        assert_eq!(problem.constraints().len(), 1);
        assert_eq!(problem.objective().terms().len(), 2);
    }

    #[test]
    fn test_expr_from_iterator() {
        let mut problem = Problem::new();
        let x = problem.add_variable(0.0, None);
        let expr: LinearExpr = [(3.0, x)].into_iter().collect();
        assert_eq!(expr.terms(), &[(3.0, x)]);
    }
}
