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

//! # Solver Settings
//!
//! Everything that parameterizes a solve: the LP backend and the
//! floating-point tolerance context. Settings are plain values shared by
//! reference across solve calls.

use sortition_core::tolerance::Tolerance;
use sortition_lp::{Backend, GoodLpBackend};

/// Configuration of a solve.
///
/// # Examples
///
/// ```rust
/// use sortition_solver::SolverSettings;
///
/// let settings = SolverSettings::default();
/// assert!(settings.tolerance().is_close(1.0, 1.0 + 1e-9));
/// ```
#[derive(Debug, Clone)]
pub struct SolverSettings<B = GoodLpBackend> {
    backend: B,
    tolerance: Tolerance,
}

impl<B: Backend> SolverSettings<B> {
    /// Creates settings with an explicit backend and tolerance.
    pub fn new(backend: B, tolerance: Tolerance) -> Self {
        SolverSettings { backend, tolerance }
    }

    /// Returns the LP backend.
    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the tolerance context.
    #[inline]
    pub fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }
}

impl Default for SolverSettings<GoodLpBackend> {
    /// Returns settings with the `good_lp` backend and default tolerance.
    fn default() -> Self {
        SolverSettings {
            backend: GoodLpBackend::new(),
            tolerance: Tolerance::default(),
        }
    }
}
