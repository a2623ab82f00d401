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

//! # Solve Reports
//!
//! What a driver hands back: the extracted lottery, the final height
//! profile, and statistics about the solve. The height profile is the
//! canonical reproducibility artifact; two solves of the same profile
//! with the same settings produce identical height maps.

use sortition_model::{Lottery, OutcomeId, TieGroup};
use std::collections::BTreeMap;
use std::time::Duration;

/// Counters and timing of one solve.
#[derive(Debug, Clone)]
pub struct SolveStatistics {
    iterations: u64,
    lp_solves: u64,
    solve_duration: Duration,
}

impl SolveStatistics {
    /// Creates statistics from raw counters.
    pub fn new(iterations: u64, lp_solves: u64, solve_duration: Duration) -> Self {
        SolveStatistics {
            iterations,
            lp_solves,
            solve_duration,
        }
    }

    /// Returns the number of simulation iterations.
    #[inline]
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Returns the total number of LP solves, extraction included.
    #[inline]
    pub fn lp_solves(&self) -> u64 {
        self.lp_solves
    }

    /// Returns the wall-clock duration of the solve.
    #[inline]
    pub fn solve_duration(&self) -> Duration {
        self.solve_duration
    }
}

impl std::fmt::Display for SolveStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} iterations, {} LP solves in {:?}",
            self.iterations, self.lp_solves, self.solve_duration
        )
    }
}

/// The result of one solve.
#[derive(Debug, Clone)]
pub struct SolveReport {
    lottery: Lottery<OutcomeId>,
    heights: BTreeMap<TieGroup, f64>,
    stats: SolveStatistics,
}

impl SolveReport {
    /// Creates a report.
    pub fn new(
        lottery: Lottery<OutcomeId>,
        heights: BTreeMap<TieGroup, f64>,
        stats: SolveStatistics,
    ) -> Self {
        SolveReport {
            lottery,
            heights,
            stats,
        }
    }

    /// Returns the extracted outcome lottery.
    #[inline]
    pub fn lottery(&self) -> &Lottery<OutcomeId> {
        &self.lottery
    }

    /// Returns the final height profile.
    #[inline]
    pub fn heights(&self) -> &BTreeMap<TieGroup, f64> {
        &self.heights
    }

    /// Returns the solve statistics.
    #[inline]
    pub fn stats(&self) -> &SolveStatistics {
        &self.stats
    }

    /// Consumes the report, returning only the lottery.
    pub fn into_lottery(self) -> Lottery<OutcomeId> {
        self.lottery
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_display() {
        let stats = SolveStatistics::new(3, 11, Duration::from_millis(2));
        assert_eq!(format!("{}", stats), "3 iterations, 11 LP solves in 2ms");
    }
}
