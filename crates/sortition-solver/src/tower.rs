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

//! # Towers
//!
//! A tower is the committed probability mass of one outcome set. Its
//! height only ever grows, stays inside [0, 1], and becomes immutable
//! once the tower freezes. The agent-centric engines only use heights;
//! the tower-centric engine additionally drives speeds and freezing.
//!
//! `TowerBank` keeps towers lazily in a `BTreeMap` keyed by tie group,
//! so iteration visits smaller sets first and is deterministic.

use crate::error::SolverError;
use sortition_model::TieGroup;
use std::collections::BTreeMap;

/// One tower: a monotone height in [0, 1], a climbing speed, and a
/// terminal frozen flag.
#[derive(Debug, Clone, Default)]
pub struct Tower {
    height: f64,
    speed: f64,
    frozen: bool,
}

impl Tower {
    /// Creates a tower at height zero with speed zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the current speed.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Returns `true` once the tower has frozen.
    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Sets the height.
    ///
    /// Fails on a frozen tower (unless the height is unchanged) and on
    /// heights outside [0, 1]. Reaching height 1 exactly freezes the
    /// tower.
    pub fn set_height(&mut self, height: f64) -> Result<(), SolverError> {
        if self.frozen && self.height != height {
            return Err(SolverError::FrozenTower(format!("at height {}", self.height)));
        }
        if !(0.0..=1.0).contains(&height) {
            return Err(SolverError::HeightOutOfRange(height));
        }
        self.height = height;
        if height == 1.0 {
            self.freeze();
        }
        Ok(())
    }

    /// Raises the height to `climber_height` if that is above the
    /// current height.
    pub fn try_climb(&mut self, climber_height: f64) -> Result<(), SolverError> {
        if climber_height > self.height {
            self.set_height(climber_height)?;
        }
        Ok(())
    }

    /// Freezes the tower, pinning its speed to zero.
    pub fn freeze(&mut self) {
        self.speed = 0.0;
        self.frozen = true;
    }

    /// Sets the speed.
    ///
    /// A frozen tower only accepts speed zero.
    pub fn set_speed(&mut self, speed: f64) -> Result<(), SolverError> {
        if self.frozen && speed != 0.0 {
            return Err(SolverError::FrozenTower(format!("at height {}", self.height)));
        }
        if speed < 0.0 {
            return Err(SolverError::NegativeSpeed(speed));
        }
        self.speed = speed;
        Ok(())
    }

    /// Adds to the speed.
    pub fn add_speed(&mut self, delta: f64) -> Result<(), SolverError> {
        self.set_speed(self.speed + delta)
    }
}

/// A lazily populated map from tie groups to towers.
#[derive(Debug, Clone, Default)]
pub struct TowerBank {
    towers: BTreeMap<TieGroup, Tower>,
}

impl TowerBank {
    /// Creates an empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tower of a tie group, materializing it at height zero
    /// if it does not exist yet.
    pub fn tower(&mut self, group: &TieGroup) -> &mut Tower {
        self.towers.entry(group.clone()).or_default()
    }

    /// Returns the tower of a tie group, if it has been materialized.
    pub fn get(&self, group: &TieGroup) -> Option<&Tower> {
        self.towers.get(group)
    }

    /// Iterates over all materialized towers in group order.
    pub fn iter(&self) -> impl Iterator<Item = (&TieGroup, &Tower)> + '_ {
        self.towers.iter()
    }

    /// Iterates mutably over all materialized towers in group order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&TieGroup, &mut Tower)> + '_ {
        self.towers.iter_mut()
    }

    /// Returns the heights of all towers with positive height.
    pub fn positive_heights(&self) -> BTreeMap<TieGroup, f64> {
        self.towers
            .iter()
            .filter(|(_, tower)| tower.height() > 0.0)
            .map(|(group, tower)| (group.clone(), tower.height()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortition_model::OutcomeId;

    fn group(indices: &[usize]) -> TieGroup {
        TieGroup::new(indices.iter().copied().map(OutcomeId::new))
    }

    #[test]
    fn test_try_climb_is_monotone() {
        let mut tower = Tower::new();
        tower.try_climb(0.4).unwrap();
        assert_eq!(tower.height(), 0.4);
        tower.try_climb(0.2).unwrap();
        assert_eq!(tower.height(), 0.4);
        tower.try_climb(0.9).unwrap();
        assert_eq!(tower.height(), 0.9);
    }

    #[test]
    fn test_height_out_of_range() {
        let mut tower = Tower::new();
        assert!(matches!(
            tower.set_height(1.5),
            Err(SolverError::HeightOutOfRange(_))
        ));
        assert!(matches!(
            tower.set_height(-0.1),
            Err(SolverError::HeightOutOfRange(_))
        ));
    }

    #[test]
    fn test_unit_height_freezes() {
        let mut tower = Tower::new();
        tower.set_speed(2.0).unwrap();
        tower.set_height(1.0).unwrap();
        assert!(tower.is_frozen());
        assert_eq!(tower.speed(), 0.0);
    }

    #[test]
    fn test_frozen_tower_is_immutable() {
        let mut tower = Tower::new();
        tower.set_height(0.5).unwrap();
        tower.freeze();
        assert!(matches!(
            tower.set_height(0.6),
            Err(SolverError::FrozenTower(_))
        ));
        // Setting the unchanged height is allowed.
        tower.set_height(0.5).unwrap();
        assert!(matches!(
            tower.set_speed(1.0),
            Err(SolverError::FrozenTower(_))
        ));
        tower.set_speed(0.0).unwrap();
    }

    #[test]
    fn test_negative_speed() {
        let mut tower = Tower::new();
        assert!(matches!(
            tower.set_speed(-1.0),
            Err(SolverError::NegativeSpeed(_))
        ));
    }

    #[test]
    fn test_bank_materializes_lazily() {
        let mut bank = TowerBank::new();
        assert!(bank.get(&group(&[0])).is_none());
        bank.tower(&group(&[0])).try_climb(0.3).unwrap();
        assert_eq!(bank.get(&group(&[0])).unwrap().height(), 0.3);
    }

    #[test]
    fn test_positive_heights_filters_zero() {
        let mut bank = TowerBank::new();
        bank.tower(&group(&[0])).try_climb(0.3).unwrap();
        bank.tower(&group(&[1]));
        let heights = bank.positive_heights();
        assert_eq!(heights.len(), 1);
        assert_eq!(heights[&group(&[0])], 0.3);
    }
}
