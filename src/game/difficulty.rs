//! Difficulty curve
//!
//! Maps a level to the number of choices shown and how close their colors
//! are to the target. Higher levels mean more panels and subtler differences.

use serde::{Deserialize, Serialize};

/// Parameters of the level -> difficulty mapping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyCurve {
    /// Choices at level 0; level N shows `base_choices + N`
    #[serde(default = "default_base_choices")]
    pub base_choices: usize,

    /// Upper bound on the number of choices
    #[serde(default = "default_max_choices")]
    pub max_choices: usize,

    /// Maximum color distance at level 1
    #[serde(default = "default_base_distance")]
    pub base_distance: f64,

    /// Distance removed per level
    #[serde(default = "default_distance_step")]
    pub distance_step: f64,

    /// Lower bound on the maximum distance
    #[serde(default = "default_min_distance")]
    pub min_distance: f64,
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            base_choices: default_base_choices(),
            max_choices: default_max_choices(),
            base_distance: default_base_distance(),
            distance_step: default_distance_step(),
            min_distance: default_min_distance(),
        }
    }
}

fn default_base_choices() -> usize {
    2
}

fn default_max_choices() -> usize {
    9
}

fn default_base_distance() -> f64 {
    150.0
}

fn default_distance_step() -> f64 {
    20.0
}

fn default_min_distance() -> f64 {
    10.0
}

/// Round parameters for one level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultySettings {
    pub choice_count: usize,
    pub max_distance: f64,
}

impl DifficultyCurve {
    pub fn settings(&self, level: u32) -> DifficultySettings {
        let level_offset = usize::try_from(level).unwrap_or(usize::MAX);
        let steps = f64::from(level.saturating_sub(1));

        DifficultySettings {
            choice_count: self
                .base_choices
                .saturating_add(level_offset)
                .min(self.max_choices),
            max_distance: (self.base_distance - steps * self.distance_step)
                .max(self.min_distance),
        }
    }
}

/// Settings for `level` on the default curve.
pub fn difficulty_for(level: u32) -> DifficultySettings {
    DifficultyCurve::default().settings(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_one() {
        let settings = difficulty_for(1);
        assert_eq!(settings.choice_count, 3);
        assert_eq!(settings.max_distance, 150.0);
    }

    #[test]
    fn test_choices_grow_until_cap() {
        assert_eq!(difficulty_for(3).choice_count, 5);
        assert_eq!(difficulty_for(7).choice_count, 9);
        assert_eq!(difficulty_for(8).choice_count, 9);
        assert_eq!(difficulty_for(u32::MAX).choice_count, 9);
    }

    #[test]
    fn test_distance_shrinks_until_floor() {
        assert_eq!(difficulty_for(2).max_distance, 130.0);
        assert_eq!(difficulty_for(5).max_distance, 70.0);
        assert_eq!(difficulty_for(8).max_distance, 10.0);
        assert_eq!(difficulty_for(20).max_distance, 10.0);
    }

    #[test]
    fn test_custom_curve() {
        let curve = DifficultyCurve {
            base_choices: 1,
            max_choices: 4,
            base_distance: 100.0,
            distance_step: 50.0,
            min_distance: 5.0,
        };
        let settings = curve.settings(3);
        assert_eq!(settings.choice_count, 4);
        assert_eq!(settings.max_distance, 5.0);
    }
}
