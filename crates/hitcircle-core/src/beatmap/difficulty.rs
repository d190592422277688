use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

/// Difficulty parameters of a beatmap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Difficulty {
    pub approach_rate: f64,
    pub circle_size: f64,
    pub overall_difficulty: f64,
    #[serde(rename = "HPDrainRate")]
    pub hp_drain_rate: f64,
    pub slider_multiplier: f64,
    pub slider_tick_rate: f64,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            approach_rate: 5.0,
            circle_size: 5.0,
            overall_difficulty: 5.0,
            hp_drain_rate: 5.0,
            slider_multiplier: 1.4,
            slider_tick_rate: 1.0,
        }
    }
}

/// Recognized `[Difficulty]` keys, including the short aliases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
pub enum DifficultyKey {
    #[strum(to_string = "ApproachRate", serialize = "AR")]
    ApproachRate,
    #[strum(to_string = "CircleSize", serialize = "CS")]
    CircleSize,
    #[strum(to_string = "OverallDifficulty", serialize = "OD")]
    OverallDifficulty,
    #[strum(to_string = "HPDrainRate", serialize = "HP")]
    HpDrainRate,
    #[strum(serialize = "SliderMultiplier")]
    SliderMultiplier,
    #[strum(serialize = "SliderTickRate")]
    SliderTickRate,
}

impl DifficultyKey {
    /// Canonical key name as written by editors
    pub fn canonical_name(&self) -> &'static str {
        self.into()
    }
}

impl Difficulty {
    pub fn get(&self, key: DifficultyKey) -> f64 {
        match key {
            DifficultyKey::ApproachRate => self.approach_rate,
            DifficultyKey::CircleSize => self.circle_size,
            DifficultyKey::OverallDifficulty => self.overall_difficulty,
            DifficultyKey::HpDrainRate => self.hp_drain_rate,
            DifficultyKey::SliderMultiplier => self.slider_multiplier,
            DifficultyKey::SliderTickRate => self.slider_tick_rate,
        }
    }

    pub fn set(&mut self, key: DifficultyKey, value: f64) {
        let field = match key {
            DifficultyKey::ApproachRate => &mut self.approach_rate,
            DifficultyKey::CircleSize => &mut self.circle_size,
            DifficultyKey::OverallDifficulty => &mut self.overall_difficulty,
            DifficultyKey::HpDrainRate => &mut self.hp_drain_rate,
            DifficultyKey::SliderMultiplier => &mut self.slider_multiplier,
            DifficultyKey::SliderTickRate => &mut self.slider_tick_rate,
        };
        *field = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_defaults() {
        let difficulty = Difficulty::default();
        assert_eq!(difficulty.approach_rate, 5.0);
        assert_eq!(difficulty.circle_size, 5.0);
        assert_eq!(difficulty.overall_difficulty, 5.0);
        assert_eq!(difficulty.hp_drain_rate, 5.0);
        assert_eq!(difficulty.slider_multiplier, 1.4);
        assert_eq!(difficulty.slider_tick_rate, 1.0);
    }

    #[test]
    fn test_key_aliases() {
        assert_eq!(DifficultyKey::from_str("AR").unwrap(), DifficultyKey::ApproachRate);
        assert_eq!(DifficultyKey::from_str("CS").unwrap(), DifficultyKey::CircleSize);
        assert_eq!(DifficultyKey::from_str("OD").unwrap(), DifficultyKey::OverallDifficulty);
        assert_eq!(DifficultyKey::from_str("HP").unwrap(), DifficultyKey::HpDrainRate);
        assert_eq!(DifficultyKey::HpDrainRate.canonical_name(), "HPDrainRate");
        assert!(DifficultyKey::from_str("StackLeniency").is_err());
    }

    #[test]
    fn test_get_set() {
        let mut difficulty = Difficulty::default();
        difficulty.set(DifficultyKey::SliderTickRate, 2.0);
        assert_eq!(difficulty.get(DifficultyKey::SliderTickRate), 2.0);
        assert_eq!(difficulty.slider_tick_rate, 2.0);
    }
}
