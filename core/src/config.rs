use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    TimeAttack,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Self::Easy, Self::Normal, Self::Hard, Self::TimeAttack];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
            Self::TimeAttack => "time_attack",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "easy" => Ok(Self::Easy),
            "normal" => Ok(Self::Normal),
            "hard" => Ok(Self::Hard),
            "time_attack" | "time-attack" => Ok(Self::TimeAttack),
            _ => Err(GameError::UnknownDifficulty),
        }
    }
}

/// Per-kind probability that a placed tile becomes special.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecialRates {
    pub wildcard: f64,
    pub time_bonus: f64,
    pub multiplier: f64,
    pub bomb: f64,
}

impl SpecialRates {
    pub const fn get(&self, special: Special) -> f64 {
        match special {
            Special::Wildcard => self.wildcard,
            Special::TimeBonus => self.time_bonus,
            Special::Multiplier => self.multiplier,
            Special::Bomb => self.bomb,
        }
    }

    pub fn total(&self) -> f64 {
        Special::ALL.iter().map(|&special| self.get(special)).sum()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    /// Fraction of the board slots occupied at the start of a session.
    pub fill_rate: f64,
    pub special: SpecialRates,
    pub initial_seconds: u32,
}

impl DifficultyConfig {
    pub const fn easy() -> Self {
        Self {
            fill_rate: 0.55,
            special: SpecialRates {
                wildcard: 0.04,
                time_bonus: 0.03,
                multiplier: 0.03,
                bomb: 0.02,
            },
            initial_seconds: 150,
        }
    }

    pub const fn normal() -> Self {
        Self {
            fill_rate: 0.6,
            special: SpecialRates {
                wildcard: 0.03,
                time_bonus: 0.015,
                multiplier: 0.025,
                bomb: 0.01,
            },
            initial_seconds: 120,
        }
    }

    pub const fn hard() -> Self {
        Self {
            fill_rate: 0.65,
            special: SpecialRates {
                wildcard: 0.015,
                time_bonus: 0.01,
                multiplier: 0.02,
                bomb: 0.005,
            },
            initial_seconds: 90,
        }
    }

    pub const fn time_attack() -> Self {
        Self {
            fill_rate: 0.6,
            special: SpecialRates {
                wildcard: 0.025,
                time_bonus: 0.005,
                multiplier: 0.04,
                bomb: 0.015,
            },
            initial_seconds: 60,
        }
    }

    pub const fn preset(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self::easy(),
            Difficulty::Normal => Self::normal(),
            Difficulty::Hard => Self::hard(),
            Difficulty::TimeAttack => Self::time_attack(),
        }
    }

    pub fn tiles_to_place(&self, rules: &Rules) -> CellCount {
        scale_count(rules.total_slots(), self.fill_rate)
    }

    pub fn validate(&self, difficulty: Difficulty) -> Result<()> {
        if !self.fill_rate.is_finite() || !(0.0..1.0).contains(&self.fill_rate) {
            return Err(GameError::InvalidFillRate(difficulty));
        }

        for special in Special::ALL {
            let probability = self.special.get(special);
            if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
                return Err(GameError::InvalidProbability(difficulty, special));
            }
        }

        if self.special.total() > 1.0 {
            return Err(GameError::ProbabilitySumTooHigh(difficulty));
        }

        if self.initial_seconds == 0 {
            return Err(GameError::InvalidInitialTime(difficulty));
        }

        Ok(())
    }
}

/// Settings shared by every difficulty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub size: Coord2,
    /// Seconds taken for an activation with no matching pair.
    pub time_penalty: u32,
    /// Seconds granted when a time bonus tile is matched.
    pub time_bonus: u32,
}

impl Rules {
    pub const fn total_slots(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::InvalidBoardSize);
        }
        Ok(())
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            size: (23, 15),
            time_penalty: 10,
            time_bonus: 15,
        }
    }
}

/// Complete static configuration for sessions, one row per difficulty.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    pub rules: Rules,
    pub easy: DifficultyConfig,
    pub normal: DifficultyConfig,
    pub hard: DifficultyConfig,
    pub time_attack: DifficultyConfig,
}

impl DifficultyTable {
    pub const fn get(&self, difficulty: Difficulty) -> &DifficultyConfig {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
            Difficulty::TimeAttack => &self.time_attack,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.rules.validate()?;
        for difficulty in Difficulty::ALL {
            self.get(difficulty).validate(difficulty)?;
        }
        Ok(())
    }

    /// Returns the table back only if it validates.
    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            rules: Rules::default(),
            easy: DifficultyConfig::easy(),
            normal: DifficultyConfig::normal(),
            hard: DifficultyConfig::hard(),
            time_attack: DifficultyConfig::time_attack(),
        }
    }
}
