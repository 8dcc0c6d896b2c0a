//! Enemy health and level progression.

use std::fmt;
use std::str::FromStr;

/// Base health of the level 1 enemy before the difficulty multiplier.
const BASE_HEALTH: f64 = 20.0;
/// Flat health added per level.
const HEALTH_PER_LEVEL: f64 = 5.0;
/// Cumulative multiplicative growth per level.
const HEALTH_GROWTH: f64 = 1.10;

/// Difficulty selected before a run starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// All difficulties in display order.
    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Normal, Difficulty::Hard]
    }

    /// Health multiplier applied on top of the level curve.
    pub fn health_multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.6,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Facile",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Difficile",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "facile" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" | "difficile" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty `{other}`")),
        }
    }
}

/// Maximum health of the enemy at `level` (1-based).
///
/// `round((20 + (level-1)*5) * 1.10^(level-1) * multiplier)`.
pub fn health_for_level(level: u32, difficulty: Difficulty) -> i64 {
    let steps = level.max(1) - 1;
    let flat = BASE_HEALTH + steps as f64 * HEALTH_PER_LEVEL;
    let scaled = flat * HEALTH_GROWTH.powi(steps as i32);
    (scaled * difficulty.health_multiplier()).round() as i64
}

/// Result of applying damage to the enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Health stayed above zero.
    Alive,
    /// Health reached zero; the next enemy is already at full health.
    Defeated { new_level: u32 },
}

/// The active target.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyState {
    level: u32,
    current_health: i64,
    max_health: i64,
    difficulty: Difficulty,
}

impl EnemyState {
    /// Level 1 enemy at full health.
    pub fn new(difficulty: Difficulty) -> Self {
        let max_health = health_for_level(1, difficulty);
        Self {
            level: 1,
            current_health: max_health,
            max_health,
            difficulty,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn current_health(&self) -> i64 {
        self.current_health
    }

    pub fn max_health(&self) -> i64 {
        self.max_health
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Remaining health as a fraction of max, for gauges.
    pub fn health_ratio(&self) -> f64 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.current_health.max(0) as f64 / self.max_health as f64).clamp(0.0, 1.0)
    }

    /// Change difficulty mid-run: max health is recomputed for the current
    /// level and current health is clamped into the new range.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.max_health = health_for_level(self.level, difficulty);
        self.current_health = self.current_health.clamp(0, self.max_health);
    }

    /// Subtract `amount`. A lethal hit advances the level and fully heals;
    /// overkill is discarded.
    pub fn apply_damage(&mut self, amount: u64) -> DamageOutcome {
        let amount = i64::try_from(amount).unwrap_or(i64::MAX);
        self.current_health = self.current_health.saturating_sub(amount);
        if self.current_health > 0 {
            return DamageOutcome::Alive;
        }
        self.level += 1;
        self.max_health = health_for_level(self.level, self.difficulty);
        self.current_health = self.max_health;
        DamageOutcome::Defeated {
            new_level: self.level,
        }
    }
}
