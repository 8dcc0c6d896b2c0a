//! Launch configuration: hero, difficulty and tuning read from the page URL.
//!
//! `?difficulty=hard&hero=fort&hero_damage=legacy&seed=42`. Unknown keys and
//! unparsable values are skipped with a console warning; the setup screen can
//! still change hero and difficulty afterwards.

use std::fmt;
use std::str::FromStr;

use crate::arena::enemy::Difficulty;
use crate::arena::session::RunConfig;

/// Selectable hero. Cosmetic unless legacy hero damage is enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeroId {
    /// Pink monster.
    Rapide,
    /// Owlet monster.
    Fort,
}

impl HeroId {
    pub fn all() -> &'static [HeroId] {
        &[HeroId::Rapide, HeroId::Fort]
    }

    pub fn key(self) -> &'static str {
        match self {
            HeroId::Rapide => "rapide",
            HeroId::Fort => "fort",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HeroId::Rapide => "Rapide",
            HeroId::Fort => "Fort",
        }
    }

    /// Sprite sheet asset name.
    pub fn sprite(self) -> &'static str {
        match self {
            HeroId::Rapide => "Pink_Monster_Attack1_4.png",
            HeroId::Fort => "Owlet_Monster_Attack1_4.png",
        }
    }
}

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for HeroId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rapide" => Ok(HeroId::Rapide),
            "fort" => Ok(HeroId::Fort),
            other => Err(format!("unknown hero `{other}`")),
        }
    }
}

/// How the hero choice maps to base damage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeroDamage {
    /// Every hero hits for 1.
    #[default]
    Uniform,
    /// The strong hero hits for 3, as in the first version of the game.
    Legacy,
}

impl FromStr for HeroDamage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" | "0" | "off" => Ok(HeroDamage::Uniform),
            "legacy" | "1" | "on" => Ok(HeroDamage::Legacy),
            other => Err(format!("unknown hero_damage `{other}`")),
        }
    }
}

/// Base damage of a hit for `hero` under `policy`.
pub fn base_damage(hero: HeroId, policy: HeroDamage) -> u64 {
    match (policy, hero) {
        (HeroDamage::Legacy, HeroId::Fort) => 3,
        _ => 1,
    }
}

/// Everything the shell needs before a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LaunchOptions {
    pub hero: Option<HeroId>,
    pub difficulty: Difficulty,
    pub hero_damage: HeroDamage,
    /// Fixed RNG seed; random per page load when absent.
    pub seed: Option<u64>,
}

impl LaunchOptions {
    /// Parse a URL query string (with or without the leading `?`).
    pub fn from_query(query: &str) -> Self {
        let mut opts = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let result = match key {
                "difficulty" => value.parse().map(|d| opts.difficulty = d),
                "hero" => value.parse().map(|h| opts.hero = Some(h)),
                "hero_damage" => value.parse().map(|p| opts.hero_damage = p),
                "seed" => value
                    .parse::<u64>()
                    .map(|s| opts.seed = Some(s))
                    .map_err(|e| format!("bad seed `{value}`: {e}")),
                other => Err(format!("unknown option `{other}`")),
            };
            if let Err(msg) = result {
                crate::logging::warn(&format!("config: {msg}, ignored"));
            }
        }
        opts
    }

    /// Read the current page's query string.
    pub fn from_page() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let query = web_sys::window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            Self::from_query(&query)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::default()
        }
    }

    /// Core configuration for a run with `hero`.
    pub fn run_config(&self, hero: HeroId) -> RunConfig {
        RunConfig {
            difficulty: self.difficulty,
            base_damage: base_damage(hero, self.hero_damage),
        }
    }
}
