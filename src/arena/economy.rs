//! Damage and gold formulas: pure functions over the upgrade ledger.

use super::rng::RandomSource;
use super::upgrades::UpgradeState;

/// Damage of one normal hit: configured base plus every weapon bonus owned.
pub fn damage_per_action(base_damage: u64, upgrades: &UpgradeState) -> u64 {
    base_damage + upgrades.weapon_bonus
}

/// Gold earned by one damage event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurrencyGain {
    pub amount: f64,
    pub was_doubled: bool,
}

/// Gold for `damage` points dealt by a hit: the damage itself, doubled on a
/// successful roll. `gold_multiplier` is ledger state only and never scales it.
///
/// Draws from `rng` at most once, and only when a double-gold chance is owned.
/// Call once per damage event, never per display refresh.
pub fn resolve_currency_gain(
    damage: u64,
    upgrades: &UpgradeState,
    rng: &mut dyn RandomSource,
) -> CurrencyGain {
    let base = damage as f64;
    if upgrades.double_gold_chance > 0.0 && rng.next_unit() < upgrades.double_gold_chance {
        CurrencyGain {
            amount: base * 2.0,
            was_doubled: true,
        }
    } else {
        CurrencyGain {
            amount: base,
            was_doubled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::rng::ScriptedRandom;

    #[test]
    fn damage_is_base_plus_weapon_bonus() {
        let mut u = UpgradeState::new();
        assert_eq!(damage_per_action(1, &u), 1);
        u.weapon_bonus = 2;
        assert_eq!(damage_per_action(1, &u), 3);
        assert_eq!(damage_per_action(3, &u), 5);
    }

    #[test]
    fn gain_equals_damage_without_upgrades_and_never_draws() {
        let u = UpgradeState::new();
        let mut rng = ScriptedRandom::new(&[0.0]);
        let gain = resolve_currency_gain(7, &u, &mut rng);
        assert!((gain.amount - 7.0).abs() < 0.001);
        assert!(!gain.was_doubled);
        assert_eq!(rng.draws, 0);
    }

    #[test]
    fn draw_below_chance_doubles() {
        let mut u = UpgradeState::new();
        u.double_gold_chance = 0.1;
        let mut rng = ScriptedRandom::new(&[0.05]);
        let gain = resolve_currency_gain(4, &u, &mut rng);
        assert!((gain.amount - 8.0).abs() < 0.001);
        assert!(gain.was_doubled);
        assert_eq!(rng.draws, 1);
    }

    #[test]
    fn draw_at_or_above_chance_does_not_double() {
        let mut u = UpgradeState::new();
        u.double_gold_chance = 0.1;
        let mut rng = ScriptedRandom::new(&[0.1, 0.99]);
        let first = resolve_currency_gain(4, &u, &mut rng);
        let second = resolve_currency_gain(4, &u, &mut rng);
        assert!(!first.was_doubled);
        assert!(!second.was_doubled);
        assert!((first.amount - 4.0).abs() < 0.001);
        assert_eq!(rng.draws, 2);
    }

    #[test]
    fn gold_multiplier_does_not_scale_gain() {
        let mut u = UpgradeState::new();
        u.gold_multiplier = 1.1;
        let mut rng = ScriptedRandom::new(&[0.2]);
        assert_eq!(resolve_currency_gain(10, &u, &mut rng).amount, 10.0);

        u.double_gold_chance = 0.5;
        let gain = resolve_currency_gain(10, &u, &mut rng);
        assert_eq!(gain.amount, 20.0);
        assert!(gain.was_doubled);
    }
}
