//! Upgrade ledger: which shop items the run owns and what they grant.

use std::collections::BTreeSet;

use super::error::PurchaseError;
use super::shop::{ItemId, ShopItem};

/// A single mutation a shop item applies to the ledger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    /// Flat bonus added to every hit.
    WeaponBonus(u64),
    /// Unlocks the 2s bleed tick.
    Hemorrhage,
    /// Unlocks the 2%-per-15-clicks burn.
    PassiveBurn,
    /// Unlocks the hold-to-charge attack.
    ChargeAttack,
    /// Chance in `[0, 1]` that a hit's gold is doubled.
    DoubleGoldChance(f64),
    /// Multiplier on the base gold gain of a hit.
    GoldMultiplier(f64),
}

/// Per-run upgrade record.
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeState {
    pub weapon_bonus: u64,
    pub hemorrhage_active: bool,
    pub passive_active: bool,
    pub active_bonus_active: bool,
    pub double_gold_chance: f64,
    pub gold_multiplier: f64,
    owned: BTreeSet<ItemId>,
}

impl Default for UpgradeState {
    fn default() -> Self {
        Self {
            weapon_bonus: 0,
            hemorrhage_active: false,
            passive_active: false,
            active_bonus_active: false,
            double_gold_chance: 0.0,
            gold_multiplier: 1.0,
            owned: BTreeSet::new(),
        }
    }
}

impl UpgradeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owns(&self, id: ItemId) -> bool {
        self.owned.contains(&id)
    }

    /// Owned items in catalog order.
    pub fn owned(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.owned.iter().copied()
    }

    pub fn owned_count(&self) -> usize {
        self.owned.len()
    }

    /// Apply every effect of `item` and record it as owned.
    ///
    /// A second application for the same item is refused without touching
    /// any field; the shop checks ownership before deducting gold.
    pub fn apply_effect(&mut self, item: &ShopItem) -> Result<(), PurchaseError> {
        if self.owns(item.id) {
            return Err(PurchaseError::AlreadyOwned(item.id));
        }
        for effect in item.effects {
            self.apply(*effect);
        }
        self.owned.insert(item.id);
        Ok(())
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::WeaponBonus(n) => self.weapon_bonus += n,
            Effect::Hemorrhage => self.hemorrhage_active = true,
            Effect::PassiveBurn => self.passive_active = true,
            Effect::ChargeAttack => self.active_bonus_active = true,
            Effect::DoubleGoldChance(p) => self.double_gold_chance = p.clamp(0.0, 1.0),
            Effect::GoldMultiplier(m) => self.gold_multiplier = m.max(1.0),
        }
    }
}
